//! Evaluation metrics report

use std::collections::HashMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Metric name for the fraction of exactly-matching panels
pub const ACCURACY: &str = "accuracy";

/// Metric name for the mean squared error
pub const LOSS: &str = "loss";

/// Metric name used when no ground truth is available
pub const NOTE: &str = "note";

/// A single metric value
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Numeric metric
    Float(f64),

    /// Textual metric
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Float(value) => write!(f, "{}", value),
            MetricValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Float(value) => serializer.serialize_f64(*value),
            MetricValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// Insertion-ordered mapping from metric name to value
///
/// Overwriting an existing name keeps its first-insertion position, so the
/// leading metrics of a report stay in front however often they are updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsReport {
    order: Vec<String>,
    values: HashMap<String, MetricValue>,
}

impl MetricsReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metric, or overwrite an existing one under the same name
    pub fn add_metric(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value.into());
    }

    /// Value recorded under `name`, if any
    pub fn get_metric(&self, name: &str) -> Option<&MetricValue> {
        self.values.get(name)
    }

    /// Numeric value recorded under `name`, if any
    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(MetricValue::Float(value)) => Some(*value),
            _ => None,
        }
    }

    /// Number of recorded metrics
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the report holds no metrics
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over all metrics in insertion order
    pub fn metrics(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|value| (name.as_str(), value)))
    }

    /// Append another report's entries, in its order, under the same
    /// overwrite rule
    pub fn merge(&mut self, other: MetricsReport) {
        for name in other.order {
            if let Some(value) = other.values.get(&name) {
                self.add_metric(name.clone(), value.clone());
            }
        }
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.metrics().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl Serialize for MetricsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.metrics() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
