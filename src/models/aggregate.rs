use serde::ser::{Serialize, SerializeTuple, Serializer};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Date to precipitation, one entry per date.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Per-date temperature summary across all reporting stations.
///
/// Serializes as `[date, min, avg, max]`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AggregateRow {
    pub date: String,
    pub min_temperature: f64,
    pub avg_temperature: f64,
    pub max_temperature: f64,
}

impl AggregateRow {
    pub fn new(date: impl Into<String>, min: f64, avg: f64, max: f64) -> Self {
        Self {
            date: date.into(),
            min_temperature: min,
            avg_temperature: avg,
            max_temperature: max,
        }
    }
}

impl Serialize for AggregateRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.date)?;
        tuple.serialize_element(&self.min_temperature)?;
        tuple.serialize_element(&self.avg_temperature)?;
        tuple.serialize_element(&self.max_temperature)?;
        tuple.end()
    }
}

/// A single temperature reading, serialized as `[date, temperature]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: f64,
}

impl Serialize for TemperatureObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.date)?;
        tuple.serialize_element(&self.temperature)?;
        tuple.end()
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DatasetSummary {
    pub observations: i64,
    pub stations: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl DatasetSummary {
    pub fn is_empty(&self) -> bool {
        self.observations == 0
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Dataset Summary\n");
        summary.push_str("===============\n");
        summary.push_str(&format!("Observations: {}\n", self.observations));
        summary.push_str(&format!("Stations: {}\n", self.stations));
        match (&self.first_date, &self.last_date) {
            (Some(first), Some(last)) => {
                summary.push_str(&format!("Date Range: {} to {}\n", first, last));
            }
            _ => summary.push_str("Date Range: (empty dataset)\n"),
        }
        summary
    }
}
