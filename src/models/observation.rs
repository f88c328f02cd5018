use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One station reading as stored in the `measurement` table.
///
/// Dates are kept as `YYYY-MM-DD` strings; the fixed width means string
/// order matches calendar order, and every query relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Observation {
    #[validate(length(min = 1))]
    pub station: String,

    #[validate(length(equal = 10))]
    pub date: String,

    #[serde(rename = "prcp")]
    #[sqlx(rename = "prcp")]
    #[validate(range(min = 0.0))]
    pub precipitation: Option<f64>,

    #[serde(rename = "tobs")]
    #[sqlx(rename = "tobs")]
    pub temperature: f64,
}

impl Observation {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        precipitation: Option<f64>,
        temperature: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            precipitation,
            temperature,
        }
    }
}
