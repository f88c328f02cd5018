pub mod aggregate;
pub mod observation;

pub use aggregate::{AggregateRow, DatasetSummary, PrecipitationByDate, TemperatureObservation};
pub use observation::Observation;
