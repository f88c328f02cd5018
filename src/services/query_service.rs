use crate::error::{ApiError, Result};
use crate::models::{AggregateRow, DatasetSummary, PrecipitationByDate, TemperatureObservation};
use crate::storage::ObservationStore;
use crate::utils::dates::window_cutoff;
use tracing::{debug, instrument};

/// The canned read-only queries behind the HTTP API.
///
/// Date arguments are opaque strings compared against the stored
/// `YYYY-MM-DD` values. Nothing is validated here: a malformed date simply
/// matches no rows.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: ObservationStore,
}

impl QueryService {
    pub fn new(store: ObservationStore) -> Self {
        Self { store }
    }

    /// Precipitation per date over the trailing window.
    ///
    /// When several stations report the same date the one stored last wins.
    #[instrument(skip(self))]
    pub async fn list_recent_precipitation(&self) -> Result<PrecipitationByDate> {
        let cutoff = self.recent_cutoff().await?;
        let observations = self.store.observations_since(&cutoff).await?;

        let mut by_date = PrecipitationByDate::new();
        for obs in observations {
            by_date.insert(obs.date, obs.precipitation);
        }

        debug!("{} distinct dates since {}", by_date.len(), cutoff);
        Ok(by_date)
    }

    #[instrument(skip(self))]
    pub async fn list_stations(&self) -> Result<Vec<String>> {
        self.store.distinct_stations().await
    }

    /// Every temperature reading in the trailing window, one entry per row.
    #[instrument(skip(self))]
    pub async fn list_recent_temperature_observations(
        &self,
    ) -> Result<Vec<TemperatureObservation>> {
        let cutoff = self.recent_cutoff().await?;
        let observations = self.store.observations_since(&cutoff).await?;

        Ok(observations
            .into_iter()
            .map(|obs| TemperatureObservation {
                date: obs.date,
                temperature: obs.temperature,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn aggregate_from(&self, start: &str) -> Result<Vec<AggregateRow>> {
        self.store.aggregate_by_date(start, None).await
    }

    /// Inclusive on both ends. `start > end` yields no rows.
    #[instrument(skip(self))]
    pub async fn aggregate_range(&self, start: &str, end: &str) -> Result<Vec<AggregateRow>> {
        self.store.aggregate_by_date(start, Some(end)).await
    }

    pub async fn dataset_summary(&self) -> Result<DatasetSummary> {
        self.store.summary().await
    }

    async fn recent_cutoff(&self) -> Result<String> {
        let max_date = self
            .store
            .max_date()
            .await?
            .ok_or_else(|| ApiError::NotFound("no observations in dataset".to_string()))?;
        window_cutoff(&max_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use pretty_assertions::assert_eq;

    async fn service_with(observations: &[Observation]) -> QueryService {
        let store = ObservationStore::in_memory().await.unwrap();
        store.insert_observations(observations).await.unwrap();
        QueryService::new(store)
    }

    fn year_end_fixture() -> Vec<Observation> {
        vec![
            Observation::new("A", "2016-12-31", Some(0.0), 64.0),
            Observation::new("A", "2017-01-01", Some(0.2), 60.0),
            Observation::new("B", "2017-01-01", Some(0.4), 70.0),
            Observation::new("A", "2017-01-02", None, 66.0),
        ]
    }

    #[tokio::test]
    async fn test_empty_dataset_is_not_found() {
        let service = service_with(&[]).await;

        let err = service.list_recent_precipitation().await.unwrap_err();
        assert!(err.is_not_found());

        let err = service.list_recent_temperature_observations().await.unwrap_err();
        assert!(err.is_not_found());

        assert!(service.list_stations().await.unwrap().is_empty());
        assert!(service.aggregate_from("2017-01-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_precipitation_window_excludes_old_rows() {
        let service = service_with(&[
            Observation::new("A", "2016-08-21", Some(9.9), 70.0),
            Observation::new("A", "2016-08-22", Some(0.1), 71.0),
            Observation::new("A", "2017-08-23", Some(0.5), 80.0),
        ])
        .await;

        let precipitation = service.list_recent_precipitation().await.unwrap();
        let dates: Vec<&str> = precipitation.keys().map(String::as_str).collect();
        assert_eq!(dates, vec!["2016-08-22", "2017-08-23"]);
        assert!(precipitation.keys().all(|d| d.as_str() >= "2016-08-22"));
    }

    #[tokio::test]
    async fn test_precipitation_last_write_wins_and_keeps_null() {
        let service = service_with(&[
            Observation::new("A", "2017-01-01", Some(0.2), 60.0),
            Observation::new("B", "2017-01-01", Some(0.4), 70.0),
            Observation::new("A", "2017-01-02", Some(0.3), 66.0),
            Observation::new("B", "2017-01-02", None, 67.0),
        ])
        .await;

        let precipitation = service.list_recent_precipitation().await.unwrap();
        assert_eq!(precipitation.len(), 2);
        assert_eq!(precipitation["2017-01-01"], Some(0.4));
        assert_eq!(precipitation["2017-01-02"], None);
    }

    #[tokio::test]
    async fn test_temperature_observations_are_not_deduplicated() {
        let service = service_with(&year_end_fixture()).await;

        let tobs = service.list_recent_temperature_observations().await.unwrap();
        assert_eq!(tobs.len(), 4);
        assert_eq!(
            tobs.iter().filter(|t| t.date == "2017-01-01").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_temperature_window_drops_old_rows_keeps_duplicates() {
        let service = service_with(&[
            Observation::new("A", "2016-08-21", None, 70.0),
            Observation::new("A", "2016-08-22", None, 71.0),
            Observation::new("A", "2017-08-23", None, 80.0),
            Observation::new("B", "2017-08-23", None, 82.0),
        ])
        .await;

        let tobs = service.list_recent_temperature_observations().await.unwrap();
        assert_eq!(
            tobs,
            vec![
                TemperatureObservation {
                    date: "2016-08-22".to_string(),
                    temperature: 71.0,
                },
                TemperatureObservation {
                    date: "2017-08-23".to_string(),
                    temperature: 80.0,
                },
                TemperatureObservation {
                    date: "2017-08-23".to_string(),
                    temperature: 82.0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_stations_are_distinct() {
        let service = service_with(&year_end_fixture()).await;
        assert_eq!(
            service.list_stations().await.unwrap(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[tokio::test]
    async fn test_aggregate_from_start_date() {
        let service = service_with(&year_end_fixture()).await;

        let rows = service.aggregate_from("2017-01-01").await.unwrap();
        assert_eq!(
            rows,
            vec![
                AggregateRow::new("2017-01-01", 60.0, 65.0, 70.0),
                AggregateRow::new("2017-01-02", 66.0, 66.0, 66.0),
            ]
        );

        // Refiltering on the same start changes nothing
        let refiltered: Vec<AggregateRow> = rows
            .iter()
            .filter(|r| r.date.as_str() >= "2017-01-01")
            .cloned()
            .collect();
        assert_eq!(refiltered, rows);
    }

    #[tokio::test]
    async fn test_aggregate_single_day_range() {
        let service = service_with(&year_end_fixture()).await;

        let rows = service
            .aggregate_range("2017-01-01", "2017-01-01")
            .await
            .unwrap();
        assert_eq!(rows, vec![AggregateRow::new("2017-01-01", 60.0, 65.0, 70.0)]);
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let service = service_with(&year_end_fixture()).await;

        let rows = service
            .aggregate_range("2017-01-02", "2016-12-31")
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_dates_match_nothing() {
        let service = service_with(&year_end_fixture()).await;

        assert!(service.aggregate_from("not-a-date").await.unwrap().is_empty());
        assert!(service
            .aggregate_range("zzzz", "zzzz")
            .await
            .unwrap()
            .is_empty());
    }
}
