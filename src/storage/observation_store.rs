use crate::error::Result;
use crate::models::{AggregateRow, DatasetSummary, Observation};
use crate::utils::constants::IMPORT_BATCH_SIZE;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_MEASUREMENT_TABLE: &str = "CREATE TABLE IF NOT EXISTS measurement (
    id      INTEGER PRIMARY KEY,
    station TEXT    NOT NULL,
    date    TEXT    NOT NULL,
    prcp    REAL,
    tobs    REAL    NOT NULL
)";

const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS measurement_date_idx ON measurement (date)";

const INSERT_OBSERVATION: &str =
    "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)";

const SELECT_MAX_DATE: &str = "SELECT MAX(date) FROM measurement";

// Values are cast so SQLite always hands back REAL, even for databases
// where tobs was stored with integer affinity.
const SELECT_OBSERVATIONS_SINCE: &str = "SELECT station, date,
        CAST(prcp AS REAL) AS prcp,
        CAST(tobs AS REAL) AS tobs
    FROM measurement
    WHERE date >= ?
    ORDER BY id";

const SELECT_STATIONS: &str = "SELECT station FROM measurement GROUP BY station ORDER BY station";

const SELECT_AGGREGATE_FROM: &str = "SELECT date,
        CAST(MIN(tobs) AS REAL) AS min_temperature,
        CAST(AVG(tobs) AS REAL) AS avg_temperature,
        CAST(MAX(tobs) AS REAL) AS max_temperature
    FROM measurement
    WHERE date >= ?
    GROUP BY date
    ORDER BY date";

const SELECT_AGGREGATE_RANGE: &str = "SELECT date,
        CAST(MIN(tobs) AS REAL) AS min_temperature,
        CAST(AVG(tobs) AS REAL) AS avg_temperature,
        CAST(MAX(tobs) AS REAL) AS max_temperature
    FROM measurement
    WHERE date >= ? AND date <= ?
    GROUP BY date
    ORDER BY date";

const SELECT_SUMMARY: &str = "SELECT COUNT(*) AS observations,
        COUNT(DISTINCT station) AS stations,
        MIN(date) AS first_date,
        MAX(date) AS last_date
    FROM measurement";

/// Typed access to the `measurement` table.
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct ObservationStore {
    pool: SqlitePool,
}

impl ObservationStore {
    /// Open an existing database for serving. The file must already exist
    /// and is opened read-only.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to {} (read-only)", database_url);
        Ok(Self { pool })
    }

    /// Open (or create) a database for import and make sure the schema exists.
    pub async fn connect_writable(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        info!("Connected to {} (writable)", database_url);
        Ok(store)
    }

    /// Single-connection in-memory database with the schema in place.
    pub async fn in_memory() -> Result<Self> {
        // The database lives only as long as its one connection, so the pool
        // must never recycle it.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    /// Close every pooled connection, waiting for them to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(CREATE_MEASUREMENT_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_DATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert observations in batched transactions, returning the row count.
    pub async fn insert_observations(&self, observations: &[Observation]) -> Result<u64> {
        let mut inserted = 0u64;

        for chunk in observations.chunks(IMPORT_BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            for obs in chunk {
                sqlx::query(INSERT_OBSERVATION)
                    .bind(&obs.station)
                    .bind(&obs.date)
                    .bind(obs.precipitation)
                    .bind(obs.temperature)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;

            inserted += chunk.len() as u64;
            debug!("Inserted {} of {} observations", inserted, observations.len());
        }

        Ok(inserted)
    }

    /// Latest date in the table, or `None` when it is empty.
    pub async fn max_date(&self) -> Result<Option<String>> {
        let max_date = sqlx::query_scalar::<_, Option<String>>(SELECT_MAX_DATE)
            .fetch_one(&self.pool)
            .await?;
        Ok(max_date)
    }

    /// All rows dated on or after `cutoff`, in storage order.
    pub async fn observations_since(&self, cutoff: &str) -> Result<Vec<Observation>> {
        let rows = sqlx::query_as::<_, Observation>(SELECT_OBSERVATIONS_SINCE)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;
        debug!("{} observations on or after {}", rows.len(), cutoff);
        Ok(rows)
    }

    pub async fn distinct_stations(&self) -> Result<Vec<String>> {
        let stations = sqlx::query_scalar::<_, String>(SELECT_STATIONS)
            .fetch_all(&self.pool)
            .await?;
        Ok(stations)
    }

    /// Min/avg/max temperature per date from `start`, optionally capped at `end`.
    pub async fn aggregate_by_date(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Vec<AggregateRow>> {
        let query = match end {
            Some(end) => sqlx::query_as::<_, AggregateRow>(SELECT_AGGREGATE_RANGE)
                .bind(start)
                .bind(end),
            None => sqlx::query_as::<_, AggregateRow>(SELECT_AGGREGATE_FROM).bind(start),
        };

        let rows = query.fetch_all(&self.pool).await?;
        debug!(
            "Aggregated {} dates from {} to {}",
            rows.len(),
            start,
            end.unwrap_or("latest")
        );
        Ok(rows)
    }

    pub async fn summary(&self) -> Result<DatasetSummary> {
        let summary = sqlx::query_as::<_, DatasetSummary>(SELECT_SUMMARY)
            .fetch_one(&self.pool)
            .await?;
        Ok(summary)
    }
}
