/// Route prefix shared by every JSON endpoint
pub const API_PREFIX: &str = "/api/v1.0";

/// Length of the trailing window behind the newest observation, in days
pub const RECENT_WINDOW_DAYS: i64 = 366;

/// Storage date format; fixed width so string order is date order
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Server defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Resources/hawaii.sqlite";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SITE_TITLE: &str = "Climate in Hawaii";

/// Configuration sources
pub const DEFAULT_CONFIG_FILE: &str = "climate-api";
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Rows per insert transaction during import
pub const IMPORT_BATCH_SIZE: usize = 1000;
