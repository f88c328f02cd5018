pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod readers;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

pub use error::{ApiError, Result};
pub use services::QueryService;
pub use storage::ObservationStore;
