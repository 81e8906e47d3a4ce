use std::sync::Arc;

use db::Db;

use crate::config::Configuration;

mod coerce;
pub mod config;
pub mod error;
pub mod routes;

/// Central application state that is shared across all parts of the API.
#[derive(Clone)]
pub struct AppState {
    /// The config data.
    pub config: Arc<Configuration>,

    /// Handle to the data-access layer.
    pub db: Db,
}
