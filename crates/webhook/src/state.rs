//! Shared application state for the Axum webhook server.

use std::path::PathBuf;
use std::sync::Arc;

use courier_dispatch::Dispatcher;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub archive_dir: PathBuf,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, archive_dir: PathBuf) -> Self {
        Self {
            dispatcher,
            archive_dir,
        }
    }
}
