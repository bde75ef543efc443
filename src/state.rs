use std::sync::Arc;

use crate::database::ShowStore;

/// Dependencies injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShowStore>,
    pub write_token: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn ShowStore>, write_token: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            write_token: write_token.into(),
        }
    }
}
