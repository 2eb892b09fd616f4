//! Shared application state.

use std::sync::Arc;

use triage_core::{QueryService, Store};

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    queries: Arc<QueryService<Arc<dyn Store>>>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        let store: Arc<dyn Store> = Arc::new(store);
        Self {
            queries: Arc::new(QueryService::new(store)),
        }
    }

    pub fn queries(&self) -> &QueryService<Arc<dyn Store>> {
        &self.queries
    }
}
