use std::sync::Arc;

use crate::api::cache::ResponseCache;
use crate::engine::AnalyticsEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
    pub cache: Arc<ResponseCache>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(engine: AnalyticsEngine, cache: ResponseCache) -> Self {
        Self {
            engine: Arc::new(engine),
            cache: Arc::new(cache),
            cors_origin: "*".to_string(),
        }
    }
}
