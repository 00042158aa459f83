use std::sync::Arc;

use crate::application::services::RewriteService;
use crate::infrastructure::cache::CacheService;

/// Shared state handed to every handler.
///
/// Cheap to clone; the rewrite service is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub rewrite_service: Arc<RewriteService>,
}

impl AppState {
    pub fn new(rewrite_service: Arc<RewriteService>) -> Self {
        Self { rewrite_service }
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        self.rewrite_service.resolver().cache()
    }
}
