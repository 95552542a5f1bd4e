use std::sync::Arc;

use charasphere_ai::chat::TextGenerator;
use charasphere_ai::content::ContentService;
use charasphere_ai::image::ImageGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and the vendor ports are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: charasphere_db::DbPool,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Bio and dialog generation with canned fallbacks.
    pub content: ContentService,
    /// Artwork generation. Failures surface to the caller.
    pub images: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(
        pool: charasphere_db::DbPool,
        config: ServerConfig,
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            content: ContentService::new(text),
            images,
        }
    }
}
