use std::sync::Arc;

use dialograph_core::config::AppConfig;
use dialograph_core::traits::{ConversationSimulator, DesignStore};

/// Shared application state for axum handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DesignStore>,
    pub simulator: Arc<dyn ConversationSimulator>,
}
