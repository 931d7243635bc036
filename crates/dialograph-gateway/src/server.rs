use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use dialograph_core::config::AppConfig;
use dialograph_core::traits::{ConversationSimulator, DesignStore};

use crate::routes;
use crate::state::AppState;

/// HTTP gateway server built on axum.
pub struct GatewayServer {
    config: AppConfig,
    store: Arc<dyn DesignStore>,
    simulator: Arc<dyn ConversationSimulator>,
}

impl GatewayServer {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DesignStore>,
        simulator: Arc<dyn ConversationSimulator>,
    ) -> Self {
        Self {
            config,
            store,
            simulator,
        }
    }

    /// Run the gateway server until the cancellation token is triggered.
    pub async fn run(&self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let state = Arc::new(AppState {
            config: self.config.clone(),
            store: self.store.clone(),
            simulator: self.simulator.clone(),
        });

        let app = Router::new()
            .route("/api/health", get(routes::health))
            // Scenarios
            .route(
                "/api/scenarios",
                get(routes::list_scenarios).post(routes::save_scenario),
            )
            .route(
                "/api/scenarios/{id}",
                get(routes::get_scenario).delete(routes::delete_scenario),
            )
            // Simulation frames
            .route("/api/simulate", post(routes::simulate))
            // Component configurations
            .route(
                "/api/component-configurations",
                get(routes::list_configurations).post(routes::create_configuration),
            )
            .route(
                "/api/component-configurations/{id}",
                get(routes::get_configuration)
                    .put(routes::update_configuration)
                    .delete(routes::delete_configuration),
            )
            .layer(CorsLayer::permissive())
            .with_state(state);

        let listener = TcpListener::bind(&self.config.gateway.bind).await?;
        info!(bind = %self.config.gateway.bind, "Gateway listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Gateway shut down");
        Ok(())
    }
}
