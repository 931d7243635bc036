use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use dialograph_core::components::{ComponentType, ConfigurationDraft};
use dialograph_core::conversation::{ConversationalState, Scenario};
use dialograph_core::error::DialographError;
use dialograph_graph::Graph;

use crate::middleware::Authenticated;
use crate::resources::configuration_resource;
use crate::state::AppState;

/// Map service errors onto HTTP status codes.
fn error_status(err: &DialographError) -> StatusCode {
    match err {
        DialographError::MalformedObject { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DialographError::GraphTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        DialographError::UnknownComponentType(_) | DialographError::InvalidConfiguration(_) => {
            StatusCode::BAD_REQUEST
        }
        DialographError::ScenarioNotFound(_) | DialographError::ConfigurationNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// GET /api/health — no auth required
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Scenarios ───────────────────────────────────────────────────

// GET /api/scenarios
pub async fn list_scenarios(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let summaries = state
        .store
        .list_scenarios()
        .await
        .map_err(|e| error_status(&e))?;

    Ok(Json(serde_json::json!({ "scenarios": summaries })))
}

// POST /api/scenarios — insert or replace a full document
pub async fn save_scenario(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Json(scenario): Json<Scenario>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    state
        .store
        .save_scenario(&scenario)
        .await
        .map_err(|e| error_status(&e))?;

    info!(scenario_id = %scenario.id, "Scenario saved");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": scenario.id })),
    ))
}

// GET /api/scenarios/{id}
pub async fn get_scenario(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Scenario>, StatusCode> {
    let scenario = state
        .store
        .load_scenario(&id)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(Json(scenario))
}

// DELETE /api/scenarios/{id}
pub async fn delete_scenario(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state
        .store
        .delete_scenario(&id)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

// ── Simulation ──────────────────────────────────────────────────

// POST /api/simulate — render the considered/selected graph for a run
pub async fn simulate(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConversationalState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let scenario_id = body.scenario.as_deref().ok_or(StatusCode::BAD_REQUEST)?;

    let scenario = state
        .store
        .load_scenario(scenario_id)
        .await
        .map_err(|e| error_status(&e))?;

    let annotated = state
        .simulator
        .simulate(scenario, &body)
        .await
        .map_err(|e| error_status(&e))?;

    let graph = Graph::build(&annotated, state.config.graph.node_limit())
        .map_err(|e| error_status(&e))?;

    info!(
        scenario_id = %scenario_id,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Simulation frame rendered"
    );
    Ok(Json(graph.to_response()))
}

// ── Component configurations ────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfigurationListQuery {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default = "default_type", rename = "type")]
    pub component_type: String,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_type() -> String {
    "all".to_string()
}

fn default_page() -> usize {
    1
}

// GET /api/component-configurations?scenario_id=&type=&page=
pub async fn list_configurations(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConfigurationListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let component_type = match query.component_type.as_str() {
        "all" => None,
        name => Some(ComponentType::from_name(name).ok_or(StatusCode::BAD_REQUEST)?),
    };

    let page = state
        .store
        .list_configurations(query.scenario_id.as_deref(), component_type, query.page)
        .await
        .map_err(|e| error_status(&e))?;

    let data: Vec<serde_json::Value> = page
        .configurations
        .into_iter()
        .map(configuration_resource)
        .collect();

    Ok(Json(serde_json::json!({
        "data": data,
        "total": page.total,
        "page": page.page,
    })))
}

// POST /api/component-configurations
pub async fn create_configuration(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ConfigurationDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let record = state
        .store
        .create_configuration(draft)
        .await
        .map_err(|e| error_status(&e))?;

    Ok((StatusCode::CREATED, Json(configuration_resource(record))))
}

// GET /api/component-configurations/{id}
pub async fn get_configuration(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let record = state
        .store
        .get_configuration(&id)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(Json(configuration_resource(record)))
}

// PUT /api/component-configurations/{id}
pub async fn update_configuration(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<ConfigurationDraft>,
) -> Result<StatusCode, StatusCode> {
    state
        .store
        .update_configuration(&id, draft)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/component-configurations/{id}
pub async fn delete_configuration(
    _auth: Authenticated,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state
        .store
        .delete_configuration(&id)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
