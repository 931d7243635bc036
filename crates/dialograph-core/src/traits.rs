use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;

use crate::components::{ComponentConfiguration, ComponentType, ConfigurationDraft};
use crate::conversation::{ConversationalState, Scenario};
use crate::error::Result;

/// Page size for component configuration listings.
pub const CONFIGURATIONS_PER_PAGE: usize = 50;

/// One page of component configurations.
#[derive(Debug, Clone)]
pub struct ConfigurationPage {
    pub configurations: Vec<ComponentConfiguration>,
    pub total: usize,
    pub page: usize,
}

/// Summary row for scenario listings.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Persistence backend for scenario documents and component configurations.
pub trait DesignStore: Send + Sync + 'static {
    /// Insert or replace a scenario document.
    fn save_scenario(&self, scenario: &Scenario) -> BoxFuture<'_, Result<()>>;

    /// Load a full scenario document by id.
    fn load_scenario(&self, id: &str) -> BoxFuture<'_, Result<Scenario>>;

    /// List stored scenarios, newest first.
    fn list_scenarios(&self) -> BoxFuture<'_, Result<Vec<ScenarioSummary>>>;

    /// Delete a scenario document by id.
    fn delete_scenario(&self, id: &str) -> BoxFuture<'_, Result<()>>;

    /// Create a component configuration from a validated draft.
    fn create_configuration(
        &self,
        draft: ConfigurationDraft,
    ) -> BoxFuture<'_, Result<ComponentConfiguration>>;

    /// Load a component configuration by id.
    fn get_configuration(&self, id: &str) -> BoxFuture<'_, Result<ComponentConfiguration>>;

    /// List configurations, optionally filtered by scenario and component
    /// type. Pages are 1-based and hold [`CONFIGURATIONS_PER_PAGE`] rows.
    fn list_configurations(
        &self,
        scenario_id: Option<&str>,
        component_type: Option<ComponentType>,
        page: usize,
    ) -> BoxFuture<'_, Result<ConfigurationPage>>;

    /// Replace a configuration's fields with a validated draft.
    fn update_configuration(
        &self,
        id: &str,
        draft: ConfigurationDraft,
    ) -> BoxFuture<'_, Result<()>>;

    /// Delete a configuration by id.
    fn delete_configuration(&self, id: &str) -> BoxFuture<'_, Result<()>>;
}

/// Annotates a scenario hierarchy with traversal statuses for a simulated
/// run.
///
/// The simulation engine lives outside this service. Implementations receive
/// the loaded scenario plus the caller-selected conversational state and
/// return the scenario with statuses attached; the graph renderer consumes
/// whatever they decide.
pub trait ConversationSimulator: Send + Sync + 'static {
    fn simulate(
        &self,
        scenario: Scenario,
        state: &ConversationalState,
    ) -> BoxFuture<'_, Result<Scenario>>;
}
