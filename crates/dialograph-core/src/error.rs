use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialographError {
    // Graph errors
    #[error("{kind} is missing required field `{field}`")]
    MalformedObject {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Duplicate node id in graph: {0}")]
    DuplicateNode(String),

    #[error("Edge references unknown parent node: {0}")]
    UnknownParent(String),

    #[error("Graph exceeds node limit ({limit}): {count} nodes")]
    GraphTooLarge { count: usize, limit: usize },

    // Component errors
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Invalid component configuration: {0}")]
    InvalidConfiguration(String),

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Component configuration not found: {0}")]
    ConfigurationNotFound(String),

    // Simulation errors
    #[error("Simulation failed: {0}")]
    Simulation(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DialographError>;
