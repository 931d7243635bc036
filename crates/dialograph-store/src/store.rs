use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use rusqlite::{params, Connection};
use tracing::debug;
use uuid::Uuid;

use dialograph_core::components::{ComponentConfiguration, ComponentType, ConfigurationDraft};
use dialograph_core::conversation::Scenario;
use dialograph_core::error::{DialographError, Result};
use dialograph_core::traits::{
    ConfigurationPage, DesignStore, ScenarioSummary, CONFIGURATIONS_PER_PAGE,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scenarios (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        document TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS component_configurations (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        scenario_id TEXT NOT NULL,
        component_id TEXT NOT NULL,
        configuration TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_configurations_scenario
        ON component_configurations(scenario_id);";

/// SQLite-backed design store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DialographError::Database(format!("Failed to create db directory: {}", e))
            })?;
        }

        let conn =
            Connection::open(path).map_err(|e| DialographError::Database(e.to_string()))?;

        // WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| DialographError::Database(e.to_string()))?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| DialographError::Database(e.to_string()))?;

        debug!(path = %path.display(), "SQLite store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DialographError::Database(e.to_string()))?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| DialographError::Database(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_configuration(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComponentConfiguration> {
    let configuration_str: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(ComponentConfiguration {
        id: row.get(0)?,
        name: row.get(1)?,
        scenario_id: row.get(2)?,
        component_id: row.get(3)?,
        configuration: serde_json::from_str(&configuration_str).unwrap_or_default(),
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

impl DesignStore for SqliteStore {
    fn save_scenario(&self, scenario: &Scenario) -> BoxFuture<'_, Result<()>> {
        let scenario = scenario.clone();

        Box::pin(async move {
            if scenario.id.is_empty() {
                return Err(DialographError::MalformedObject {
                    kind: "scenario",
                    field: "id",
                });
            }

            let document = serde_json::to_string(&scenario)?;
            let now = Utc::now().to_rfc3339();

            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            conn.execute(
                "INSERT INTO scenarios (id, name, document, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     document = excluded.document,
                     updated_at = excluded.updated_at",
                params![scenario.id, scenario.name, document, now],
            )
            .map_err(|e| DialographError::Database(e.to_string()))?;

            Ok(())
        })
    }

    fn load_scenario(&self, id: &str) -> BoxFuture<'_, Result<Scenario>> {
        let id = id.to_string();

        Box::pin(async move {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let document: String = conn
                .query_row(
                    "SELECT document FROM scenarios WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => {
                        DialographError::ScenarioNotFound(id.clone())
                    }
                    other => DialographError::Database(other.to_string()),
                })?;

            Ok(serde_json::from_str(&document)?)
        })
    }

    fn list_scenarios(&self) -> BoxFuture<'_, Result<Vec<ScenarioSummary>>> {
        Box::pin(async move {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, name, updated_at FROM scenarios
                     ORDER BY updated_at DESC, id ASC",
                )
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| {
                    let updated_at: String = row.get(2)?;
                    Ok(ScenarioSummary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        updated_at: parse_timestamp(&updated_at),
                    })
                })
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let mut summaries = Vec::new();
            for row in rows {
                summaries.push(row.map_err(|e| DialographError::Database(e.to_string()))?);
            }

            Ok(summaries)
        })
    }

    fn delete_scenario(&self, id: &str) -> BoxFuture<'_, Result<()>> {
        let id = id.to_string();

        Box::pin(async move {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let affected = conn
                .execute("DELETE FROM scenarios WHERE id = ?1", params![id])
                .map_err(|e| DialographError::Database(e.to_string()))?;

            if affected == 0 {
                return Err(DialographError::ScenarioNotFound(id));
            }
            Ok(())
        })
    }

    fn create_configuration(
        &self,
        draft: ConfigurationDraft,
    ) -> BoxFuture<'_, Result<ComponentConfiguration>> {
        Box::pin(async move {
            draft.validate()?;

            let now = Utc::now();
            let record = ComponentConfiguration {
                id: Uuid::new_v4().to_string(),
                name: draft.name,
                scenario_id: draft.scenario_id,
                component_id: draft.component_id,
                configuration: draft.configuration,
                created_at: now,
                updated_at: now,
            };

            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            conn.execute(
                "INSERT INTO component_configurations
                     (id, name, scenario_id, component_id, configuration, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![
                    record.id,
                    record.name,
                    record.scenario_id,
                    record.component_id,
                    serde_json::to_string(&record.configuration)?,
                    now.to_rfc3339(),
                ],
            )
            .map_err(|e| DialographError::Database(e.to_string()))?;

            Ok(record)
        })
    }

    fn get_configuration(&self, id: &str) -> BoxFuture<'_, Result<ComponentConfiguration>> {
        let id = id.to_string();

        Box::pin(async move {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            conn.query_row(
                "SELECT id, name, scenario_id, component_id, configuration, created_at, updated_at
                 FROM component_configurations WHERE id = ?1",
                params![id],
                row_to_configuration,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DialographError::ConfigurationNotFound(id.clone())
                }
                other => DialographError::Database(other.to_string()),
            })
        })
    }

    fn list_configurations(
        &self,
        scenario_id: Option<&str>,
        component_type: Option<ComponentType>,
        page: usize,
    ) -> BoxFuture<'_, Result<ConfigurationPage>> {
        let scenario_id = scenario_id.map(str::to_string);

        Box::pin(async move {
            let page = page.max(1);

            let mut clauses: Vec<String> = Vec::new();
            let mut args: Vec<String> = Vec::new();

            if let Some(scenario_id) = scenario_id {
                args.push(scenario_id);
                clauses.push(format!("scenario_id = ?{}", args.len()));
            }
            if let Some(component_type) = component_type {
                args.push(format!("{}.%", component_type.as_str()));
                clauses.push(format!("component_id LIKE ?{}", args.len()));
            }

            let where_sql = if clauses.is_empty() {
                String::new()
            } else {
                format!(" WHERE {}", clauses.join(" AND "))
            };

            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let total: usize = conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM component_configurations{}", where_sql),
                    rusqlite::params_from_iter(args.iter()),
                    |row| row.get::<_, i64>(0),
                )
                .map_err(|e| DialographError::Database(e.to_string()))?
                as usize;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT id, name, scenario_id, component_id, configuration, created_at, updated_at
                     FROM component_configurations{}
                     ORDER BY created_at ASC, id ASC
                     LIMIT {} OFFSET {}",
                    where_sql,
                    CONFIGURATIONS_PER_PAGE,
                    (page - 1) * CONFIGURATIONS_PER_PAGE,
                ))
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), row_to_configuration)
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let mut configurations = Vec::new();
            for row in rows {
                configurations.push(row.map_err(|e| DialographError::Database(e.to_string()))?);
            }

            Ok(ConfigurationPage {
                configurations,
                total,
                page,
            })
        })
    }

    fn update_configuration(
        &self,
        id: &str,
        draft: ConfigurationDraft,
    ) -> BoxFuture<'_, Result<()>> {
        let id = id.to_string();

        Box::pin(async move {
            draft.validate()?;

            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let affected = conn
                .execute(
                    "UPDATE component_configurations SET
                         name = ?2,
                         scenario_id = ?3,
                         component_id = ?4,
                         configuration = ?5,
                         updated_at = ?6
                     WHERE id = ?1",
                    params![
                        id,
                        draft.name,
                        draft.scenario_id,
                        draft.component_id,
                        serde_json::to_string(&draft.configuration)?,
                        Utc::now().to_rfc3339(),
                    ],
                )
                .map_err(|e| DialographError::Database(e.to_string()))?;

            if affected == 0 {
                return Err(DialographError::ConfigurationNotFound(id));
            }
            Ok(())
        })
    }

    fn delete_configuration(&self, id: &str) -> BoxFuture<'_, Result<()>> {
        let id = id.to_string();

        Box::pin(async move {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DialographError::Database(e.to_string()))?;

            let affected = conn
                .execute(
                    "DELETE FROM component_configurations WHERE id = ?1",
                    params![id],
                )
                .map_err(|e| DialographError::Database(e.to_string()))?;

            if affected == 0 {
                return Err(DialographError::ConfigurationNotFound(id));
            }
            Ok(())
        })
    }
}
