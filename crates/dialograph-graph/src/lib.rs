pub mod edge;
pub mod node;
pub mod walker;

pub use edge::{resolve_status, GraphEdge};
pub use node::{GraphNode, NodeType};
pub use walker::flatten_scenario;

use std::collections::HashMap;

use dialograph_core::conversation::Scenario;
use dialograph_core::error::{DialographError, Result};

/// A rendered conversation graph: the ordered node list plus the edges
/// derived from each node's parent link.
///
/// Built fresh per render request from an already-annotated scenario; the
/// input hierarchy is never mutated.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Render a scenario into nodes and edges.
    ///
    /// `node_limit` aborts oversized hierarchies with an error instead of
    /// truncating to a misleading partial graph.
    pub fn build(scenario: &Scenario, node_limit: Option<usize>) -> Result<Self> {
        let nodes = walker::flatten_scenario(scenario)?;

        if let Some(limit) = node_limit {
            if nodes.len() > limit {
                return Err(DialographError::GraphTooLarge {
                    count: nodes.len(),
                    limit,
                });
            }
        }

        let mut by_id: HashMap<&str, &GraphNode> = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            if by_id.insert(node.id.as_str(), node).is_some() {
                return Err(DialographError::DuplicateNode(node.id.clone()));
            }
        }

        let mut edges = Vec::new();
        for node in &nodes {
            let Some(parent_id) = node.parent_id.as_deref() else {
                continue;
            };
            let parent = by_id
                .get(parent_id)
                .ok_or_else(|| DialographError::UnknownParent(parent_id.to_string()))?;
            if let Some(edge) = GraphEdge::between(node, parent) {
                edges.push(edge);
            }
        }

        Ok(Self { nodes, edges })
    }

    /// Serialize into the renderer wire format:
    /// `{"elements": {"nodes": [{"data": ...}], "edges": [{"data": ...}]}}`.
    pub fn to_response(&self) -> serde_json::Value {
        let nodes: Vec<serde_json::Value> = self
            .nodes
            .iter()
            .map(|node| serde_json::json!({ "data": node }))
            .collect();
        let edges: Vec<serde_json::Value> = self
            .edges
            .iter()
            .map(|edge| serde_json::json!({ "data": edge }))
            .collect();

        serde_json::json!({ "elements": { "nodes": nodes, "edges": edges } })
    }
}
