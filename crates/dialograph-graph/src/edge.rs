use serde::Serialize;

use dialograph_core::conversation::Status;

use crate::node::GraphNode;

/// A directed connection from a node's hierarchical parent to the node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub status: Status,
    pub parent: String,
}

impl GraphEdge {
    /// Build the edge leading into `child`. Returns `None` for nodes without
    /// a hierarchical parent (the root and grouping nodes).
    pub fn between(child: &GraphNode, parent: &GraphNode) -> Option<Self> {
        let parent_id = child.parent_id.as_deref()?;

        Some(Self {
            id: format!("{}-{}", parent_id, child.id),
            source: parent_id.to_string(),
            target: child.id.clone(),
            status: resolve_status(child.status, parent.status),
            parent: parent_id.to_string(),
        })
    }
}

/// Resolve an edge status from the statuses of its two ends.
///
/// A terminally negative child paints its incoming edge regardless of the
/// parent. Otherwise a status shared by both ends is kept, and any
/// disagreement, including an unset status on either end, falls back to
/// `considered`.
pub fn resolve_status(child: Option<Status>, parent: Option<Status>) -> Status {
    if let Some(status) = child {
        if matches!(status, Status::NotSelected | Status::NotConsidered) {
            return status;
        }
    }

    match (child, parent) {
        (Some(child), Some(parent)) if child == parent => child,
        _ => Status::Considered,
    }
}
