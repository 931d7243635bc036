use serde::Serialize;

use dialograph_core::conversation::{
    Conversation, Direction, Intent, Scenario, Scene, Status, Turn,
};
use dialograph_core::error::{DialographError, Result};

/// Kind tag for a rendered node. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    Scenario,
    Conversation,
    Scene,
    Turn,
    IntentGroup,
    Intent,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Conversation => "conversation",
            Self::Scene => "scene",
            Self::Turn => "turn",
            Self::IntentGroup => "intent-group",
            Self::Intent => "intent",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A renderable node in the conversation graph.
///
/// Declaration order matches the wire format. `parent_id` drives edge
/// generation and never appears on the serialized node; `group_id` reaches
/// the renderer as `parent` so grouped nodes nest visually without an edge.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    pub id: String,
    pub status: Option<Status>,
    pub starting_state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(rename = "parent", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_draw: Option<bool>,
    #[serde(skip)]
    pub parent_id: Option<String>,
}

impl GraphNode {
    fn new(
        node_type: NodeType,
        label: impl Into<String>,
        id: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        Self {
            node_type,
            label: label.into(),
            id: id.into(),
            status: None,
            starting_state: false,
            speaker: None,
            group_id: None,
            should_draw: None,
            parent_id: parent_id.map(str::to_string),
        }
    }

    /// A node whose selection status has not been computed upstream.
    pub fn not_considered(
        node_type: NodeType,
        label: impl Into<String>,
        id: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        let mut node = Self::new(node_type, label, id, parent_id);
        node.status = Some(Status::NotConsidered);
        node
    }

    /// A structural node that clusters others under `group_id` without a
    /// hierarchy edge of its own.
    pub fn grouped(
        node_type: NodeType,
        label: impl Into<String>,
        id: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(node_type, label, id, None);
        node.group_id = Some(group_id.into());
        node
    }

    /// Set the rendering hint. Renderers treat an unset hint as "draw".
    pub fn with_should_draw(mut self, should_draw: bool) -> Self {
        self.should_draw = Some(should_draw);
        self
    }

    pub fn scenario(scenario: &Scenario) -> Result<Self> {
        Self::from_object(
            NodeType::Scenario,
            "scenario",
            &scenario.name,
            &scenario.id,
            scenario.status,
            false,
            None,
        )
    }

    pub fn conversation(conversation: &Conversation, parent_id: &str) -> Result<Self> {
        Self::from_object(
            NodeType::Conversation,
            "conversation",
            &conversation.name,
            &conversation.id,
            conversation.status,
            conversation.starting,
            Some(parent_id),
        )
    }

    pub fn scene(scene: &Scene, parent_id: &str) -> Result<Self> {
        Self::from_object(
            NodeType::Scene,
            "scene",
            &scene.name,
            &scene.id,
            scene.status,
            scene.starting,
            Some(parent_id),
        )
    }

    pub fn turn(turn: &Turn, parent_id: &str) -> Result<Self> {
        Self::from_object(
            NodeType::Turn,
            "turn",
            &turn.name,
            &turn.id,
            turn.status,
            turn.starting,
            Some(parent_id),
        )
    }

    /// The visual bucket for one direction of a turn. Emitted even when the
    /// direction has no intents, and never connected by an edge.
    pub fn intent_group(turn: &Turn, direction: Direction) -> Result<Self> {
        require("turn", "id", &turn.id)?;

        let label = match direction {
            Direction::Request => "Request Intents",
            Direction::Response => "Response Intents",
        };

        Ok(Self::grouped(
            NodeType::IntentGroup,
            label,
            format!("{}-{}", turn.id, direction),
            turn.id.as_str(),
        ))
    }

    pub fn intent(intent: &Intent, turn: &Turn, direction: Direction) -> Result<Self> {
        require("turn", "id", &turn.id)?;

        let mut node = Self::from_object(
            NodeType::Intent,
            "intent",
            &intent.name,
            &intent.id,
            intent.status,
            intent.starting,
            Some(&turn.id),
        )?;

        // The intent's own speaker wins over the owning direction.
        node.speaker = match intent.speaker.as_deref() {
            Some(speaker) if !speaker.is_empty() => Some(speaker.to_string()),
            _ => Some(direction.to_string()),
        };

        Ok(node)
    }

    fn from_object(
        node_type: NodeType,
        kind: &'static str,
        name: &str,
        id: &str,
        status: Option<Status>,
        starting: bool,
        parent_id: Option<&str>,
    ) -> Result<Self> {
        require(kind, "id", id)?;
        require(kind, "name", name)?;

        let mut node = Self::not_considered(node_type, name, id, parent_id);
        if let Some(status) = status {
            node.status = Some(status);
        }
        node.starting_state = starting;
        Ok(node)
    }
}

fn require(kind: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DialographError::MalformedObject { kind, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_node_defaults_to_not_considered() {
        let node = GraphNode::scenario(&Scenario::new("0x1", "Pizza")).unwrap();
        assert_eq!(node.node_type, NodeType::Scenario);
        assert_eq!(node.id, "0x1");
        assert_eq!(node.label, "Pizza");
        assert_eq!(node.status, Some(Status::NotConsidered));
        assert!(node.parent_id.is_none());
    }

    #[test]
    fn test_annotated_status_overrides_default() {
        let conversation = Conversation::new("0x2", "Welcome").with_status(Status::Selected);
        let node = GraphNode::conversation(&conversation, "0x1").unwrap();
        assert_eq!(node.status, Some(Status::Selected));
        assert_eq!(node.parent_id.as_deref(), Some("0x1"));
    }

    #[test]
    fn test_missing_id_fails_fast() {
        let err = GraphNode::scenario(&Scenario::new("", "Nameless id")).unwrap_err();
        assert!(matches!(
            err,
            DialographError::MalformedObject { kind: "scenario", field: "id" }
        ));

        let err = GraphNode::turn(&Turn::new("0x3", ""), "0x2").unwrap_err();
        assert!(matches!(
            err,
            DialographError::MalformedObject { kind: "turn", field: "name" }
        ));
    }

    #[test]
    fn test_intent_speaker_falls_back_to_direction() {
        let turn = Turn::new("0x10", "Greeting");

        let bare = Intent::new("0x11", "intent.app.hello");
        let node = GraphNode::intent(&bare, &turn, Direction::Request).unwrap();
        assert_eq!(node.speaker.as_deref(), Some("request"));

        let voiced = Intent::new("0x12", "intent.app.reply").with_speaker("bot");
        let node = GraphNode::intent(&voiced, &turn, Direction::Response).unwrap();
        assert_eq!(node.speaker.as_deref(), Some("bot"));

        // Empty speaker strings count as absent.
        let blank = Intent::new("0x13", "intent.app.other").with_speaker("");
        let node = GraphNode::intent(&blank, &turn, Direction::Response).unwrap();
        assert_eq!(node.speaker.as_deref(), Some("response"));
    }

    #[test]
    fn test_intent_group_shape() {
        let turn = Turn::new("0x10", "Greeting");
        let group = GraphNode::intent_group(&turn, Direction::Request).unwrap();

        assert_eq!(group.node_type, NodeType::IntentGroup);
        assert_eq!(group.id, "0x10-request");
        assert_eq!(group.label, "Request Intents");
        assert_eq!(group.group_id.as_deref(), Some("0x10"));
        assert!(group.parent_id.is_none());
        assert!(group.status.is_none());
    }

    #[test]
    fn test_starting_state_carries_over() {
        let intent = Intent::new("0x11", "intent.app.hello").with_starting(true);
        let node =
            GraphNode::intent(&intent, &Turn::new("0x10", "Greeting"), Direction::Request)
                .unwrap();
        assert!(node.starting_state);
    }

    #[test]
    fn test_serialized_field_presence() {
        let scenario = GraphNode::scenario(&Scenario::new("0x1", "Pizza")).unwrap();
        let data = serde_json::to_value(&scenario).unwrap();

        assert_eq!(data["type"], "scenario");
        assert_eq!(data["status"], "not_considered");
        assert_eq!(data["starting_state"], false);
        // Optional fields stay out of the record entirely.
        assert!(data.get("speaker").is_none());
        assert!(data.get("parent").is_none());
        assert!(data.get("should_draw").is_none());
        // The hierarchy link is edge-only, never on the node.
        assert!(data.get("parent_id").is_none());

        let group = GraphNode::intent_group(&Turn::new("0x10", "Greeting"), Direction::Response)
            .unwrap();
        let data = serde_json::to_value(&group).unwrap();
        assert_eq!(data["type"], "intent-group");
        assert_eq!(data["parent"], "0x10");
        assert_eq!(data["status"], serde_json::Value::Null);

        let hidden = scenario.with_should_draw(false);
        let data = serde_json::to_value(&hidden).unwrap();
        assert_eq!(data["should_draw"], false);
    }
}
