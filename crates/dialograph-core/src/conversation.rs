use serde::{Deserialize, Serialize};

/// How a simulated run treated an entity in the design hierarchy.
///
/// Statuses are attached by the simulation pass before a hierarchy reaches
/// the graph renderer; this crate never computes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotConsidered,
    Considered,
    Selected,
    NotSelected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConsidered => "not_considered",
            Self::Considered => "considered",
            Self::Selected => "selected",
            Self::NotSelected => "not_selected",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of an intent within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Root of a conversation design: a scenario owns conversations, which own
/// scenes, which own turns, which own request and response intents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub starting: bool,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub starting: bool,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub starting: bool,
    #[serde(default)]
    pub request_intents: Vec<Intent>,
    #[serde(default)]
    pub response_intents: Vec<Intent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
    /// Speaker override; when unset the owning direction is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_utterance: Option<String>,
    #[serde(default)]
    pub starting: bool,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: None,
            conversations: vec![],
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_conversations(mut self, conversations: Vec<Conversation>) -> Self {
        self.conversations = conversations;
        self
    }
}

impl Conversation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            starting: false,
            scenes: vec![],
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_scenes(mut self, scenes: Vec<Scene>) -> Self {
        self.scenes = scenes;
        self
    }
}

impl Scene {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            starting: false,
            turns: vec![],
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_turns(mut self, turns: Vec<Turn>) -> Self {
        self.turns = turns;
        self
    }
}

impl Turn {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            starting: false,
            request_intents: vec![],
            response_intents: vec![],
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_request_intents(mut self, intents: Vec<Intent>) -> Self {
        self.request_intents = intents;
        self
    }

    pub fn with_response_intents(mut self, intents: Vec<Intent>) -> Self {
        self.response_intents = intents;
        self
    }

    /// The intents of one direction, in collection order.
    pub fn intents(&self, direction: Direction) -> &[Intent] {
        match direction {
            Direction::Request => &self.request_intents,
            Direction::Response => &self.response_intents,
        }
    }
}

impl Intent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            speaker: None,
            sample_utterance: None,
            starting: false,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn with_starting(mut self, starting: bool) -> Self {
        self.starting = starting;
        self
    }
}

/// Caller-selected position within a scenario for a simulation request.
///
/// Unset fields mean the run has not reached that level yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationalState {
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub conversation: Option<String>,
    #[serde(default)]
    pub scene: Option<String>,
    #[serde(default)]
    pub turn: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub turn_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&Status::NotConsidered).unwrap(),
            "\"not_considered\""
        );
        assert_eq!(
            serde_json::to_string(&Status::NotSelected).unwrap(),
            "\"not_selected\""
        );
        let parsed: Status = serde_json::from_str("\"selected\"").unwrap();
        assert_eq!(parsed, Status::Selected);
    }

    #[test]
    fn test_scenario_document_roundtrip() {
        let scenario = Scenario::new("0x100", "Order pizza").with_conversations(vec![
            Conversation::new("0x101", "Welcome")
                .with_status(Status::Selected)
                .with_scenes(vec![Scene::new("0x102", "Opening").with_turns(vec![
                    Turn::new("0x103", "Greeting").with_request_intents(vec![
                        Intent::new("0x104", "intent.app.hello").with_speaker("user"),
                    ]),
                ])]),
        ]);

        let json = serde_json::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, "0x100");
        assert_eq!(parsed.conversations.len(), 1);
        assert_eq!(parsed.conversations[0].status, Some(Status::Selected));
        let turn = &parsed.conversations[0].scenes[0].turns[0];
        assert_eq!(turn.request_intents[0].speaker.as_deref(), Some("user"));
        assert!(turn.response_intents.is_empty());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let parsed: Scenario =
            serde_json::from_str(r#"{"id": "0x1", "name": "Bare"}"#).unwrap();
        assert!(parsed.conversations.is_empty());
        assert!(parsed.status.is_none());
    }

    #[test]
    fn test_turn_intents_by_direction() {
        let turn = Turn::new("t", "Turn")
            .with_request_intents(vec![Intent::new("i1", "one")])
            .with_response_intents(vec![
                Intent::new("i2", "two"),
                Intent::new("i3", "three"),
            ]);

        assert_eq!(turn.intents(Direction::Request).len(), 1);
        assert_eq!(turn.intents(Direction::Response).len(), 2);
    }
}
