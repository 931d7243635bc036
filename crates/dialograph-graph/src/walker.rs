use dialograph_core::conversation::{Direction, Scenario, Scene, Turn};
use dialograph_core::error::Result;

use crate::node::GraphNode;

/// Flatten a scenario hierarchy into an ordered node list.
///
/// Levels are emitted in hierarchy order: the scenario, every conversation,
/// every scene, then each turn followed by its two direction groups and its
/// intents. Collection order is preserved throughout, so repeated calls over
/// the same hierarchy produce identical lists.
pub fn flatten_scenario(scenario: &Scenario) -> Result<Vec<GraphNode>> {
    let mut nodes = vec![GraphNode::scenario(scenario)?];
    nodes.extend(conversation_level(scenario)?);
    Ok(nodes)
}

fn conversation_level(scenario: &Scenario) -> Result<Vec<GraphNode>> {
    let mut nodes = Vec::new();
    let mut scenes: Vec<(&Scene, &str)> = Vec::new();

    for conversation in &scenario.conversations {
        nodes.push(GraphNode::conversation(conversation, &scenario.id)?);
        scenes.extend(
            conversation
                .scenes
                .iter()
                .map(|scene| (scene, conversation.id.as_str())),
        );
    }

    nodes.extend(scene_level(&scenes)?);
    Ok(nodes)
}

fn scene_level(scenes: &[(&Scene, &str)]) -> Result<Vec<GraphNode>> {
    let mut nodes = Vec::new();
    let mut turns: Vec<(&Turn, &str)> = Vec::new();

    for (scene, conversation_id) in scenes {
        nodes.push(GraphNode::scene(scene, conversation_id)?);
        turns.extend(scene.turns.iter().map(|turn| (turn, scene.id.as_str())));
    }

    nodes.extend(turn_level(&turns)?);
    Ok(nodes)
}

fn turn_level(turns: &[(&Turn, &str)]) -> Result<Vec<GraphNode>> {
    let mut nodes = Vec::new();

    for (turn, scene_id) in turns {
        nodes.push(GraphNode::turn(turn, scene_id)?);
        // Both direction buckets exist even when empty, so the renderer can
        // show an empty group.
        nodes.push(GraphNode::intent_group(turn, Direction::Request)?);
        nodes.push(GraphNode::intent_group(turn, Direction::Response)?);

        for direction in [Direction::Request, Direction::Response] {
            for intent in turn.intents(direction) {
                nodes.push(GraphNode::intent(intent, turn, direction)?);
            }
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;
    use dialograph_core::conversation::{Conversation, Intent};

    fn two_branch_scenario() -> Scenario {
        Scenario::new("0x100", "Support").with_conversations(vec![
            Conversation::new("0x110", "Welcome").with_scenes(vec![
                Scene::new("0x111", "Opening").with_turns(vec![
                    Turn::new("0x112", "Greeting")
                        .with_request_intents(vec![
                            Intent::new("0x113", "intent.app.hello"),
                            Intent::new("0x114", "intent.app.help"),
                        ])
                        .with_response_intents(vec![Intent::new("0x115", "intent.app.greet")]),
                ]),
            ]),
            Conversation::new("0x120", "Escalation").with_scenes(vec![
                Scene::new("0x121", "Handover").with_turns(vec![Turn::new("0x122", "Transfer")]),
            ]),
        ])
    }

    #[test]
    fn test_node_count_invariant() {
        let nodes = flatten_scenario(&two_branch_scenario()).unwrap();
        // 1 scenario + 2 conversations + 2 scenes + 2 turns + 2*2 groups
        // + 2 request intents + 1 response intent
        assert_eq!(nodes.len(), 14);
    }

    #[test]
    fn test_levels_are_emitted_in_order() {
        let nodes = flatten_scenario(&two_branch_scenario()).unwrap();
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "0x100",
                "0x110",
                "0x120",
                "0x111",
                "0x121",
                "0x112",
                "0x112-request",
                "0x112-response",
                "0x113",
                "0x114",
                "0x115",
                "0x122",
                "0x122-request",
                "0x122-response",
            ]
        );
    }

    #[test]
    fn test_repeated_walks_are_identical() {
        let scenario = two_branch_scenario();
        let first = flatten_scenario(&scenario).unwrap();
        let second = flatten_scenario(&scenario).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_parent_closure() {
        let nodes = flatten_scenario(&two_branch_scenario()).unwrap();

        let mut seen: Vec<&str> = Vec::new();
        for node in &nodes {
            if let Some(parent_id) = node.parent_id.as_deref() {
                assert!(
                    seen.contains(&parent_id),
                    "parent {parent_id} of {} not emitted earlier",
                    node.id
                );
            } else {
                assert!(
                    node.id == "0x100" || node.node_type == NodeType::IntentGroup,
                    "unexpected unparented node {}",
                    node.id
                );
            }
            seen.push(node.id.as_str());
        }
    }

    #[test]
    fn test_unique_node_ids() {
        let nodes = flatten_scenario(&two_branch_scenario()).unwrap();
        let mut ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), nodes.len());
    }

    #[test]
    fn test_bare_scenario_emits_single_node() {
        let nodes = flatten_scenario(&Scenario::new("0x1", "Empty")).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, NodeType::Scenario);
    }

    #[test]
    fn test_empty_directions_still_emit_groups() {
        let scenario = Scenario::new("0x1", "Sparse").with_conversations(vec![
            Conversation::new("0x2", "Only").with_scenes(vec![
                Scene::new("0x3", "Lone").with_turns(vec![Turn::new("0x4", "Silent")]),
            ]),
        ]);

        let nodes = flatten_scenario(&scenario).unwrap();
        let groups: Vec<&GraphNode> = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::IntentGroup)
            .collect();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "0x4-request");
        assert_eq!(groups[1].id, "0x4-response");
        assert!(nodes.iter().all(|n| n.node_type != NodeType::Intent));
    }

    #[test]
    fn test_malformed_child_aborts_walk() {
        let scenario = Scenario::new("0x1", "Broken")
            .with_conversations(vec![Conversation::new("", "No id")]);
        assert!(flatten_scenario(&scenario).is_err());
    }
}
