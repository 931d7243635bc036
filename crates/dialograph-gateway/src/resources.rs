use dialograph_core::components::{self, ComponentConfiguration};

/// Outgoing representation of a component configuration.
///
/// Hidden fields are stripped from the configuration document here, on the
/// way out; storage always keeps the full document.
pub fn configuration_resource(mut record: ComponentConfiguration) -> serde_json::Value {
    components::redact(&mut record.configuration, components::HIDDEN_FIELDS);
    serde_json::to_value(&record).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_resource_is_redacted() {
        let now = Utc::now();
        let record = ComponentConfiguration {
            id: "cfg-1".to_string(),
            name: "Webhook".to_string(),
            scenario_id: "0x100".to_string(),
            component_id: "action.core.webhook".to_string(),
            configuration: json!({
                "url": "https://example.test/hook",
                "access_token": "secret",
            }),
            created_at: now,
            updated_at: now,
        };

        let resource = configuration_resource(record);

        assert_eq!(resource["name"], "Webhook");
        assert_eq!(resource["configuration"]["url"], "https://example.test/hook");
        assert!(resource["configuration"].get("access_token").is_none());
    }
}
