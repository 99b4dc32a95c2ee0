//! Unit tests for convai-snapshot
//!
//! Tests for individual components: conditions, settings and error messages.
//!
use convai_snapshot::prelude::*;
use convai_snapshot::settings::DEFAULT_BASE_URL;
use serde_json::json;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod condition_tests {
    use super::*;

    #[test]
    fn test_condition_text_rules() {
        let cases = [
            (json!(null), "(none)"),
            (json!("  spaced  "), "  spaced  "),
            (json!({ "type": "llm", "condition": " wants help " }), "wants help"),
            (json!({ "type": "unconditional", "extra": 1 }), "unconditional"),
            (json!({ "type": "result", "successful": false }), "successful == false"),
            (json!({ "type": "expression", "expression": "a && b" }), "a && b"),
            (json!(true), "true"),
            (json!([]), "[]"),
        ];

        for (value, expected) in cases {
            assert_eq!(Condition::from_value(&value).to_text(), expected, "for {}", value);
        }
    }

    #[test]
    fn test_incomplete_typed_conditions_fall_back_to_json() {
        let llm = json!({ "type": "llm", "condition": "" });
        assert_eq!(
            Condition::from_value(&llm).to_text(),
            "{\n  \"type\": \"llm\",\n  \"condition\": \"\"\n}"
        );

        let result = json!({ "type": "result", "successful": "yes" });
        assert!(Condition::from(&result).to_text().contains("\"successful\": \"yes\""));

        let untyped = json!({ "when": "always" });
        assert!(matches!(Condition::from_value(&untyped), Condition::Other(_)));
    }

    #[test]
    fn test_raw_value_is_preserved() {
        let value = json!({ "type": "llm", "condition": "x" });
        assert_eq!(Condition::from_value(&value).raw(), value);
        assert_eq!(Condition::from_value(&json!(null)).raw(), json!(null));
    }
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn test_first_candidate_wins() {
        let settings = ProviderSettings::from_vars(vars(&[
            ("VITE_ELEVENLABS_AGENT_ID", "agent_vite"),
            ("MJRVS_ELEVENLABS_AGENT_ID", "agent_main"),
            ("ELEVEN_LABS_API_KEY", "key_2"),
        ]));
        assert_eq!(settings.agent_id.as_deref(), Some("agent_main"));
        assert_eq!(settings.api_key.as_deref(), Some("key_2"));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_names_match_case_insensitively_and_blanks_are_unset() {
        let settings = ProviderSettings::from_vars(vars(&[
            ("elevenlabs_api_key", " key "),
            ("ELEVENLABS_AGENT_ID", "   "),
            ("ElevenLabs_Base_Url", "http://localhost:8080"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("key"));
        assert_eq!(settings.agent_id, None);
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.require_agent_id(), Err(SettingsError::MissingAgentId));
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let settings = ProviderSettings::from_vars(vars(&[("ELEVENLABS_API_KEY", "secret")]));
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let upstream = SourceError::Upstream {
            status: 404,
            details: "Not Found".to_string(),
        };
        assert_eq!(
            upstream.to_string(),
            "Failed to fetch agent config from upstream (404): Not Found"
        );

        let settings: SourceError = SettingsError::MissingApiKey.into();
        assert_eq!(settings.to_string(), "Missing ELEVENLABS_API_KEY");

        let wrapped = SnapshotError::Request {
            agent_id: "agent_a".to_string(),
            source: SourceError::UnexpectedPayload,
        };
        assert_eq!(
            wrapped.to_string(),
            "Snapshot request failed for agent 'agent_a': Upstream returned an unexpected payload for agent config"
        );
    }

    #[test]
    fn test_parse_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SourceError = parse.into();
        assert!(matches!(err, SourceError::JsonParse(_)));
    }
}
