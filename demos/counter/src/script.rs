//! Action replay scripts
//!
//! A script is a JSON array of action envelopes:
//!
//! ```json
//! [
//!   { "type": "UPDATE_COUNTER", "payload": 1 },
//!   { "type": "CHANGE_STEP_SIZE", "payload": "3" }
//! ]
//! ```
//!
//! Envelopes decode straight into [`CounterAction`]; unknown tags and
//! missing or ill-typed payloads are decoding errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::action::CounterAction;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a script from JSON text
pub fn parse_script(json: &str) -> Result<Vec<CounterAction>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a script file
pub fn load_script(path: &Path) -> Result<Vec<CounterAction>, ScriptError> {
    let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{change_step_size, update_counter};
    use slomux::Action;

    #[test]
    fn test_parse_script() {
        let actions = parse_script(
            r#"[
                {"type": "UPDATE_COUNTER", "payload": 1},
                {"type": "CHANGE_STEP_SIZE", "payload": "3"},
                {"type": "CHANGE_STEP_SIZE", "payload": 2}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            actions,
            vec![update_counter(1), change_step_size("3"), change_step_size(2)]
        );
    }

    #[test]
    fn test_every_tag_decodes_to_its_own_variant() {
        for tag in CounterAction::TAGS {
            let json = format!(r#"[{{"type": "{}", "payload": 1}}]"#, tag);
            let actions = parse_script(&json).unwrap();
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].name(), *tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = parse_script(r#"[{"type": "RESET", "payload": 0}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
        assert!(err.to_string().contains("RESET"));
    }

    #[test]
    fn test_missing_payload_is_rejected() {
        let err = parse_script(r#"[{"type": "UPDATE_COUNTER"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn test_bad_payload_is_rejected() {
        let err = parse_script(r#"[{"type": "UPDATE_COUNTER", "payload": "one"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = parse_script(r#"{"type": "UPDATE_COUNTER"}"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_script(Path::new("/nonexistent/slomux/script.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("script.json"));
    }
}
