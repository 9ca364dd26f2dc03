//! Counter actions and their creators
//!
//! Tags follow the `SCREAMING_SNAKE_CASE` convention: `UPDATE_COUNTER`,
//! `CHANGE_STEP_SIZE`.

use serde::Deserialize;

/// Step size as it arrives from an input: a number, or text to be coerced
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StepInput {
    Number(i64),
    Text(String),
}

impl StepInput {
    /// Numeric value of the input
    ///
    /// Text is trimmed first; empty text is `0`. Returns `None` for text that
    /// is not an integer.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            StepInput::Number(n) => Some(*n),
            StepInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Some(0)
                } else {
                    text.parse().ok()
                }
            }
        }
    }
}

impl From<i64> for StepInput {
    fn from(n: i64) -> Self {
        StepInput::Number(n)
    }
}

impl From<&str> for StepInput {
    fn from(text: &str) -> Self {
        StepInput::Text(text.to_string())
    }
}

impl From<String> for StepInput {
    fn from(text: String) -> Self {
        StepInput::Text(text)
    }
}

/// Counter actions
///
/// On the wire an action is `{ "type": "<TAG>", "payload": ... }`; the serde
/// tags and the `Action::name()` tags share one casing rule.
#[derive(slomux::Action, Clone, Debug, PartialEq, Deserialize)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAction {
    /// Move the counter by `payload * step_size`
    UpdateCounter(i64),

    /// Replace the step size with the coerced payload
    ChangeStepSize(StepInput),
}

pub fn update_counter(value: i64) -> CounterAction {
    CounterAction::UpdateCounter(value)
}

pub fn change_step_size(value: impl Into<StepInput>) -> CounterAction {
    CounterAction::ChangeStepSize(value.into())
}
