use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// `None` when the key is absent; an empty string is a valid opener.
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub is_first_message: Option<bool>,
}

/// Clickable hint rendered by the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatButton {
    pub label: String,
    pub url: String,
}

impl ChatButton {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub suggested_questions: Vec<String>,
    pub action_buttons: Vec<ChatButton>,
    pub booking_buttons: Vec<ChatButton>,
    pub show_booking_prompt: bool,
    pub images: Vec<String>,
    pub quick_replies: Vec<String>,
}

impl ChatResponse {
    /// A bare answer with every UI hint left empty.
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            ..Self::default()
        }
    }
}
