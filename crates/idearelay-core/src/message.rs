//! Conversation message types shared by both generation flows.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
///
/// Serializes as lowercase strings to match the wire format used by the
/// single-page front end and the chat-completions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction that frames the assistant's behavior.
    System,
    /// Message from the AI assistant.
    Assistant,
    /// Message from the user.
    User,
}

impl ChatRole {
    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::Assistant => "assistant",
            ChatRole::User => "user",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ChatRole::System),
            "assistant" => Ok(ChatRole::Assistant),
            "user" => Ok(ChatRole::User),
            _ => Err(format!(
                "Invalid chat role: '{}'. Expected 'system', 'assistant', or 'user'",
                s
            )),
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: ChatRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}
