//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON objects over WebSocket, tagged by a
//! dotted `type` field.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Question;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// The participant changed their selected alternative.
    #[serde(rename = "alternatives.answer")]
    AlternativesAnswer { alternative: usize },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Connection accepted.
    #[serde(rename = "connection.ack")]
    ConnectionAck { session_id: Uuid },

    /// Display a question and its alternatives.
    #[serde(rename = "alternatives.show")]
    AlternativesShow {
        wording: String,
        answers: Vec<String>,
    },

    /// The last client message could not be accepted.
    #[serde(rename = "error.malformed")]
    MalformedMessage { message: String },

    /// The host removed this participant.
    #[serde(rename = "session.kicked")]
    Kicked { reason: String },

    /// Server is shutting down.
    #[serde(rename = "server.closing")]
    ServerClosing,
}

impl ServerMessage {
    pub fn show(question: &Question) -> Self {
        Self::AlternativesShow {
            wording: question.wording.clone(),
            answers: question.answers.clone(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
        }
    }
}

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_message_wire_format() {
        let json = r#"{"type":"alternatives.show","wording":"Pick one","answers":["Cat","Dog"]}"#;
        let msg: ServerMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ServerMessage::AlternativesShow {
                wording: "Pick one".to_string(),
                answers: vec!["Cat".to_string(), "Dog".to_string()],
            }
        );
    }

    #[test]
    fn test_answer_message_wire_format() {
        let msg = ClientMessage::AlternativesAnswer { alternative: 1 };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "alternatives.answer", "alternative": 1})
        );
    }

    #[test]
    fn test_show_without_answers_is_rejected() {
        let json = r#"{"type":"alternatives.show","wording":"Pick one"}"#;
        assert!(serde_json::from_str::<ServerMessage>(json).is_err());
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&ServerMessage::ServerClosing).unwrap();
        assert_eq!(json, r#"{"type":"server.closing"}"#);
    }
}
