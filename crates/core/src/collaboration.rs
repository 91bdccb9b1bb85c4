//! Live-edit relay message protocol.
//!
//! Editing clients send change batches over a persistent WebSocket; the
//! server forwards each batch to the other connections joined to the same
//! document. Payloads are opaque JSON: the relay never inspects them and
//! never persists them.

use serde::{Deserialize, Deserializer, Serialize};

/// Messages exchanged over WebSocket for live editing.
///
/// Serialized as JSON with an internally-tagged `"type"` discriminator so
/// that the frontend can route messages by type string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RelayMessage {
    /// Client sends: start receiving changes for this document.
    #[serde(rename = "document.join")]
    Join {
        #[serde(deserialize_with = "document_key")]
        document_id: String,
    },

    /// Client sends: stop receiving changes for this document.
    #[serde(rename = "document.leave")]
    Leave {
        #[serde(deserialize_with = "document_key")]
        document_id: String,
    },

    /// Client sends: an in-progress edit to forward to other viewers.
    #[serde(rename = "document.change")]
    Change {
        #[serde(deserialize_with = "document_key")]
        document_id: String,
        changes: serde_json::Value,
    },

    /// Server forwards: another connection edited this document.
    #[serde(rename = "document.update")]
    Update {
        document_id: String,
        changes: serde_json::Value,
        /// Connection id of the editor.
        sender: String,
    },

    /// Server sends to the requesting client: the last message was rejected.
    #[serde(rename = "relay.error")]
    Error { message: String },
}

impl RelayMessage {
    pub fn error(message: impl Into<String>) -> Self {
        RelayMessage::Error {
            message: message.into(),
        }
    }
}

/// Accepts a document key given either as a JSON string or a JSON integer.
fn document_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Number(i64),
    }

    let key = match Key::deserialize(deserializer)? {
        Key::Text(s) => s,
        Key::Number(n) => n.to_string(),
    };
    validate_document_key(&key).map_err(serde::de::Error::custom)?;
    Ok(key)
}

/// Maximum accepted length of a relay document key.
pub const MAX_DOCUMENT_KEY_LEN: usize = 128;

/// Validate a client-chosen document key. Returns `Ok(())` or an error message.
pub fn validate_document_key(key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err("document_id must not be empty".to_string());
    }
    if key.len() > MAX_DOCUMENT_KEY_LEN {
        return Err(format!(
            "document_id must be at most {MAX_DOCUMENT_KEY_LEN} bytes"
        ));
    }
    Ok(())
}
