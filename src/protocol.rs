//! Wire messages streamed by the scanner and their decoder
//!
//! The scanner pushes JSON text frames of the form
//! `{"MsgType": "progress", "Done": false, "ItemCount": 12, "TotalSize": 4096}`.
//! A `close` message is never sent by the scanner; the transport synthesizes
//! one locally whenever the connection drops.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Field carrying the message kind
pub const KIND_FIELD: &str = "MsgType";

/// Counters reported by a `progress` message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    #[serde(rename = "Done")]
    pub done: bool,
    #[serde(rename = "ItemCount")]
    pub item_count: u64,
    #[serde(rename = "TotalSize")]
    pub total_size_bytes: u64,
}

/// A decoded progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "MsgType")]
pub enum ProgressMessage {
    #[serde(rename = "progress")]
    Progress(ScanProgress),
    /// Connection to the scanner was lost
    #[serde(rename = "close", alias = "closed")]
    Closed,
}

impl ProgressMessage {
    /// Wire name of this message kind
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressMessage::Progress(_) => "progress",
            ProgressMessage::Closed => "close",
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no string `MsgType` field")]
    MissingKind,

    #[error("unknown message kind `{0}`")]
    UnknownKind(String),

    #[error("invalid `{kind}` message: {source}")]
    InvalidFields {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one text frame received from the scanner
pub fn decode_frame(text: &str) -> Result<ProgressMessage, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    decode_value(value)
}

/// Validate an already parsed JSON value and turn it into a [`ProgressMessage`]
pub fn decode_value(value: Value) -> Result<ProgressMessage, DecodeError> {
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let kind = object
        .get(KIND_FIELD)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingKind)?
        .to_string();

    match kind.as_str() {
        "progress" | "close" | "closed" => {}
        _ => return Err(DecodeError::UnknownKind(kind)),
    }

    serde_json::from_value(value).map_err(|source| DecodeError::InvalidFields { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_progress_frame() {
        let msg = decode_frame(r#"{"MsgType":"progress","Done":false,"ItemCount":12,"TotalSize":4096}"#)
            .unwrap();
        assert_eq!(
            msg,
            ProgressMessage::Progress(ScanProgress {
                done: false,
                item_count: 12,
                total_size_bytes: 4096,
            })
        );
        assert_eq!(msg.kind(), "progress");
    }

    #[test]
    fn test_decode_frame_with_trailing_newline() {
        // The scanner's JSON encoder terminates every frame with a newline
        let msg = decode_frame("{\"MsgType\":\"progress\",\"Done\":true,\"ItemCount\":1,\"TotalSize\":2}\n")
            .unwrap();
        assert!(matches!(msg, ProgressMessage::Progress(p) if p.done));
    }

    #[test]
    fn test_decode_close_and_alias() {
        assert_eq!(decode_value(json!({"MsgType": "close"})).unwrap(), ProgressMessage::Closed);
        assert_eq!(decode_value(json!({"MsgType": "closed"})).unwrap(), ProgressMessage::Closed);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let msg = decode_value(json!({
            "MsgType": "progress",
            "Done": false,
            "ItemCount": 3,
            "TotalSize": 10,
            "CurrentPath": "/home"
        }))
        .unwrap();
        assert!(matches!(msg, ProgressMessage::Progress(p) if p.item_count == 3));
    }

    #[test]
    fn test_malformed_json() {
        let err = decode_frame("{\"MsgType\": \"progress\"").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(decode_frame("[1, 2, 3]").unwrap_err(), DecodeError::NotAnObject));
        assert!(matches!(decode_frame("42").unwrap_err(), DecodeError::NotAnObject));
    }

    #[test]
    fn test_missing_or_non_string_kind() {
        let err = decode_value(json!({"Done": true, "ItemCount": 1, "TotalSize": 1})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingKind));

        let err = decode_value(json!({"MsgType": 7})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingKind));
    }

    #[test]
    fn test_unknown_kind() {
        let err = decode_value(json!({"MsgType": "command"})).unwrap_err();
        match err {
            DecodeError::UnknownKind(kind) => assert_eq!(kind, "command"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_fields() {
        // Missing counters
        let err = decode_value(json!({"MsgType": "progress", "Done": true})).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFields { ref kind, .. } if kind == "progress"));

        // Counters must be non-negative
        let err = decode_value(json!({
            "MsgType": "progress",
            "Done": false,
            "ItemCount": -1,
            "TotalSize": 0
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFields { .. }));

        // Done must be a boolean
        let err = decode_value(json!({
            "MsgType": "progress",
            "Done": "yes",
            "ItemCount": 1,
            "TotalSize": 0
        }))
        .unwrap_err();
        assert!(err.to_string().contains("progress"));
    }
}
