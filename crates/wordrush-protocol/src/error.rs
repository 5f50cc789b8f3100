//! Error types for the protocol layer.

/// Errors that can occur encoding or decoding wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed — malformed bytes, missing fields, or an
    /// unknown `kind` tag.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but violates the protocol contract.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
