//! Error types for the protocol layer.
//!
//! Only codec failures are errors here. A frame that decodes fine but
//! carries an event or payload the client doesn't understand is not an
//! error; see [`IgnoreReason`](crate::IgnoreReason).

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A raw frame is not a channel envelope: not JSON, no `event` name,
    /// or no `payload` object.
    ///
    /// Receivers drop these frames without telling the user.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),
}
