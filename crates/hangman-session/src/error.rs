//! Error types for the session layer.

use hangman_protocol::{ProtocolError, Topic};
use hangman_transport::TransportError;

/// Errors that end (or prevent) a game session.
///
/// Bad frames and bad input never show up here; the session absorbs
/// them. What's left is the join handshake failing and the transport
/// giving out.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The server answered the join with a non-`ok` status.
    #[error("join of {topic} rejected: {reason}")]
    JoinRejected { topic: Topic, reason: String },

    /// No join reply arrived within the configured timeout.
    #[error("join of {0} timed out")]
    JoinTimedOut(Topic),

    /// The connection closed before the join reply arrived.
    #[error("connection closed before joining {0}")]
    ClosedBeforeJoin(Topic),

    /// Sending or receiving on the connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An outbound envelope couldn't be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The inbound task panicked or was cancelled.
    #[error("inbound task failed: {0}")]
    Pump(#[from] tokio::task::JoinError),
}
