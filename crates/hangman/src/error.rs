//! Unified error type for the hangman client.

use hangman_protocol::ProtocolError;
use hangman_session::SessionError;
use hangman_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so `?`
/// converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (join rejected, timed out, closed).
    #[error(transparent)]
    Session(#[from] SessionError),
}
