//! Wire protocol for the hangman channel client.
//!
//! This crate defines what travels over the game channel and how the
//! client makes sense of it:
//!
//! - **Types** ([`Envelope`], [`Topic`], [`GuessResult`], [`GameState`])
//!   for the frames and payloads on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) for converting those to
//!   and from bytes.
//! - **Classifier** ([`classify`]) for turning a decoded envelope into an
//!   [`InboundEvent`], or an [`IgnoreReason`] for frames the game doesn't use.
//! - **Outbound** ([`build_guess_envelope`], [`build_join_envelope`]) for
//!   the envelopes the client sends.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope → InboundEvent) → Session (view model)
//! ```
//!
//! Nothing in here does I/O.

mod classify;
mod codec;
mod error;
mod outbound;
mod types;

pub use classify::{classify, IgnoreReason, InboundEvent};
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use outbound::{build_guess_envelope, build_join_envelope, JoinReply};
pub use types::{
    events, Envelope, GameState, GuessResult, Outcome, Progress, Topic,
};
