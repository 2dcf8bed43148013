//! Turns decoded envelopes into typed game events.
//!
//! The classifier is the single place that decides whether a frame means
//! anything to the game. It either returns an [`InboundEvent`] or says why
//! the frame should be dropped ([`IgnoreReason`]). Callers never show
//! ignored frames to the user.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::types::events;
use crate::{Envelope, GameState, GuessResult};

/// A game event the client knows how to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Somebody made a guess (`new:guess`).
    GuessResult(GuessResult),
    /// Full game snapshot (`new:state`).
    GameState(GameState),
}

/// Why a decoded envelope produced no event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IgnoreReason {
    /// The event name isn't one the game uses.
    #[error("unrecognized event {0:?}")]
    UnknownEvent(String),

    /// The event is known but its payload is missing required fields or
    /// has the wrong types.
    #[error("malformed {event} payload: {reason}")]
    MalformedPayload { event: String, reason: String },
}

/// Classifies an envelope by event name and validates its payload.
///
/// - `new:guess` needs string `letter` and `result` fields.
/// - `new:state` needs string `progress` and integer `max_guesses`. The
///   server nests the snapshot under a `state` key; a payload without one
///   is read directly.
/// - Everything else is [`IgnoreReason::UnknownEvent`].
pub fn classify(envelope: Envelope) -> Result<InboundEvent, IgnoreReason> {
    let Envelope { event, mut payload, .. } = envelope;

    match event.as_str() {
        events::NEW_GUESS => {
            decode_payload(&event, payload).map(InboundEvent::GuessResult)
        }
        events::NEW_STATE => {
            let body = match payload.remove("state") {
                Some(Value::Object(state)) => state,
                _ => payload,
            };
            decode_payload(&event, body).map(InboundEvent::GameState)
        }
        _ => Err(IgnoreReason::UnknownEvent(event)),
    }
}

fn decode_payload<T: DeserializeOwned>(
    event: &str,
    body: Map<String, Value>,
) -> Result<T, IgnoreReason> {
    serde_json::from_value(Value::Object(body)).map_err(|e| {
        IgnoreReason::MalformedPayload {
            event: event.to_string(),
            reason: e.to_string(),
        }
    })
}
