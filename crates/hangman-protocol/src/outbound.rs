//! Envelopes the client sends, and the reply it waits for after joining.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::events;
use crate::{Envelope, Topic};

/// Builds the `new:guess` envelope for `letter`.
///
/// No validation happens here. Whoever accepts user input decides what
/// counts as a letter before calling this.
pub fn build_guess_envelope(topic: &Topic, letter: char) -> Envelope {
    let mut payload = Map::new();
    payload.insert("letter".into(), Value::String(letter.to_string()));
    Envelope::new(topic.clone(), events::NEW_GUESS, payload)
}

/// Builds the `phx_join` envelope for `topic`, tagged with `reference` so
/// the server's reply can be matched to it.
pub fn build_join_envelope(topic: &Topic, reference: &str) -> Envelope {
    let mut payload = Map::new();
    payload.insert("status".into(), Value::String("joining".into()));
    Envelope {
        reference: Some(reference.to_string()),
        ..Envelope::new(topic.clone(), events::PHX_JOIN, payload)
    }
}

/// The server's answer to a request (`phx_reply`).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinReply {
    /// The `ref` of the request being answered.
    pub reference: Option<String>,
    /// `"ok"` on success, usually `"error"` otherwise.
    pub status: String,
    /// Extra detail from the server (the rejection reason, for example).
    pub response: Value,
}

#[derive(Deserialize)]
struct ReplyPayload {
    status: String,
    #[serde(default)]
    response: Value,
}

impl JoinReply {
    /// Reads a reply out of `envelope`. Returns `None` for anything that
    /// isn't a well-formed `phx_reply`.
    pub fn from_envelope(envelope: &Envelope) -> Option<Self> {
        if envelope.event != events::PHX_REPLY {
            return None;
        }
        let payload: ReplyPayload =
            serde_json::from_value(Value::Object(envelope.payload.clone()))
                .ok()?;
        Some(Self {
            reference: envelope.reference.clone(),
            status: payload.status,
            response: payload.response,
        })
    }

    /// `true` when the server accepted the request.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// A short human-readable reason for a rejected request.
    pub fn reason(&self) -> String {
        match &self.response {
            Value::Object(map) => match map.get("reason") {
                Some(Value::String(reason)) => reason.clone(),
                _ => self.status.clone(),
            },
            Value::String(reason) => reason.clone(),
            _ => self.status.clone(),
        }
    }
}
