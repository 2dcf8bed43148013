//! Wire types for the game channel.
//!
//! Every frame on the socket is an [`Envelope`]: a topic, an event name and
//! a JSON payload object (plus an optional reference used to pair replies
//! with requests). The two game events the client understands carry a
//! [`GuessResult`] or a [`GameState`] in that payload.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Codec, ProtocolError};

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// Event names used on the channel.
pub mod events {
    /// Client → server: submit a guess. Server → client: a guess result.
    pub const NEW_GUESS: &str = "new:guess";
    /// Server → client: full game-state snapshot.
    pub const NEW_STATE: &str = "new:state";
    /// Client → server: join a topic.
    pub const PHX_JOIN: &str = "phx_join";
    /// Server → client: reply to a request carrying a `ref`.
    pub const PHX_REPLY: &str = "phx_reply";
    /// Server → client: the channel process crashed.
    pub const PHX_ERROR: &str = "phx_error";
    /// Server → client: the channel was closed.
    pub const PHX_CLOSE: &str = "phx_close";
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// The name of a channel subscription, e.g. `"games:1"`.
///
/// One topic identifies one game. `#[serde(transparent)]` keeps it a plain
/// JSON string on the wire.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Creates a topic from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the topic name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when no topic was given (frames that omit the field).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The top-level frame. Every message on the socket is an `Envelope`.
///
/// ```text
/// {
///   "topic":   "games:1",          ← which game
///   "event":   "new:guess",        ← what happened
///   "payload": { "letter": "q" },  ← event-specific body
///   "ref":     "1"                 ← optional, pairs a reply with its request
/// }
/// ```
///
/// Decoding needs `event` and an object `payload`. A missing `topic`
/// decodes as the empty topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub topic: Topic,

    pub event: String,

    /// Event body. Must be a JSON object; anything else fails to decode.
    pub payload: Map<String, Value>,

    /// Message reference. Servers echo it on `phx_reply`; pushes carry
    /// `null` or nothing.
    #[serde(
        rename = "ref",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "reference"
    )]
    pub reference: Option<String>,
}

impl Envelope {
    /// Creates an envelope without a reference.
    pub fn new(
        topic: Topic,
        event: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            topic,
            event: event.into(),
            payload,
            reference: None,
        }
    }

    /// Decodes a raw frame.
    ///
    /// # Errors
    /// Any failure is `ProtocolError::MalformedEnvelope`.
    pub fn decode(
        codec: &impl Codec,
        raw: &[u8],
    ) -> Result<Self, ProtocolError> {
        codec.decode(raw).map_err(|e| match e {
            ProtocolError::Decode(inner) => {
                ProtocolError::MalformedEnvelope(inner)
            }
            other => other,
        })
    }

    /// Encodes the envelope into a raw frame.
    pub fn encode(&self, codec: &impl Codec) -> Result<Vec<u8>, ProtocolError> {
        codec.encode(self)
    }
}

/// Accepts a string or number reference; anything else becomes `None`.
fn reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Game payloads
// ---------------------------------------------------------------------------

/// How the server judged a submitted guess.
///
/// `#[serde(other)]` routes any string the client doesn't know to
/// `Unrecognized` instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    InvalidEntry,
    Duplicate,
    Finished,
    TooSoon,
    #[serde(other)]
    Unrecognized,
}

/// Phase of the game.
///
/// ```text
///   InProgress ──→ Won
///        └──────→ Lost
/// ```
///
/// The server decides transitions; the client displays whatever arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    InProgress,
    Won,
    Lost,
    #[serde(other)]
    Unrecognized,
}

impl Progress {
    /// `true` once the game has been won or lost.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Payload of a `new:guess` push: somebody guessed `letter` and the server
/// answered with `outcome`.
///
/// `letter` is present even for rejected guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub letter: String,
    #[serde(rename = "result")]
    pub outcome: Outcome,
}

/// Payload of a `new:state` push: the whole game as the server sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub progress: Progress,

    /// The phrase with unguessed positions blanked by the server.
    #[serde(default, deserialize_with = "letters")]
    pub phrase: Vec<String>,

    /// Guesses made so far, oldest first.
    #[serde(default, deserialize_with = "letters")]
    pub guesses: Vec<String>,

    pub max_guesses: i64,
}

impl GameState {
    /// Guesses left: `max_guesses - guesses.len()`.
    ///
    /// Not clamped. A misbehaving server can make this negative and the
    /// client shows the number as is.
    pub fn remaining(&self) -> i64 {
        let used = i64::try_from(self.guesses.len()).unwrap_or(i64::MAX);
        self.max_guesses.saturating_sub(used)
    }
}

/// Reads an array of letters, skipping entries that aren't strings.
/// A missing or non-array value is an empty list.
fn letters<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

// =========================================================================
// Tests
// =========================================================================
