//! Session controller for the hangman channel client.
//!
//! This crate runs one game session from join to teardown:
//!
//! 1. **Join**: send `phx_join` for the game's topic and wait for the
//!    server's reply ([`GameSession::join`])
//! 2. **Dispatch**: turn inbound frames into typed events and fold them,
//!    one at a time, into the published [`ViewModel`](hangman_view::ViewModel)
//! 3. **Guess**: validate player input and send it ([`GuessSender`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Presentation (above)  ← watches the view model, feeds raw input
//!     ↕
//! Session Layer (this crate)  ← join lifecycle, event queue, input checks
//!     ↕
//! Protocol / View (below)  ← envelopes, classifier, reducer
//! ```

mod config;
mod controller;
mod error;
mod input;

pub use config::{SessionConfig, DEFAULT_JOIN_TIMEOUT, DEFAULT_TOPIC};
pub use controller::{GameSession, GuessSender};
pub use error::SessionError;
pub use input::{parse_guess, GuessSubmission};
