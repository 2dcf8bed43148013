//! # Hangman
//!
//! Client for a channel-based multiplayer hangman game.
//!
//! The client joins one game topic on a Phoenix-style channel server,
//! turns the server's pushes into a display-ready view model, and sends
//! the player's single-letter guesses back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hangman::prelude::*;
//!
//! # async fn play() -> Result<(), HangmanError> {
//! let client = HangmanClient::builder().topic("games:1").connect().await?;
//! let (session, sender) = client.into_parts();
//! let mut view = session.subscribe();
//! tokio::spawn(session.run());
//!
//! sender.submit("a").await?;
//! view.changed().await.ok();
//! println!("{}", view.borrow().state_text);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{
    HangmanClient, HangmanClientBuilder, WebSocketGuessSender, DEFAULT_URL,
};
pub use error::HangmanError;

pub use hangman_protocol as protocol;
pub use hangman_session as session;
pub use hangman_transport as transport;
pub use hangman_view as view;

/// The types most clients need.
pub mod prelude {
    pub use crate::{HangmanClient, HangmanClientBuilder, HangmanError};
    pub use hangman_protocol::{GameState, GuessResult, Outcome, Progress, Topic};
    pub use hangman_session::{
        GameSession, GuessSender, GuessSubmission, SessionConfig, SessionError,
    };
    pub use hangman_view::ViewModel;
}
