//! `HangmanClient` builder and connection setup.
//!
//! This is the entry point for playing over a real socket. It ties the
//! layers together: transport → protocol → session → view.

use std::time::Duration;

use hangman_protocol::{JsonCodec, Topic};
use hangman_session::{GameSession, GuessSender, SessionConfig};
use hangman_transport::WebSocketConnection;

use crate::HangmanError;

/// Where the game server listens by default.
pub const DEFAULT_URL: &str = "ws://localhost:4000/socket/websocket";

/// The sending half of a client connected over WebSocket.
pub type WebSocketGuessSender = GuessSender<WebSocketConnection, JsonCodec>;

/// Builder for connecting to a game server and joining a game.
///
/// # Example
///
/// ```rust,no_run
/// use hangman::prelude::*;
///
/// # async fn play() -> Result<(), HangmanError> {
/// let client = HangmanClient::builder()
///     .url("ws://localhost:4000/socket/websocket")
///     .topic("games:1")
///     .connect()
///     .await?;
/// let (session, sender) = client.into_parts();
/// sender.submit("e").await?;
/// session.run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HangmanClientBuilder {
    url: String,
    session_config: SessionConfig,
}

impl HangmanClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the WebSocket URL of the game server.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the game topic to join.
    pub fn topic(mut self, topic: impl Into<Topic>) -> Self {
        self.session_config.topic = topic.into();
        self
    }

    /// Sets how long to wait for the join reply.
    pub fn join_timeout(mut self, timeout: Duration) -> Self {
        self.session_config.join_timeout = timeout;
        self
    }

    /// Replaces the whole session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Connects to the server and joins the configured game.
    ///
    /// Uses `JsonCodec` and `WebSocketConnection`.
    pub async fn connect(self) -> Result<HangmanClient, HangmanError> {
        let conn = WebSocketConnection::connect(&self.url).await?;
        let (session, sender) =
            GameSession::join(conn, JsonCodec, self.session_config).await?;
        tracing::info!(url = %self.url, topic = %session.topic(), "client ready");
        Ok(HangmanClient { session, sender })
    }
}

impl Default for HangmanClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A client that has joined a game.
///
/// Split it with [`into_parts()`](Self::into_parts) to drive the session
/// and send guesses from different tasks.
pub struct HangmanClient {
    session: GameSession,
    sender: WebSocketGuessSender,
}

impl HangmanClient {
    /// Creates a new builder.
    pub fn builder() -> HangmanClientBuilder {
        HangmanClientBuilder::new()
    }

    /// The joined session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable access to the session, for pulling updates in place.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// The guess sender.
    pub fn sender(&self) -> &WebSocketGuessSender {
        &self.sender
    }

    /// Splits the client into its inbound and outbound halves.
    pub fn into_parts(self) -> (GameSession, WebSocketGuessSender) {
        (self.session, self.sender)
    }
}
