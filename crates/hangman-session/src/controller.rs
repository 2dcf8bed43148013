//! The session controller: joins the game, pumps inbound frames into a
//! typed event queue, and folds that queue into the published view model.
//!
//! The flow is:
//!   1. Send `phx_join` → wait for the matching `phx_reply`
//!   2. Spawn the inbound pump: frame → envelope → event → queue
//!   3. The owner of [`GameSession`] drains the queue, one event at a time
//!
//! Guesses go out through [`GuessSender`], which writes straight to the
//! shared connection and never waits for an answer. The answer comes back
//! later as an ordinary `new:guess` event.

use std::sync::Arc;

use hangman_protocol::{
    build_guess_envelope, build_join_envelope, classify, events, Codec,
    Envelope, InboundEvent, JoinReply, Topic,
};
use hangman_transport::Connection;
use hangman_view::{reduce, ViewModel};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{parse_guess, GuessSubmission, SessionConfig, SessionError};

/// `ref` attached to the join request. It is the first (and only)
/// request the client ever tags.
const JOIN_REF: &str = "1";

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// A joined game: owns the view model and the queue of inbound events.
///
/// Dropping the session stops the inbound pump.
pub struct GameSession {
    topic: Topic,
    view: ViewModel,
    events: mpsc::UnboundedReceiver<InboundEvent>,
    publisher: watch::Sender<ViewModel>,
    pump: Option<JoinHandle<Result<(), SessionError>>>,
}

impl GameSession {
    /// Joins `config.topic` over `conn`.
    ///
    /// Returns the session (the inbound side) and a [`GuessSender`] (the
    /// outbound side). Game events that arrive before the join reply are
    /// kept, not dropped.
    ///
    /// # Errors
    /// - `JoinRejected` if the server refuses the join, or ends the channel
    ///   (`phx_error`/`phx_close` carrying the join ref) before replying
    /// - `JoinTimedOut` if no reply arrives within `config.join_timeout`
    /// - `ClosedBeforeJoin` if the connection ends first
    /// - `Transport` if sending or receiving fails
    pub async fn join<C, K>(
        conn: C,
        codec: K,
        config: SessionConfig,
    ) -> Result<(Self, GuessSender<C, K>), SessionError>
    where
        C: Connection,
        K: Codec + Clone,
    {
        let SessionConfig {
            topic,
            join_timeout,
        } = config;
        let conn = Arc::new(conn);
        let conn_id = conn.id();
        let (tx, rx) = mpsc::unbounded_channel();

        let join = build_join_envelope(&topic, JOIN_REF).encode(&codec)?;
        conn.send(&join).await?;
        tracing::debug!(%conn_id, %topic, "join requested");

        match tokio::time::timeout(
            join_timeout,
            await_join_reply(conn.as_ref(), &codec, &topic, &tx),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::info!(%conn_id, %topic, "join timed out");
                return Err(SessionError::JoinTimedOut(topic));
            }
        }
        tracing::info!(%conn_id, %topic, "joined game");

        let pump = tokio::spawn(pump_inbound(
            Arc::clone(&conn),
            codec.clone(),
            topic.clone(),
            tx,
        ));
        let (publisher, _) = watch::channel(ViewModel::new());

        let session = Self {
            topic: topic.clone(),
            view: ViewModel::new(),
            events: rx,
            publisher,
            pump: Some(pump),
        };
        let sender = GuessSender { conn, codec, topic };
        Ok((session, sender))
    }

    /// The joined topic.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// The current view model.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// A receiver that always holds the latest complete view model.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.publisher.subscribe()
    }

    /// Folds one event into the view and publishes the result.
    ///
    /// The reducer finishes before anything is published, so subscribers
    /// never see a half-updated view.
    pub fn apply(&mut self, event: &InboundEvent) -> &ViewModel {
        let view = std::mem::take(&mut self.view);
        self.view = reduce(view, event);
        self.publisher.send_replace(self.view.clone());
        &self.view
    }

    /// Waits for the next inbound event and applies it.
    ///
    /// Returns `None` once the inbound pump has stopped and the queue is
    /// drained.
    pub async fn next_update(&mut self) -> Option<&ViewModel> {
        let event = self.events.recv().await?;
        Some(self.apply(&event))
    }

    /// Applies events until the connection ends.
    ///
    /// # Errors
    /// Returns the transport error that stopped the inbound pump, if any.
    /// A clean close is `Ok(())`.
    pub async fn run(mut self) -> Result<(), SessionError> {
        while self.next_update().await.is_some() {}
        tracing::info!(topic = %self.topic, "session ended");
        match self.pump.take() {
            Some(pump) => pump.await?,
            None => Ok(()),
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(pump) = &self.pump {
            pump.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// GuessSender
// ---------------------------------------------------------------------------

/// Sends guesses for a joined game. Cheap to clone.
pub struct GuessSender<C, K> {
    conn: Arc<C>,
    codec: K,
    topic: Topic,
}

impl<C, K: Clone> Clone for GuessSender<C, K> {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            codec: self.codec.clone(),
            topic: self.topic.clone(),
        }
    }
}

impl<C: Connection, K: Codec> GuessSender<C, K> {
    /// Submits one raw input from the player.
    ///
    /// Anything other than exactly one letter is rejected without sending.
    /// The caller clears its input field either way.
    ///
    /// # Errors
    /// Returns `Transport` if the envelope couldn't be sent.
    pub async fn submit(
        &self,
        input: &str,
    ) -> Result<GuessSubmission, SessionError> {
        let Some(letter) = parse_guess(input) else {
            tracing::debug!(input, "rejecting guess input");
            return Ok(GuessSubmission::Rejected);
        };

        let frame = build_guess_envelope(&self.topic, letter)
            .encode(&self.codec)?;
        self.conn.send(&frame).await?;
        tracing::debug!(topic = %self.topic, %letter, "guess sent");
        Ok(GuessSubmission::Sent(letter))
    }

    /// Closes the underlying connection.
    pub async fn close(&self) -> Result<(), SessionError> {
        self.conn.close().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inbound side
// ---------------------------------------------------------------------------

/// What a raw frame turned out to be.
enum Routed {
    Event(InboundEvent),
    Reply(JoinReply),
    /// `phx_error` or `phx_close` on our topic.
    ChannelEnd {
        event: String,
        reference: Option<String>,
    },
    Dropped,
}

/// Decodes and classifies one frame. Everything the game can't use is
/// logged and dropped here.
fn route(codec: &impl Codec, topic: &Topic, raw: &[u8]) -> Routed {
    let envelope = match Envelope::decode(codec, raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(%topic, error = %e, "dropping frame");
            return Routed::Dropped;
        }
    };

    if !envelope.topic.is_empty() && envelope.topic != *topic {
        tracing::debug!(
            %topic,
            other = %envelope.topic,
            "dropping frame for another topic"
        );
        return Routed::Dropped;
    }

    if let Some(reply) = JoinReply::from_envelope(&envelope) {
        return Routed::Reply(reply);
    }

    if matches!(envelope.event.as_str(), events::PHX_ERROR | events::PHX_CLOSE)
    {
        tracing::warn!(%topic, event = %envelope.event, "server signalled channel end");
        return Routed::ChannelEnd {
            event: envelope.event,
            reference: envelope.reference,
        };
    }

    match classify(envelope) {
        Ok(event) => Routed::Event(event),
        Err(reason) => {
            tracing::debug!(%topic, %reason, "ignoring frame");
            Routed::Dropped
        }
    }
}

/// Reads frames until the reply to the join request shows up.
async fn await_join_reply<C: Connection, K: Codec>(
    conn: &C,
    codec: &K,
    topic: &Topic,
    events: &mpsc::UnboundedSender<InboundEvent>,
) -> Result<(), SessionError> {
    loop {
        let Some(raw) = conn.recv().await? else {
            return Err(SessionError::ClosedBeforeJoin(topic.clone()));
        };

        match route(codec, topic, &raw) {
            Routed::Reply(reply) if reply.reference.as_deref() == Some(JOIN_REF) => {
                if reply.is_ok() {
                    return Ok(());
                }
                return Err(SessionError::JoinRejected {
                    topic: topic.clone(),
                    reason: reply.reason(),
                });
            }
            Routed::ChannelEnd { event, reference }
                if reference.as_deref() == Some(JOIN_REF) =>
            {
                return Err(SessionError::JoinRejected {
                    topic: topic.clone(),
                    reason: format!("server sent {event}"),
                });
            }
            Routed::Event(event) => {
                // The session holds the receiver, so this can't fail yet.
                let _ = events.send(event);
            }
            Routed::Reply(_) | Routed::ChannelEnd { .. } | Routed::Dropped => {}
        }
    }
}

/// Moves inbound events from the connection into the session's queue
/// until the connection closes or the session goes away.
async fn pump_inbound<C: Connection, K: Codec>(
    conn: Arc<C>,
    codec: K,
    topic: Topic,
    events: mpsc::UnboundedSender<InboundEvent>,
) -> Result<(), SessionError> {
    let conn_id = conn.id();
    loop {
        let raw = match conn.recv().await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(%conn_id, %topic, "connection closed");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%conn_id, %topic, error = %e, "recv error");
                return Err(e.into());
            }
        };

        if let Routed::Event(event) = route(&codec, &topic, &raw) {
            if events.send(event).is_err() {
                tracing::debug!(%conn_id, %topic, "session dropped, stopping");
                return Ok(());
            }
        }
    }
}
