//! Integration tests for the session controller.
//!
//! The client side runs the real [`GameSession`] over one end of a
//! [`MemoryConnection`] pair; the test plays the game server on the other
//! end, reading and writing raw JSON frames.

use std::time::Duration;

use hangman_protocol::JsonCodec;
use hangman_session::{
    GameSession, GuessSender, GuessSubmission, SessionConfig, SessionError,
};
use hangman_transport::{Connection, MemoryConnection};
use serde_json::{json, Value};

// =========================================================================
// Helpers
// =========================================================================

type Sender = GuessSender<MemoryConnection, JsonCodec>;

async fn server_push(server: &MemoryConnection, frame: Value) {
    let bytes = serde_json::to_vec(&frame).expect("encode frame");
    server.send(&bytes).await.expect("server send");
}

async fn server_recv(server: &MemoryConnection) -> Value {
    let bytes = tokio::time::timeout(Duration::from_secs(1), server.recv())
        .await
        .expect("timed out waiting for client frame")
        .expect("recv")
        .expect("client closed");
    serde_json::from_slice(&bytes).expect("client frame is JSON")
}

fn join_reply(topic: &str, status: &str, response: Value) -> Value {
    json!({
        "topic": topic,
        "event": "phx_reply",
        "payload": {"status": status, "response": response},
        "ref": "1"
    })
}

fn guess_push(letter: &str, result: &str) -> Value {
    json!({
        "topic": "games:1",
        "event": "new:guess",
        "payload": {"letter": letter, "result": result},
        "ref": null
    })
}

fn state_push(progress: &str, phrase: &[&str], guesses: &[&str], max: i64) -> Value {
    json!({
        "topic": "games:1",
        "event": "new:state",
        "payload": {"state": {
            "progress": progress,
            "phrase": phrase,
            "guesses": guesses,
            "max_guesses": max
        }},
        "ref": null
    })
}

/// Joins `games:1` with the server answering `ok`. Returns the session,
/// its sender, and the server end with the join request already consumed.
async fn joined() -> (GameSession, Sender, MemoryConnection) {
    let (client, server) = MemoryConnection::pair();
    // The pair buffers, so the reply can be queued before the request.
    server_push(&server, join_reply("games:1", "ok", json!({}))).await;

    let (session, sender) =
        GameSession::join(client, JsonCodec, SessionConfig::default())
            .await
            .expect("join should succeed");

    let join = server_recv(&server).await;
    assert_eq!(join["event"], "phx_join");
    (session, sender, server)
}

// =========================================================================
// Join handshake
// =========================================================================

#[tokio::test]
async fn test_join_sends_phx_join_for_topic() {
    let (client, server) = MemoryConnection::pair();
    server_push(&server, join_reply("games:9", "ok", json!({}))).await;

    let (session, _sender) =
        GameSession::join(client, JsonCodec, SessionConfig::new("games:9"))
            .await
            .expect("join should succeed");

    assert_eq!(session.topic().as_str(), "games:9");
    let join = server_recv(&server).await;
    assert_eq!(
        join,
        json!({
            "topic": "games:9",
            "event": "phx_join",
            "payload": {"status": "joining"},
            "ref": "1"
        })
    );
}

#[tokio::test]
async fn test_join_rejected_reports_reason() {
    let (client, server) = MemoryConnection::pair();
    server_push(&server, join_reply("games:1", "error", json!({"reason": "unauthorized"}))).await;

    let result = GameSession::join(client, JsonCodec, SessionConfig::default()).await;
    match result {
        Err(SessionError::JoinRejected { topic, reason }) => {
            assert_eq!(topic.as_str(), "games:1");
            assert_eq!(reason, "unauthorized");
        }
        Err(other) => panic!("expected JoinRejected, got {other}"),
        Ok(_) => panic!("expected JoinRejected, got a session"),
    }
}

#[tokio::test]
async fn test_join_times_out_without_reply() {
    let (client, _server) = MemoryConnection::pair();
    let config = SessionConfig::default().with_join_timeout(Duration::from_millis(50));

    let result = GameSession::join(client, JsonCodec, config).await;
    assert!(matches!(result, Err(SessionError::JoinTimedOut(_))));
}

#[tokio::test]
async fn test_join_fails_when_connection_closes_first() {
    let (client, server) = MemoryConnection::pair();
    server.close().await.unwrap();

    let result = GameSession::join(client, JsonCodec, SessionConfig::default()).await;
    assert!(matches!(result, Err(SessionError::ClosedBeforeJoin(_))));
}

#[tokio::test]
async fn test_reply_with_other_ref_does_not_complete_join() {
    let (client, server) = MemoryConnection::pair();
    let mut stray = join_reply("games:1", "error", json!({}));
    stray["ref"] = json!("99");
    server_push(&server, stray).await;
    server_push(&server, join_reply("games:1", "ok", json!({}))).await;

    let result = GameSession::join(client, JsonCodec, SessionConfig::default()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_reply_on_other_topic_does_not_complete_join() {
    let (client, server) = MemoryConnection::pair();
    server_push(&server, join_reply("games:1", "ok", json!({}))).await;

    let config = SessionConfig::new("games:9").with_join_timeout(Duration::from_millis(50));
    let result = GameSession::join(client, JsonCodec, config).await;
    assert!(matches!(result, Err(SessionError::JoinTimedOut(_))));
}

#[tokio::test]
async fn test_channel_close_before_reply_fails_join_at_once() {
    for event in ["phx_close", "phx_error"] {
        let (client, server) = MemoryConnection::pair();
        server_push(
            &server,
            json!({"topic": "games:1", "event": event, "payload": {}, "ref": "1"}),
        )
        .await;

        // Far longer than the test should take.
        let config = SessionConfig::default().with_join_timeout(Duration::from_secs(30));
        let started = std::time::Instant::now();
        let result = GameSession::join(client, JsonCodec, config).await;

        match result {
            Err(SessionError::JoinRejected { reason, .. }) => {
                assert_eq!(reason, format!("server sent {event}"));
            }
            Err(other) => panic!("expected JoinRejected, got {other}"),
            Ok(_) => panic!("expected JoinRejected, got a session"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

#[tokio::test]
async fn test_channel_close_with_other_ref_is_ignored_while_joining() {
    let (client, server) = MemoryConnection::pair();
    server_push(
        &server,
        json!({"topic": "games:1", "event": "phx_error", "payload": {}, "ref": "7"}),
    )
    .await;
    server_push(&server, join_reply("games:1", "ok", json!({}))).await;

    let result = GameSession::join(client, JsonCodec, SessionConfig::default()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_events_before_join_reply_are_kept() {
    let (client, server) = MemoryConnection::pair();
    server_push(&server, state_push("in_progress", &["_", "_", "t"], &["t"], 6)).await;
    server_push(&server, join_reply("games:1", "ok", json!({}))).await;

    let (mut session, _sender) =
        GameSession::join(client, JsonCodec, SessionConfig::default())
            .await
            .unwrap();

    let view = session.next_update().await.expect("queued event");
    assert_eq!(view.state_text, "“__t”,\nwith guesses: t (5 remaining)");
}

// =========================================================================
// Guess submission
// =========================================================================

#[tokio::test]
async fn test_submit_letter_sends_guess_envelope() {
    let (_session, sender, server) = joined().await;

    let outcome = sender.submit("q").await.unwrap();
    assert_eq!(outcome, GuessSubmission::Sent('q'));

    let frame = server_recv(&server).await;
    assert_eq!(
        frame,
        json!({
            "topic": "games:1",
            "event": "new:guess",
            "payload": {"letter": "q"}
        })
    );
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let (_session, sender, server) = joined().await;

    for input in ["ab", "7", "", " "] {
        let outcome = sender.submit(input).await.unwrap();
        assert_eq!(outcome, GuessSubmission::Rejected, "{input:?}");
    }

    // The first frame the server sees is the one valid guess.
    sender.submit("k").await.unwrap();
    let frame = server_recv(&server).await;
    assert_eq!(frame["payload"], json!({"letter": "k"}));
}

#[tokio::test]
async fn test_cloned_sender_shares_connection() {
    let (_session, sender, server) = joined().await;
    let other = sender.clone();

    sender.submit("a").await.unwrap();
    other.submit("b").await.unwrap();

    assert_eq!(server_recv(&server).await["payload"]["letter"], "a");
    assert_eq!(server_recv(&server).await["payload"]["letter"], "b");
}

#[tokio::test]
async fn test_close_ends_server_stream() {
    let (_session, sender, server) = joined().await;
    sender.close().await.unwrap();
    assert!(server.recv().await.unwrap().is_none());
}

// =========================================================================
// Dispatch
// =========================================================================

#[tokio::test]
async fn test_events_apply_in_order_and_publish() {
    let (mut session, _sender, server) = joined().await;
    let mut watcher = session.subscribe();

    server_push(&server, guess_push("a", "ok")).await;
    server_push(&server, guess_push("b", "too_soon")).await;

    session.next_update().await.unwrap();
    session.next_update().await.unwrap();

    assert_eq!(
        session.view().guess_log,
        [
            "Somebody tried to guess b, but it was too soon after the previous guess.",
            "Somebody guessed a.",
        ]
    );
    assert!(watcher.has_changed().unwrap());
    assert_eq!(*watcher.borrow_and_update(), *session.view());
}

#[tokio::test]
async fn test_junk_and_foreign_frames_are_dropped() {
    let (mut session, _sender, server) = joined().await;

    server.send(b"not json").await.unwrap();
    server_push(&server, json!({"topic": "games:1", "event": "new:guess"})).await;
    server_push(&server, json!({"topic": "games:2", "event": "new:guess",
        "payload": {"letter": "x", "result": "ok"}})).await;
    server_push(&server, json!({"topic": "games:1", "event": "phx_error", "payload": {}})).await;
    server_push(&server, json!({"topic": "games:1", "event": "presence_diff", "payload": {}})).await;
    server_push(&server, guess_push("y", "ok")).await;

    let view = session.next_update().await.unwrap();
    assert_eq!(view.guess_log, ["Somebody guessed y."]);
    assert_eq!(view.state_text, "");
}

#[tokio::test]
async fn test_frame_without_topic_is_accepted() {
    let (mut session, _sender, server) = joined().await;

    server_push(&server, json!({"event": "new:guess",
        "payload": {"letter": "m", "result": "ok"}})).await;

    let view = session.next_update().await.unwrap();
    assert_eq!(view.guess_log, ["Somebody guessed m."]);
}

#[tokio::test]
async fn test_run_drains_queue_until_close() {
    let (session, _sender, server) = joined().await;
    let watcher = session.subscribe();

    server_push(&server, guess_push("c", "ok")).await;
    server_push(&server, state_push("won", &["c", "a", "t"], &["c", "a", "t"], 6)).await;
    server.close().await.unwrap();

    session.run().await.expect("clean close");

    let view = watcher.borrow().clone();
    assert_eq!(
        view.state_text,
        "You won! The phrase was “cat” and you managed it with 3 guesses left in the bank!"
    );
    assert!(view.guess_log.is_empty());
    assert!(!view.input_enabled);
}

#[tokio::test]
async fn test_next_update_returns_none_after_close() {
    let (mut session, _sender, server) = joined().await;
    server.close().await.unwrap();
    assert!(session.next_update().await.is_none());
}
