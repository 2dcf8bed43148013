use std::time::Duration;

use hangman::prelude::*;
use hangman::DEFAULT_URL;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings read from `HANGMAN_*` environment variables.
#[derive(Debug, PartialEq)]
struct TerminalConfig {
    url: String,
    topic: String,
    join_timeout: Duration,
}

impl TerminalConfig {
    fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// unset keys.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let url = lookup("HANGMAN_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let topic = lookup("HANGMAN_TOPIC")
            .unwrap_or_else(|| hangman::session::DEFAULT_TOPIC.to_string());
        let join_timeout = match lookup("HANGMAN_JOIN_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("HANGMAN_JOIN_TIMEOUT_MS={raw:?}: {e}"))?,
            None => hangman::session::DEFAULT_JOIN_TIMEOUT,
        };
        Ok(Self {
            url,
            topic,
            join_timeout,
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(view: &ViewModel) {
    println!("\n{}", view.state_text);
    print!("{}", view.guess_log_text());
    if view.input_enabled {
        println!("guess a letter:");
    } else {
        println!("(game over, press Ctrl-D to quit)");
    }
}

async fn render_updates(mut views: watch::Receiver<ViewModel>) {
    while views.changed().await.is_ok() {
        render(&views.borrow_and_update());
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = TerminalConfig::from_env()?;
    tracing::info!(url = %config.url, topic = %config.topic, "connecting");

    let client = HangmanClient::builder()
        .url(config.url)
        .topic(config.topic)
        .join_timeout(config.join_timeout)
        .connect()
        .await?;
    let (session, sender) = client.into_parts();

    let views = session.subscribe();
    tokio::spawn(render_updates(views.clone()));
    let session_task = tokio::spawn(session.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !views.borrow().input_enabled {
            continue;
        }
        if sender.submit(&line).await? == GuessSubmission::Rejected {
            println!("one letter at a time, please");
        }
    }

    sender.close().await?;
    session_task.await??;
    Ok(())
}
