//! The display-ready summary of a game.

use std::collections::VecDeque;

use serde::Serialize;

/// What the presentation layer shows.
///
/// Created empty when a session starts and replaced wholesale by
/// [`reduce`](crate::reduce) after every event. Readers get a consistent
/// snapshot; fields are never updated one at a time in their sight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Phrase, guesses and remaining count, or the won/lost message.
    pub state_text: String,

    /// One line per guess result, most recent first.
    pub guess_log: VecDeque<String>,

    /// Whether the guess input should accept text.
    pub input_enabled: bool,
}

impl ViewModel {
    /// An empty view: no state text, empty log, input enabled.
    pub fn new() -> Self {
        Self {
            state_text: String::new(),
            guess_log: VecDeque::new(),
            input_enabled: true,
        }
    }

    /// The guess log as one block of text, newest line first, each line
    /// followed by a newline.
    pub fn guess_log_text(&self) -> String {
        self.guess_log.iter().fold(String::new(), |mut text, line| {
            text.push_str(line);
            text.push('\n');
            text
        })
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
