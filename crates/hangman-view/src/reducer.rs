//! Folds inbound game events into the view model.
//!
//! The two event kinds touch disjoint parts of the view:
//!
//! - a guess result only prepends a line to the guess log;
//! - a state snapshot rewrites the state text and input flag, and clears
//!   the log when the game ends.
//!
//! Snapshots are last-write-wins. The reducer doesn't check that `Won` or
//! `Lost` are terminal; ordering is whatever the transport delivered.

use hangman_protocol::{GameState, GuessResult, InboundEvent, Outcome, Progress};

use crate::ViewModel;

/// Applies one event to `view` and returns the updated view.
pub fn reduce(mut view: ViewModel, event: &InboundEvent) -> ViewModel {
    match event {
        InboundEvent::GuessResult(result) => {
            view.guess_log.push_front(guess_log_line(result));
        }
        InboundEvent::GameState(state) => apply_state(&mut view, state),
    }
    view
}

/// The log line announcing a guess result.
///
/// An unrecognized outcome yields an empty line, which the reducer still
/// prepends.
pub fn guess_log_line(result: &GuessResult) -> String {
    let letter = &result.letter;
    match result.outcome {
        Outcome::InvalidEntry => format!(
            "Somebody tried to guess {letter}, but that's not a letter, is it?"
        ),
        Outcome::Finished => {
            "Somebody tried to make a guess, but the game was already over."
                .to_string()
        }
        Outcome::Duplicate => format!(
            "Somebody tried to guess {letter}, but the guess had already been made."
        ),
        Outcome::TooSoon => format!(
            "Somebody tried to guess {letter}, but it was too soon after the previous guess."
        ),
        Outcome::Ok => format!("Somebody guessed {letter}."),
        Outcome::Unrecognized => String::new(),
    }
}

fn apply_state(view: &mut ViewModel, state: &GameState) {
    let phrase = state.phrase.concat();
    let guesses = state.guesses.join(", ");
    let remaining = state.remaining();

    match state.progress {
        Progress::InProgress => {
            view.state_text = format!(
                "“{phrase}”,\nwith guesses: {guesses} ({remaining} remaining)"
            );
            view.input_enabled = true;
        }
        Progress::Won => {
            view.state_text = format!(
                "You won! The phrase was “{phrase}” and you managed it with {remaining} guesses left in the bank!"
            );
        }
        Progress::Lost => {
            view.state_text =
                format!("You lost! The phrase we were looking for was “{phrase}”");
        }
        Progress::Unrecognized => view.state_text.clear(),
    }

    if state.progress.is_finished() {
        view.guess_log.clear();
        view.input_enabled = false;
    }
}
