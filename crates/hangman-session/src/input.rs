//! Validation of guesses typed by the player.

/// What happened to a submitted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessSubmission {
    /// The input was a letter and a guess envelope was sent for it.
    Sent(char),
    /// The input wasn't exactly one letter; nothing was sent.
    Rejected,
}

/// Accepts `input` as a guess if it is exactly one alphabetic character.
///
/// "Alphabetic" is Unicode's `Alphabetic` property, so `é` or `ж` count;
/// digits, punctuation and whitespace don't. A letter followed by a
/// combining mark is two characters and is rejected.
pub fn parse_guess(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_alphabetic() {
        return None;
    }
    Some(letter)
}
