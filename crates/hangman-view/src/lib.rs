//! View model and game-state reducer for the hangman client.
//!
//! # Key types
//!
//! - [`ViewModel`]: what the presentation layer displays
//! - [`reduce`]: pure `(view, event) → view` step driven by the session

mod reducer;
mod view;

pub use reducer::{guess_log_line, reduce};
pub use view::ViewModel;
