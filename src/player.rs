//! Player trait for Mastermind-style code-breaking games
//!
//! This module defines the boundary between a code-breaking agent and the game harness. The
//! harness owns the secret and drives the game one round at a time: it hands the player the board
//! parameters and the feedback for the previous guess, and the player returns the next guess.

/// Feedback for the previous guess, supplied by the harness on every call.
///
/// The counts follow the usual Mastermind rules: `exact` is the number of positions where the
/// guess and the secret agree, and `color_only` is the remaining per-color overlap
/// (`sum of min(count in guess, count in secret)` over all colors, minus `exact`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Feedback {
    /// Number of pegs correct in both color and position.
    pub exact: usize,
    /// Number of pegs correct in color only.
    pub color_only: usize,
    /// Index of the guess about to be made. `0` is the game-start sentinel: there is no
    /// previous guess and the player must reinitialize all of its state.
    pub guess_number: usize,
}

impl Feedback {
    /// Creates feedback with the given counts and guess number.
    pub fn new(exact: usize, color_only: usize, guess_number: usize) -> Self {
        Self {
            exact,
            color_only,
            guess_number,
        }
    }

    /// The game-start sentinel: no previous guess exists.
    pub fn game_start() -> Self {
        Self::default()
    }
}

/// An interface for code-breaking players.
///
/// A player is a stateful strategy object. The harness calls [`make_guess`](Player::make_guess)
/// once per round; all state needed between rounds is the player's own responsibility. A
/// `guess_number` of `0` in the feedback signals the start of a new game, and the player must
/// reset any state left over from a previous game before producing its first guess.
///
/// # Examples
///
/// ```
/// use mastermind_player::{Feedback, Player};
///
/// // A player that always guesses the same arrangement.
/// struct FixedPlayer(String);
///
/// impl Player for FixedPlayer {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn make_guess(
///         &mut self,
///         _board_length: usize,
///         _colors: &[char],
///         _scsa_name: &str,
///         _feedback: Feedback,
///     ) -> String {
///         self.0.clone()
///     }
/// }
///
/// let mut player = FixedPlayer("ABCBA".to_string());
/// let guess = player.make_guess(5, &['A', 'B', 'C'], "InsertColors", Feedback::game_start());
/// assert_eq!(guess, "ABCBA");
/// ```
pub trait Player {
    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Produces the next guess.
    ///
    /// # Arguments
    /// * `board_length` - number of pegs in the secret
    /// * `colors` - the ordered color alphabet; every peg of the guess must be drawn from it
    /// * `scsa_name` - name of the secret-generation strategy, informational only
    /// * `feedback` - response to the previous guess, or the game-start sentinel
    ///
    /// # Returns
    /// A string of exactly `board_length` characters, each a member of `colors`. Producing
    /// anything else is a defect and is reported by the harness as a failure outcome.
    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &[char],
        scsa_name: &str,
        feedback: Feedback,
    ) -> String;
}
