//! Game harness: owns a secret and referees one round against a player
//!
//! A [`Round`] holds the board parameters and the answer, scores guesses by the usual
//! Mastermind rules, and drives a [`Player`] to completion under a guess budget and a per-guess
//! wall-clock cutoff. The harness never reveals the answer to the player; all information flows
//! through [`Feedback`].

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::player::{Feedback, Player};

/// Maximum number of guesses before a round is scored as a loss.
pub const MAX_GUESSES: usize = 100;

/// Outcome classification for a guess or a whole round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// The guess was well formed but did not end the round.
    Valid,
    /// The guess reproduced the answer exactly.
    Win,
    /// The guess budget or the time cutoff was exhausted.
    Loss,
    /// The player produced a malformed guess.
    Failure,
}

/// A rejected round configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("board length must be at least 1")]
    EmptyBoard,
    #[error("color alphabet must not be empty")]
    NoColors,
    #[error("answer length {actual} does not match board length {expected}")]
    AnswerLength { expected: usize, actual: usize },
    #[error("answer contains color {0:?} which is not in the alphabet")]
    AnswerColor(char),
}

/// One game against one secret.
///
/// The round keeps its own guess counter, so a single `Round` value referees exactly one game;
/// construct a fresh one per game.
#[derive(Debug)]
pub struct Round {
    board_length: usize,
    colors: Vec<char>,
    answer: String,
    scsa_name: String,
    time_cutoff: Duration,
    guesses: usize,
}

impl Round {
    /// Creates a round after validating the configuration.
    ///
    /// # Arguments
    /// * `board_length` - number of pegs in the secret
    /// * `colors` - the ordered color alphabet
    /// * `answer` - the secret; must be `board_length` characters drawn from `colors`
    /// * `scsa_name` - name of the strategy that generated the secret, passed through to the
    ///   player as a hint
    /// * `time_cutoff` - wall-clock budget for each call to the player
    pub fn new(
        board_length: usize,
        colors: Vec<char>,
        answer: String,
        scsa_name: &str,
        time_cutoff: Duration,
    ) -> Result<Self, RoundError> {
        if board_length == 0 {
            return Err(RoundError::EmptyBoard);
        }
        if colors.is_empty() {
            return Err(RoundError::NoColors);
        }
        let answer_length = answer.chars().count();
        if answer_length != board_length {
            return Err(RoundError::AnswerLength {
                expected: board_length,
                actual: answer_length,
            });
        }
        if let Some(stray) = answer.chars().find(|c| !colors.contains(c)) {
            return Err(RoundError::AnswerColor(stray));
        }
        Ok(Self {
            board_length,
            colors,
            answer,
            scsa_name: scsa_name.to_string(),
            time_cutoff,
            guesses: 0,
        })
    }

    /// Returns `true` if the guess is the right length and stays inside the alphabet.
    pub fn valid_guess(&self, guess: &str) -> bool {
        guess.chars().count() == self.board_length
            && guess.chars().all(|c| self.colors.contains(&c))
    }

    // Per-color occurrence counts, aligned with the alphabet order.
    fn count_colors(&self, text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.colors.len()];
        for c in text.chars() {
            if let Some(index) = self.colors.iter().position(|&color| color == c) {
                counts[index] += 1;
            }
        }
        counts
    }

    /// Scores a guess against the answer.
    ///
    /// # Returns
    /// `(exact, color_only)`: pegs right in color and position, and the remaining per-color
    /// overlap beyond those.
    pub fn process_guess(&self, guess: &str) -> (usize, usize) {
        let exact = guess
            .chars()
            .zip(self.answer.chars())
            .filter(|(g, a)| g == a)
            .count();
        let guess_counts = self.count_colors(guess);
        let answer_counts = self.count_colors(&self.answer);
        let overlap: usize = guess_counts
            .iter()
            .zip(answer_counts.iter())
            .map(|(&g, &a)| g.min(a))
            .sum();
        (exact, overlap - exact)
    }

    /// Scores one guess and classifies it, advancing the round's guess counter.
    ///
    /// A malformed guess is a [`GuessResult::Failure`], a full exact match is a
    /// [`GuessResult::Win`], and reaching the guess budget without one is a
    /// [`GuessResult::Loss`]. The returned feedback carries the counts and the number of the
    /// guess just scored.
    pub fn respond_to_guess(&mut self, guess: &str) -> (GuessResult, Feedback) {
        self.guesses += 1;
        if !self.valid_guess(guess) {
            return (GuessResult::Failure, Feedback::new(0, 0, self.guesses));
        }
        let (exact, color_only) = self.process_guess(guess);
        let feedback = Feedback::new(exact, color_only, self.guesses);
        let result = if exact == self.board_length {
            GuessResult::Win
        } else if self.guesses == MAX_GUESSES {
            GuessResult::Loss
        } else {
            GuessResult::Valid
        };
        (result, feedback)
    }

    /// Plays the round to completion.
    ///
    /// The player receives the game-start sentinel first and then the feedback for each of its
    /// guesses in turn. A call that overruns the round's time cutoff scores an immediate
    /// [`GuessResult::Loss`].
    ///
    /// # Returns
    /// The round outcome and the number of guesses consumed.
    pub fn play_round(&mut self, player: &mut dyn Player) -> (GuessResult, usize) {
        let mut feedback = Feedback::game_start();
        loop {
            let started = Instant::now();
            let guess = player.make_guess(
                self.board_length,
                &self.colors,
                &self.scsa_name,
                feedback,
            );
            if started.elapsed() > self.time_cutoff {
                // The timed-out guess still counts toward the total.
                self.guesses += 1;
                debug!(player = player.name(), guesses = self.guesses, "time cutoff exceeded");
                return (GuessResult::Loss, self.guesses);
            }

            let (result, response) = self.respond_to_guess(&guess);
            if result != GuessResult::Valid {
                debug!(
                    player = player.name(),
                    guesses = self.guesses,
                    outcome = ?result,
                    "round over"
                );
                return (result, self.guesses);
            }
            feedback = response;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::PairwiseDeductionPlayer;

    fn round_for(answer: &str) -> Round {
        Round::new(
            5,
            vec!['A', 'B', 'C', 'D', 'E'],
            answer.to_string(),
            "InsertColors",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    // Always guesses the same string.
    struct FixedPlayer(&'static str);

    impl Player for FixedPlayer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn make_guess(
            &mut self,
            _board_length: usize,
            _colors: &[char],
            _scsa_name: &str,
            _feedback: Feedback,
        ) -> String {
            self.0.to_string()
        }
    }

    // Valid guesses, but stalls past the cutoff on the first call.
    struct SleepyPlayer;

    impl Player for SleepyPlayer {
        fn name(&self) -> &str {
            "sleepy"
        }

        fn make_guess(
            &mut self,
            board_length: usize,
            colors: &[char],
            _scsa_name: &str,
            _feedback: Feedback,
        ) -> String {
            std::thread::sleep(Duration::from_millis(20));
            std::iter::repeat(colors[0]).take(board_length).collect()
        }
    }

    #[test]
    fn test_round_rejects_bad_configurations() {
        assert_eq!(
            Round::new(0, vec!['A'], String::new(), "", Duration::from_secs(1)).unwrap_err(),
            RoundError::EmptyBoard
        );
        assert_eq!(
            Round::new(2, vec![], "AA".to_string(), "", Duration::from_secs(1)).unwrap_err(),
            RoundError::NoColors
        );
        assert_eq!(
            Round::new(3, vec!['A', 'B'], "AA".to_string(), "", Duration::from_secs(1))
                .unwrap_err(),
            RoundError::AnswerLength {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            Round::new(2, vec!['A', 'B'], "AX".to_string(), "", Duration::from_secs(1))
                .unwrap_err(),
            RoundError::AnswerColor('X')
        );
        // A well-formed configuration still constructs.
        assert!(Round::new(2, vec!['A', 'B'], "AB".to_string(), "", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_round_valid_guess() {
        let round = round_for("ABCBA");
        assert!(round.valid_guess("DEDED"));
        assert!(!round.valid_guess("DEDE")); // too short
        assert!(!round.valid_guess("DEDEDE")); // too long
        assert!(!round.valid_guess("AECBF")); // F is outside the alphabet
    }

    #[test]
    fn test_round_process_guess_counts() {
        let round = round_for("ABCBA");
        assert_eq!(round.process_guess("ABCBA"), (5, 0));
        assert_eq!(round.process_guess("DEDED"), (0, 0));
        assert_eq!(round.process_guess("AACBB"), (3, 2));
        assert_eq!(round.process_guess("BCDEB"), (0, 3));
        assert_eq!(round.process_guess("AECBD"), (3, 0));
    }

    #[test]
    fn test_round_respond_classifies_win() {
        let mut round = round_for("ABCBA");
        let (result, feedback) = round.respond_to_guess("ABCBA");
        assert_eq!(result, GuessResult::Win);
        assert_eq!(feedback.exact, 5);
        assert_eq!(feedback.guess_number, 1);
    }

    #[test]
    fn test_round_respond_classifies_failure() {
        let mut round = round_for("ABCBA");
        let (result, _) = round.respond_to_guess("AECBF");
        assert_eq!(result, GuessResult::Failure);
    }

    #[test]
    fn test_round_respond_loses_at_guess_budget() {
        let mut round = round_for("ABCBA");
        for _ in 0..MAX_GUESSES - 1 {
            let (result, _) = round.respond_to_guess("DEDED");
            assert_eq!(result, GuessResult::Valid);
        }
        let (result, feedback) = round.respond_to_guess("DEDED");
        assert_eq!(result, GuessResult::Loss);
        assert_eq!(feedback.guess_number, MAX_GUESSES);
    }

    #[test]
    fn test_round_play_round_win() {
        let mut round = round_for("ABCBA");
        let mut player = FixedPlayer("ABCBA");
        let (result, guesses) = round.play_round(&mut player);
        assert_eq!(result, GuessResult::Win);
        assert_eq!(guesses, 1);
    }

    #[test]
    fn test_round_play_round_failure_on_invalid_guess() {
        let mut round = round_for("ABCBA");
        let mut player = FixedPlayer("AECBF");
        let (result, guesses) = round.play_round(&mut player);
        assert_eq!(result, GuessResult::Failure);
        assert_eq!(guesses, 1);
    }

    #[test]
    fn test_round_play_round_loss_after_budget() {
        let mut round = round_for("ABCBA");
        let mut player = FixedPlayer("DEDED");
        let (result, guesses) = round.play_round(&mut player);
        assert_eq!(result, GuessResult::Loss);
        assert_eq!(guesses, MAX_GUESSES);
    }

    #[test]
    fn test_round_play_round_loss_on_timeout() {
        let mut round = Round::new(
            4,
            vec!['A', 'B'],
            "ABBA".to_string(),
            "",
            Duration::from_millis(1),
        )
        .unwrap();
        let mut player = SleepyPlayer;
        let (result, guesses) = round.play_round(&mut player);
        assert_eq!(result, GuessResult::Loss);
        assert_eq!(guesses, 1);
    }

    #[test]
    fn test_round_pairwise_player_wins_round() {
        let secrets = ["ABCBA", "EDCBA", "AABBC", "DDDDD", "CEBEA"];
        for (seed, secret) in secrets.iter().enumerate() {
            let mut round = round_for(secret);
            let mut player = PairwiseDeductionPlayer::with_seed(seed as u64);
            let (result, guesses) = round.play_round(&mut player);
            assert_eq!(result, GuessResult::Win, "lost against {secret}");
            assert!(guesses <= MAX_GUESSES);
        }
    }

    #[test]
    fn test_round_pairwise_player_reusable_across_rounds() {
        let mut player = PairwiseDeductionPlayer::with_seed(99);
        for secret in ["BBACD", "EEEEA"] {
            let mut round = round_for(secret);
            let (result, _) = round.play_round(&mut player);
            assert_eq!(result, GuessResult::Win, "lost against {secret}");
        }
    }
}
