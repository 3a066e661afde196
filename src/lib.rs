//! Mastermind Player
//!
//! This crate provides a harness and an automated player for Mastermind-style code-breaking
//! games: a hidden pattern of colored pegs must be reproduced exactly, guided only by counts of
//! exact and color-only matches after each guess.
//!
//! # Pairwise Deduction
//!
//! The included [`PairwiseDeductionPlayer`] deduces the secret in three phases: monochrome
//! probes establish each color's occurrence count, cyclic shifts cheaply improve the initial
//! arrangement, and a pairwise swap state machine then pins down every position from the deltas
//! in the exact-match count, never repeating a disproven placement.
//!
//! ## Key Integration Points
//!
//! 1. **Implement [`Player`] trait**: Produces one guess per round from the harness feedback
//! 2. **Use [`Round`]**: Owns the secret, scores guesses, and enforces the guess and time budgets
//! 3. **Use [`PairwiseDeductionPlayer`]**: Ready-made deduction strategy for any board size and
//!    alphabet
//! 4. **Use [`Knowledge`]**: Tri-state positional bookkeeping, reusable by other strategies
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use mastermind_player::{GuessResult, PairwiseDeductionPlayer, Round};
//!
//! // Set up a 5-peg board over three colors with a known secret.
//! let mut round = Round::new(
//!     5,
//!     vec!['A', 'B', 'C'],
//!     "ABCBA".to_string(),
//!     "InsertColors",
//!     Duration::from_secs(5),
//! )?;
//!
//! // A fixed seed makes the post-discovery shuffle reproducible.
//! let mut player = PairwiseDeductionPlayer::with_seed(1);
//!
//! let (result, guesses) = round.play_round(&mut player);
//! assert_eq!(result, GuessResult::Win);
//! assert!(guesses <= 100);
//! # Ok::<(), mastermind_player::RoundError>(())
//! ```

pub mod knowledge;
pub mod pairwise;
pub mod player;
pub mod round;

pub use knowledge::{Knowledge, Marking};
pub use pairwise::PairwiseDeductionPlayer;
pub use player::{Feedback, Player};
pub use round::{GuessResult, Round, RoundError, MAX_GUESSES};
