//! Pairwise-deduction code-breaking strategy
//!
//! This module implements a multi-phase deduction player. A game proceeds through three phases:
//!
//! 1. **Discovery** - one monochrome probe per color determines how many times each color occurs
//!    in the secret (the last color's count follows by subtraction, saving a probe). The working
//!    pattern then holds the secret's exact color multiset in a random order.
//! 2. **Arrangement** - while the exact-match count stays at or below a slowly relaxing bar, the
//!    pattern is cyclically shifted left, trading guesses for a cheap head start before the
//!    expensive pairwise work begins.
//! 3. **Refinement** - a state machine swaps pairs of positions and interprets the *delta* in the
//!    exact-match count between consecutive guesses. A delta of ±2 settles both positions
//!    outright; ±1 and the ambiguous 0 (when a duplicated color may be masking the result) each
//!    spend one diagnostic guess to pin down which placement was right. Everything learned is
//!    recorded in a [`Knowledge`] grid so no disproven arrangement is ever tried twice.
//!
//! Only the exact-match count drives the deduction; the color-only count is never consulted
//! (after discovery the pattern always holds the right multiset, so the color-only count carries
//! no extra information).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::knowledge::Knowledge;
use crate::player::{Feedback, Player};

/// Which step of the strategy the next feedback belongs to. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Monochrome color-count probes are still outstanding.
    Discovery,
    /// The shuffled pattern has been submitted; its first feedback is pending.
    Arrange,
    /// The pattern was cyclically shifted; deciding whether to shift again.
    ShiftAnneal,
    /// A plain pairwise swap probe is outstanding.
    Idle,
    /// A diagnostic guess is outstanding to attribute a ±1 delta to one of the two swapped
    /// positions.
    EvaluatingSwap,
    /// A diagnostic guess is outstanding to tell a true non-match from a duplicated color
    /// masking a 0 delta.
    EvaluatingPossibleDuplicate,
    /// A duplicate was confirmed; the displaced color is being test-placed on the remaining
    /// slots that hold the duplicated color.
    EvaluatingDuplicateConfirmed,
}

/// A stateful player that deduces the secret through systematic pairwise swaps.
///
/// The player is purely reactive: each call to [`make_guess`](Player::make_guess) consumes the
/// feedback for the previous guess and returns the next one. All state lives for one game and is
/// rebuilt when the harness signals a new game (`guess_number == 0`).
///
/// Internally the pattern stores alphabet indices rather than characters, so every knowledge
/// lookup is O(1); guesses are rendered to strings only at the boundary.
///
/// # Examples
///
/// ```
/// use mastermind_player::{Feedback, PairwiseDeductionPlayer, Player};
///
/// let mut player = PairwiseDeductionPlayer::with_seed(7);
/// let first = player.make_guess(5, &['A', 'B', 'C'], "InsertColors", Feedback::game_start());
/// // The opening probe is the first color repeated across the board.
/// assert_eq!(first, "AAAAA");
/// ```
pub struct PairwiseDeductionPlayer {
    rng: StdRng,
    mode: Mode,
    /// Board and alphabet for the current game, captured at the start-of-game sentinel.
    board_length: usize,
    colors: Vec<char>,
    /// Number of monochrome probes issued so far.
    probed: usize,
    /// Running total of discovered color occurrences.
    found: usize,
    /// The working arrangement, refined in place toward the secret.
    pattern: Vec<usize>,
    knowledge: Knowledge,
    /// Swap cursors; persist across calls and wrap modulo the board length.
    first: usize,
    second: usize,
    /// Exact-match count of the last counted arrangement; deltas against it drive every
    /// refinement decision.
    last_exact: usize,
    /// Color displaced by a diagnostic overwrite, restored or permanently placed depending on
    /// the next feedback.
    saved: usize,
    /// Number of shifts performed; every second shift lowers the acceptance bar by one.
    anneal_factor: usize,
}

impl PairwiseDeductionPlayer {
    /// Creates a player with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a player with a fixed RNG seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            mode: Mode::Discovery,
            board_length: 0,
            colors: Vec::new(),
            probed: 0,
            found: 0,
            pattern: Vec::new(),
            knowledge: Knowledge::new(0, 0),
            first: 0,
            second: 0,
            last_exact: 0,
            saved: 0,
            anneal_factor: 0,
        }
    }

    /// Discards all game state and prepares for a new board. Called automatically when the
    /// harness sends the start-of-game sentinel.
    pub fn reset(&mut self, board_length: usize, colors: &[char]) {
        self.mode = Mode::Discovery;
        self.board_length = board_length;
        self.colors = colors.to_vec();
        self.probed = 0;
        self.found = 0;
        self.pattern = Vec::with_capacity(board_length);
        self.knowledge = Knowledge::new(board_length, colors.len());
        self.first = 0;
        self.second = 0;
        self.last_exact = 0;
        self.saved = 0;
        self.anneal_factor = 0;
    }

    // Renders the working pattern as a guess string.
    fn render_pattern(&self) -> String {
        self.pattern.iter().map(|&color| self.colors[color]).collect()
    }

    // Renders a monochrome probe of the given color.
    fn monochrome(&self, color: usize) -> String {
        std::iter::repeat(self.colors[color])
            .take(self.board_length)
            .collect()
    }

    // Records the count returned by the previous monochrome probe and either issues the next
    // probe or, once every peg is accounted for, enters the arrangement phase.
    fn discovery_step(&mut self, exact: usize) -> String {
        let length = self.board_length;
        let num_colors = self.colors.len();

        // A monochrome guess makes "exact" the occurrence count of the probed color.
        let color = self.probed - 1;
        if exact > 0 {
            self.found += exact;
            self.knowledge.set_remaining(color, exact);
            self.pattern.extend(std::iter::repeat(color).take(exact));
        }

        if self.found == length {
            // Every peg accounted for; skip any remaining probes.
            return self.finish_discovery();
        }

        if self.probed == num_colors - 1 {
            // The last color's count follows by subtraction, saving one probe.
            let last = num_colors - 1;
            let rest = length - self.found;
            self.knowledge.set_remaining(last, rest);
            self.pattern.extend(std::iter::repeat(last).take(rest));
            return self.finish_discovery();
        }

        self.probed += 1;
        self.monochrome(self.probed - 1)
    }

    // Shuffles the completed pattern and submits it as the first arrangement guess. The shuffle
    // decorrelates the initial order from the discovery order, avoiding adversarial worst cases
    // against a predictable sequential arrangement.
    fn finish_discovery(&mut self) -> String {
        debug_assert_eq!(self.pattern.len(), self.board_length);
        self.pattern.shuffle(&mut self.rng);
        self.mode = Mode::Arrange;
        debug!(probes = self.probed, "discovery complete");
        self.render_pattern()
    }

    // Handles the first feedback for the shuffled pattern: either start shifting or go straight
    // to pairwise refinement.
    fn arrange_step(&mut self, exact: usize) -> String {
        self.last_exact = exact;

        if exact == 0 {
            self.exclude_current_placements();
        }

        // The bar is the expected exact count of a random arrangement, rounded down.
        if exact <= self.board_length / self.colors.len() {
            self.pattern.rotate_left(1);
            self.mode = Mode::ShiftAnneal;
        } else {
            self.mode = Mode::Idle;
            self.next_swap();
        }
        self.render_pattern()
    }

    // Decides whether to keep shifting. The acceptance bar drops by one for every two shifts
    // already spent, so a mediocre arrangement is eventually accepted rather than shifted
    // forever.
    fn anneal_step(&mut self, exact: usize) -> String {
        self.last_exact = exact;

        let bar = (self.board_length / self.colors.len()) as isize - (self.anneal_factor / 2) as isize;
        if exact as isize <= bar {
            self.anneal_factor += 1;
            self.pattern.rotate_left(1);
        } else {
            trace!(shifts = self.anneal_factor, exact, "arrangement accepted");
            self.mode = Mode::Idle;
            self.next_swap();
        }
        self.render_pattern()
    }

    // Interprets the feedback for a plain pairwise swap of `first` and `second`.
    fn swap_outcome(&mut self, exact: usize) -> String {
        let delta = exact as isize - self.last_exact as isize;
        match delta {
            2 | -2 => {
                // Both positions settled at once; no diagnostic needed.
                if delta == 2 {
                    self.last_exact = exact;
                } else {
                    // The old arrangement was the right one.
                    self.pattern.swap(self.first, self.second);
                }
                self.knowledge.confirm(self.first, self.pattern[self.first]);
                self.knowledge.confirm(self.second, self.pattern[self.second]);
                debug!(
                    first = self.first,
                    second = self.second,
                    confirmed = self.knowledge.confirmed_positions(),
                    "swap settled both positions"
                );
                self.next_swap();
            }
            1 | -1 | 0 => {
                let a = self.pattern[self.first];
                let b = self.pattern[self.second];
                if delta != 0 || self.knowledge.remaining(a) > 1 || self.knowledge.remaining(b) > 1 {
                    // One diagnostic guess tells the two placements apart: duplicate the color at
                    // `first` across both positions and watch the count move.
                    self.mode = if delta != 0 {
                        Mode::EvaluatingSwap
                    } else {
                        Mode::EvaluatingPossibleDuplicate
                    };
                    if delta == 1 {
                        self.last_exact = exact;
                    } else {
                        self.pattern.swap(self.first, self.second);
                    }
                    self.saved = self.pattern[self.second];
                    self.pattern[self.second] = self.pattern[self.first];
                } else {
                    // No duplicate can be masking the 0: all four cross assignments are wrong.
                    self.pattern.swap(self.first, self.second);
                    let a = self.pattern[self.first];
                    let b = self.pattern[self.second];
                    self.knowledge.exclude(self.first, a);
                    self.knowledge.exclude(self.first, b);
                    self.knowledge.exclude(self.second, a);
                    self.knowledge.exclude(self.second, b);
                    self.next_swap();
                }
            }
            _ => panic!("exact-match delta {delta} is impossible for a pairwise swap"),
        }
        self.render_pattern()
    }

    // Interprets the diagnostic that followed a ±1 swap delta. The displaced color is restored
    // at `second`; a delta of 0 pins the color at `first`, anything else pins `second`.
    fn swap_diagnostic_outcome(&mut self, exact: usize) -> String {
        self.pattern[self.second] = self.saved;

        let delta = exact as isize - self.last_exact as isize;
        let a = self.pattern[self.first];
        let b = self.pattern[self.second];
        if delta == 0 {
            self.knowledge.confirm(self.first, a);
            self.knowledge.exclude(self.second, a);
            self.knowledge.exclude(self.second, b);
            self.first = self.second;
        } else {
            self.knowledge.confirm(self.second, b);
            self.knowledge.exclude(self.first, a);
            self.knowledge.exclude(self.first, b);
        }
        trace!(
            first = self.first,
            second = self.second,
            confirmed = self.knowledge.confirmed_positions(),
            "diagnostic settled one position"
        );
        self.mode = Mode::Idle;
        self.next_swap();
        self.render_pattern()
    }

    // Interprets the diagnostic that followed an ambiguous 0 delta. A moved count means the
    // color at `first` (for +1) or `second` (for -1) occupies *both* positions in the secret;
    // an unmoved count rules the pair out entirely.
    fn duplicate_probe_outcome(&mut self, exact: usize) -> String {
        self.pattern[self.second] = self.saved;

        let delta = exact as isize - self.last_exact as isize;
        match delta {
            1 | -1 => {
                // The all-duplicate diagnostic scores one higher than the counted arrangement.
                self.last_exact += 1;
                let displaced;
                if delta == 1 {
                    displaced = self.pattern[self.second];
                    self.pattern[self.second] = self.pattern[self.first];
                } else {
                    displaced = self.pattern[self.first];
                    self.pattern[self.first] = self.pattern[self.second];
                }
                let duplicate = self.pattern[self.first];
                self.saved = duplicate;
                self.knowledge.confirm(self.first, duplicate);
                self.knowledge.confirm(self.second, duplicate);
                debug!(
                    first = self.first,
                    second = self.second,
                    color = %self.colors[duplicate],
                    "duplicate color settled both positions"
                );

                // Writing the duplicate into both positions left the pattern one occurrence
                // over; park the displaced color on another slot that holds the duplicate.
                self.advance_second_to(duplicate);
                self.pattern[self.second] = displaced;
                self.mode = Mode::EvaluatingDuplicateConfirmed;
            }
            0 => {
                let a = self.pattern[self.first];
                let b = self.pattern[self.second];
                self.knowledge.exclude(self.first, a);
                self.knowledge.exclude(self.first, b);
                self.knowledge.exclude(self.second, a);
                self.knowledge.exclude(self.second, b);
                self.mode = Mode::Idle;
                self.next_swap();
            }
            _ => panic!("exact-match delta {delta} is impossible for a duplicate diagnostic"),
        }
        self.render_pattern()
    }

    // Interprets the test placement of the displaced color on a slot that held the duplicated
    // color. +1 pins the displaced color there; -1 proves the duplicate belonged there after
    // all, so it is restored and the next candidate slot is probed; 0 rules both out.
    fn duplicate_placement_outcome(&mut self, exact: usize) -> String {
        let delta = exact as isize - self.last_exact as isize;
        match delta {
            1 => {
                self.last_exact = exact;
                self.knowledge.confirm(self.second, self.pattern[self.second]);
                self.mode = Mode::Idle;
                self.next_swap();
            }
            0 => {
                self.knowledge.exclude(self.second, self.pattern[self.second]);
                self.knowledge.exclude(self.second, self.saved);
                self.first = self.second;
                self.mode = Mode::Idle;
                self.next_swap();
            }
            -1 => {
                let displaced = self.pattern[self.second];
                self.pattern[self.second] = self.saved;
                self.knowledge.confirm(self.second, self.saved);
                self.advance_second_to(self.saved);
                self.pattern[self.second] = displaced;
                // Stay in this mode: the displaced color moves on to the next candidate slot.
            }
            _ => panic!("exact-match delta {delta} is impossible for a placement diagnostic"),
        }
        self.render_pattern()
    }

    // Marks the pattern's current color at every position as wrong. Only called when the last
    // guess scored zero exact matches, which proves all of its placements wrong at once.
    fn exclude_current_placements(&mut self) {
        for position in 0..self.board_length {
            let color = self.pattern[position];
            self.knowledge.exclude(position, color);
        }
    }

    // Advances `second` to the next unconfirmed position currently holding `color`.
    //
    // # Panics
    // Panics if no such position exists; the multiset accounting guarantees one whenever this
    // is called, so absence indicates a deduction fault.
    fn advance_second_to(&mut self, color: usize) {
        let length = self.board_length;
        for _ in 0..length {
            if self.pattern[self.second] == color && !self.knowledge.is_confirmed(self.second, color)
            {
                return;
            }
            self.second = (self.second + 1) % length;
        }
        panic!("no unconfirmed position holds color index {color}");
    }

    // Swaps the next valid pair of positions, if any. When the strict scan dead-ends, the
    // relaxed scan retries without requiring the outgoing assignment to be open; if even that
    // finds nothing the pattern is submitted unchanged (when every position is confirmed this
    // is the fully deduced answer).
    fn next_swap(&mut self) {
        if self.find_swap_pair(false) || self.find_swap_pair(true) {
            self.pattern.swap(self.first, self.second);
        } else {
            trace!("no swap candidates left; submitting current pattern");
        }
    }

    // Advances the cursors to the next valid swap pair, wrapping modulo the board length with a
    // full-cycle guard. `first` skips confirmed positions. Returns false when a complete sweep
    // finds no valid pair.
    fn find_swap_pair(&mut self, relaxed: bool) -> bool {
        let length = self.board_length;

        // Move the anchor off confirmed positions.
        let mut skipped = 0;
        while self.knowledge.is_confirmed(self.first, self.pattern[self.first]) {
            self.first = (self.first + 1) % length;
            skipped += 1;
            if skipped == length {
                return false; // every position is confirmed
            }
        }

        for _ in 0..length {
            for _ in 0..length {
                if self.valid_pair(self.first, self.second, relaxed) {
                    return true;
                }
                self.second = (self.second + 1) % length;
            }
            // Next anchor, again skipping confirmed positions. At least one unconfirmed
            // position exists, so this terminates.
            loop {
                self.first = (self.first + 1) % length;
                if !self.knowledge.is_confirmed(self.first, self.pattern[self.first]) {
                    break;
                }
            }
        }
        false
    }

    // A pair is worth swapping when the colors differ, `second` is not settled, and neither
    // cross assignment is already disproven. The relaxed form only requires the assignment
    // arriving at `first` to be open, which guarantees forward progress when sound exclusions
    // have fenced off every strict pair.
    fn valid_pair(&self, first: usize, second: usize, relaxed: bool) -> bool {
        let a = self.pattern[first];
        let b = self.pattern[second];
        a != b
            && !self.knowledge.is_confirmed(second, b)
            && !self.knowledge.is_excluded(first, b)
            && (relaxed || !self.knowledge.is_excluded(second, a))
    }
}

impl Default for PairwiseDeductionPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for PairwiseDeductionPlayer {
    fn name(&self) -> &str {
        "advanced pairwise deduction"
    }

    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &[char],
        _scsa_name: &str,
        feedback: Feedback,
    ) -> String {
        if feedback.guess_number == 0 {
            self.reset(board_length, colors);
            self.probed = 1;
            return self.monochrome(0);
        }

        let exact = feedback.exact;
        match self.mode {
            Mode::Discovery => self.discovery_step(exact),
            Mode::Arrange => self.arrange_step(exact),
            mode => {
                // A zero score proves every placement of the guessed arrangement wrong,
                // whichever sub-state produced it.
                if exact == 0 {
                    self.exclude_current_placements();
                }
                match mode {
                    Mode::ShiftAnneal => self.anneal_step(exact),
                    Mode::Idle => self.swap_outcome(exact),
                    Mode::EvaluatingSwap => self.swap_diagnostic_outcome(exact),
                    Mode::EvaluatingPossibleDuplicate => self.duplicate_probe_outcome(exact),
                    Mode::EvaluatingDuplicateConfirmed => self.duplicate_placement_outcome(exact),
                    Mode::Discovery | Mode::Arrange => unreachable!(),
                }
            }
        }
    }
}
