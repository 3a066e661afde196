//! Positional knowledge accumulated by the deduction player
//!
//! This module tracks what the player has proven about the secret so far: a tri-state marking
//! for every `(position, color)` pair and, for each color, how many of its occurrences in the
//! working pattern have not yet been pinned down.
//!
//! The markings only ever strengthen. A pair moves from [`Marking::Unknown`] to either
//! [`Marking::Excluded`] or [`Marking::Confirmed`] and then never changes again; a contradictory
//! rewrite indicates a deduction bug and is rejected by debug assertions.

/// What is known about one `(position, color)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marking {
    /// Nothing proven yet.
    #[default]
    Unknown,
    /// The color is proven wrong for the position.
    Excluded,
    /// The color is proven correct for the position.
    Confirmed,
}

/// Knowledge grid plus per-color budgets.
///
/// Positions are `0..board_length` and colors are alphabet indices `0..num_colors`. The budget
/// of a color is the number of its occurrences in the working pattern that are not yet confirmed;
/// the sum of all budgets always equals `board_length` minus the number of confirmed positions.
#[derive(Debug, Clone)]
pub struct Knowledge {
    /// Marking for every position and color, indexed `[position][color]`.
    info: Vec<Vec<Marking>>,
    /// Remaining unconfirmed occurrences per color.
    remaining: Vec<usize>,
    /// Number of positions with a confirmed color.
    confirmed_positions: usize,
}

impl Knowledge {
    /// Creates an empty grid for the given board and alphabet sizes.
    ///
    /// All markings start as [`Marking::Unknown`] and all budgets at zero; budgets are filled in
    /// by the discovery phase via [`set_remaining`](Knowledge::set_remaining).
    pub fn new(board_length: usize, num_colors: usize) -> Self {
        Self {
            info: vec![vec![Marking::Unknown; num_colors]; board_length],
            remaining: vec![0; num_colors],
            confirmed_positions: 0,
        }
    }

    /// Returns the marking for a `(position, color)` pair.
    pub fn marking(&self, position: usize, color: usize) -> Marking {
        self.info[position][color]
    }

    /// Returns `true` if the color is proven wrong for the position.
    pub fn is_excluded(&self, position: usize, color: usize) -> bool {
        self.info[position][color] == Marking::Excluded
    }

    /// Returns `true` if the color is proven correct for the position.
    pub fn is_confirmed(&self, position: usize, color: usize) -> bool {
        self.info[position][color] == Marking::Confirmed
    }

    /// Marks a color as wrong for a position. Idempotent.
    ///
    /// # Panics
    /// Debug builds panic if the pair was already confirmed; excluding a confirmed pair can only
    /// come from an unsound deduction.
    pub fn exclude(&mut self, position: usize, color: usize) {
        debug_assert!(
            self.info[position][color] != Marking::Confirmed,
            "excluding a confirmed pair (position {position}, color {color})"
        );
        self.info[position][color] = Marking::Excluded;
    }

    /// Marks a color as correct for a position and consumes one unit of its budget.
    ///
    /// # Panics
    /// Debug builds panic if the pair was already excluded or confirmed, if another color was
    /// already confirmed at the position, or if the color's budget is exhausted.
    pub fn confirm(&mut self, position: usize, color: usize) {
        debug_assert!(
            self.info[position][color] == Marking::Unknown,
            "re-marking (position {position}, color {color}) as confirmed"
        );
        debug_assert!(
            !self.info[position].contains(&Marking::Confirmed),
            "position {position} already has a confirmed color"
        );
        debug_assert!(
            self.remaining[color] > 0,
            "budget underflow for color {color}"
        );
        self.info[position][color] = Marking::Confirmed;
        self.remaining[color] -= 1;
        self.confirmed_positions += 1;
    }

    /// Sets the budget for a color. Called once per color as discovery finds its count.
    pub fn set_remaining(&mut self, color: usize, count: usize) {
        self.remaining[color] = count;
    }

    /// Returns the remaining unconfirmed occurrence count for a color.
    pub fn remaining(&self, color: usize) -> usize {
        self.remaining[color]
    }

    /// Returns the number of positions with a confirmed color.
    pub fn confirmed_positions(&self) -> usize {
        self.confirmed_positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_starts_unknown() {
        let knowledge = Knowledge::new(4, 3);
        for position in 0..4 {
            for color in 0..3 {
                assert_eq!(knowledge.marking(position, color), Marking::Unknown);
                assert!(!knowledge.is_excluded(position, color));
                assert!(!knowledge.is_confirmed(position, color));
            }
        }
        assert_eq!(knowledge.confirmed_positions(), 0);
    }

    #[test]
    fn test_knowledge_exclude_is_idempotent() {
        let mut knowledge = Knowledge::new(3, 2);
        knowledge.exclude(1, 0);
        knowledge.exclude(1, 0);
        assert!(knowledge.is_excluded(1, 0));
        assert_eq!(knowledge.marking(1, 1), Marking::Unknown);
    }

    #[test]
    fn test_knowledge_confirm_consumes_budget() {
        let mut knowledge = Knowledge::new(3, 2);
        knowledge.set_remaining(0, 2);
        knowledge.set_remaining(1, 1);

        knowledge.confirm(0, 0);
        assert!(knowledge.is_confirmed(0, 0));
        assert_eq!(knowledge.remaining(0), 1);
        assert_eq!(knowledge.confirmed_positions(), 1);

        knowledge.confirm(2, 1);
        assert_eq!(knowledge.remaining(1), 0);
        assert_eq!(knowledge.confirmed_positions(), 2);
    }

    #[test]
    fn test_knowledge_budget_sum_matches_unconfirmed() {
        let mut knowledge = Knowledge::new(4, 3);
        knowledge.set_remaining(0, 2);
        knowledge.set_remaining(1, 1);
        knowledge.set_remaining(2, 1);

        let total: usize = (0..3).map(|c| knowledge.remaining(c)).sum();
        assert_eq!(total, 4 - knowledge.confirmed_positions());

        knowledge.confirm(3, 0);
        let total: usize = (0..3).map(|c| knowledge.remaining(c)).sum();
        assert_eq!(total, 4 - knowledge.confirmed_positions());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "budget underflow")]
    fn test_knowledge_confirm_without_budget_panics() {
        let mut knowledge = Knowledge::new(2, 2);
        knowledge.confirm(0, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "excluding a confirmed pair")]
    fn test_knowledge_contradictory_exclude_panics() {
        let mut knowledge = Knowledge::new(2, 2);
        knowledge.set_remaining(1, 1);
        knowledge.confirm(0, 1);
        knowledge.exclude(0, 1);
    }
}
