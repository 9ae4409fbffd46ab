// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Flashcard flipper - question on the front, designated answer on the back

/// Outcome of an advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAdvance {
    /// Moved to the next card
    Moved,
    /// The deck was exhausted just now; fires exactly once
    Completed,
    /// Already exhausted (or empty); nothing happened
    Exhausted,
}

/// Cursor over the question/answer pairs of the quiz data.
///
/// Each card is either unflipped (question side) or flipped (answer side).
/// Advancing always lands on the question side of the next card; the deck
/// never wraps.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    index: usize,
    total: usize,
    flipped: bool,
    completed: bool,
}

impl FlashcardDeck {
    /// Deck over `total` cards, first card question-side up
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total,
            flipped: false,
            completed: false,
        }
    }

    /// Current card index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cards
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether there are no cards to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether the current card shows its answer side
    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Whether the deck has been exhausted
    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Toggle the current card between question and answer side
    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Reset to the question side and move on.
    ///
    /// Returns [`DeckAdvance::Completed`] exactly once, when the last card
    /// is advanced past; an empty deck only ever reports `Exhausted`.
    pub fn advance(&mut self) -> DeckAdvance {
        self.flipped = false;

        if self.is_empty() || self.completed {
            return DeckAdvance::Exhausted;
        }

        if self.index + 1 < self.total {
            self.index += 1;
            DeckAdvance::Moved
        } else {
            self.completed = true;
            DeckAdvance::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_toggles() {
        let mut deck = FlashcardDeck::new(2);
        assert!(!deck.flipped());
        deck.flip();
        assert!(deck.flipped());
        deck.flip();
        assert!(!deck.flipped());
    }

    #[test]
    fn test_advance_resets_flip() {
        let mut deck = FlashcardDeck::new(3);
        deck.flip();
        assert_eq!(deck.advance(), DeckAdvance::Moved);
        assert!(!deck.flipped());
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn test_completion_fires_once_and_never_wraps() {
        let mut deck = FlashcardDeck::new(2);
        assert_eq!(deck.advance(), DeckAdvance::Moved);
        assert_eq!(deck.advance(), DeckAdvance::Completed);
        assert!(deck.completed());
        assert_eq!(deck.index(), 1);
        // No wraparound, no second completion event.
        assert_eq!(deck.advance(), DeckAdvance::Exhausted);
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut deck = FlashcardDeck::new(0);
        deck.flip();
        assert!(!deck.flipped());
        assert_eq!(deck.advance(), DeckAdvance::Exhausted);
        assert!(!deck.completed());
    }
}
