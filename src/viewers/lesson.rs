// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Lesson walker - linear cursor over the generated chapters

/// Cursor over an ordered chapter sequence.
///
/// `next` and `previous` are no-ops at the boundaries; there is no
/// wraparound and no error. Finishing the lesson is an explicit action,
/// distinct from stepping, and only available on the last chapter.
#[derive(Debug, Clone)]
pub struct LessonWalker {
    index: usize,
    total: usize,
    finished: bool,
}

impl LessonWalker {
    /// Walker over `total` chapters, starting at the first
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total,
            finished: false,
        }
    }

    /// Current chapter index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of chapters
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether there are no chapters to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether the cursor is on the first chapter
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Whether the cursor is on the last chapter
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.index == self.total - 1
    }

    /// Whether the explicit finish action has fired
    #[must_use]
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Advance one chapter; no-op on the last
    pub fn next(&mut self) {
        if self.total > 0 && self.index < self.total - 1 {
            self.index += 1;
        }
    }

    /// Retreat one chapter; no-op on the first
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Explicit finish action. Fires only on the last chapter of a
    /// non-empty lesson, and only once; returns whether it fired.
    pub fn finish(&mut self) -> bool {
        if self.is_last() && !self.finished {
            self.finished = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut walker = LessonWalker::new(3);
        walker.previous();
        assert_eq!(walker.index(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut walker = LessonWalker::new(2);
        walker.next();
        walker.next();
        walker.next();
        assert_eq!(walker.index(), 1);
        assert!(!walker.finished());
    }

    #[test]
    fn test_finish_only_on_last_chapter() {
        let mut walker = LessonWalker::new(3);
        assert!(!walker.finish());
        walker.next();
        walker.next();
        assert!(walker.is_last());
        assert!(walker.finish());
        assert!(walker.finished());
        // Second finish does not fire again.
        assert!(!walker.finish());
    }

    #[test]
    fn test_empty_lesson_never_finishes() {
        let mut walker = LessonWalker::new(0);
        assert!(walker.is_empty());
        assert!(!walker.is_last());
        assert!(!walker.finish());
        walker.next();
        assert_eq!(walker.index(), 0);
    }
}
