// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Quiz runner - one answer per question, streak-sized XP awards
//!
//! The runner is a cursor plus scorekeeping; the question data itself stays
//! in the analysis result and is passed in per call. After an answer the
//! orchestrator shows feedback for a fixed delay, then calls [`QuizRunner::advance`].

use crate::types::QuizQuestion;
use std::time::Duration;

/// Base XP for a correct answer
pub const BASE_ANSWER_XP: u32 = 20;

/// Extra XP per consecutive correct answer already on the local streak
pub const STREAK_BONUS_STEP: u32 = 5;

/// Hard cap on a single answer's award, regardless of streak length
pub const MAX_ANSWER_XP: u32 = 25;

/// Flat bonus for answering every question correctly
pub const PERFECT_BONUS_XP: u32 = 100;

/// Feedback window before the runner auto-advances
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Outcome of an answer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct; carries the XP award for this answer
    Correct {
        /// XP to grant for this answer
        xp: u32,
    },
    /// Incorrect; the local streak was reset
    Incorrect,
    /// Ignored: already answered, unknown option id, or not in a
    /// question state
    Ignored,
}

/// Outcome of an auto-advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAdvance {
    /// Moved to the next question
    NextQuestion,
    /// Entered the terminal summary state
    Summary {
        /// Final score
        score: u32,
        /// Whether every question was answered correctly
        perfect: bool,
    },
}

/// Per-attempt quiz state.
///
/// Each question is answered at most once; the summary state is terminal
/// until [`QuizRunner::retake`], which resets the attempt but never touches
/// progression state already granted.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    index: usize,
    total: usize,
    score: u32,
    streak: u32,
    selected: Option<String>,
    summary: bool,
}

/// Award for a correct answer given the local streak before it.
///
/// Saturates at [`MAX_ANSWER_XP`]: 20, 25, 25, ... for an unbroken run.
#[must_use]
pub fn answer_award(streak_before: u32) -> u32 {
    (BASE_ANSWER_XP + streak_before * STREAK_BONUS_STEP).min(MAX_ANSWER_XP)
}

impl QuizRunner {
    /// Runner over `total` questions, all unanswered
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total,
            score: 0,
            streak: 0,
            selected: None,
            summary: false,
        }
    }

    /// Current question index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of questions
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Questions answered correctly so far this attempt
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Local consecutive-correct counter
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Whether there are no questions to run
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The option selected for the current question, if answered
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether the current question has been answered
    #[must_use]
    pub fn answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Whether the runner is in its terminal summary state
    #[must_use]
    pub fn in_summary(&self) -> bool {
        self.summary
    }

    /// Answer the current question with `option_id`.
    ///
    /// Valid only while the question is unanswered; later calls (and
    /// option ids that do not exist on the question) are ignored, so a
    /// question can never be answered twice.
    pub fn answer(&mut self, question: &QuizQuestion, option_id: &str) -> AnswerOutcome {
        if self.summary || self.is_empty() || self.answered() {
            return AnswerOutcome::Ignored;
        }
        if !question.options.iter().any(|o| o.id == option_id) {
            return AnswerOutcome::Ignored;
        }

        self.selected = Some(option_id.to_string());

        if question.is_correct(option_id) {
            let xp = answer_award(self.streak);
            self.score += 1;
            self.streak += 1;
            AnswerOutcome::Correct { xp }
        } else {
            self.streak = 0;
            AnswerOutcome::Incorrect
        }
    }

    /// Move past an answered question.
    ///
    /// Returns `None` while the current question is still open (there is
    /// nothing to advance past) or once the summary has been reached.
    pub fn advance(&mut self) -> Option<QuizAdvance> {
        if self.summary || !self.answered() {
            return None;
        }

        self.selected = None;

        if self.index + 1 < self.total {
            self.index += 1;
            Some(QuizAdvance::NextQuestion)
        } else {
            self.summary = true;
            let perfect = self.total > 0 && self.score as usize == self.total;
            Some(QuizAdvance::Summary {
                score: self.score,
                perfect,
            })
        }
    }

    /// Reset the attempt: score, answered flags and local streak go back
    /// to initial. Progression gains from prior attempts stay granted.
    pub fn retake(&mut self) {
        self.index = 0;
        self.score = 0;
        self.streak = 0;
        self.selected = None;
        self.summary = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuizOption;

    fn make_question(answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: "What does this function return?".into(),
            options: vec![
                QuizOption {
                    id: "a".into(),
                    text: "A parsed tree".into(),
                },
                QuizOption {
                    id: "b".into(),
                    text: "Nothing".into(),
                },
                QuizOption {
                    id: "c".into(),
                    text: "An error".into(),
                },
            ],
            answer: answer.into(),
        }
    }

    #[test]
    fn test_award_sequence_saturates_at_25() {
        assert_eq!(answer_award(0), 20);
        assert_eq!(answer_award(1), 25);
        assert_eq!(answer_award(2), 25);
        assert_eq!(answer_award(10), 25);
    }

    #[test]
    fn test_three_correct_answers_total_170_with_bonus() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(3);
        let mut granted = Vec::new();

        for _ in 0..3 {
            match runner.answer(&question, "a") {
                AnswerOutcome::Correct { xp } => granted.push(xp),
                other => panic!("expected correct answer, got {other:?}"),
            }
            match runner.advance() {
                Some(QuizAdvance::Summary { score, perfect }) => {
                    assert_eq!(score, 3);
                    assert!(perfect);
                    granted.push(PERFECT_BONUS_XP);
                }
                Some(QuizAdvance::NextQuestion) => {}
                None => panic!("advance ignored after answer"),
            }
        }

        assert_eq!(granted, vec![20, 25, 25, 100]);
        assert_eq!(granted.iter().sum::<u32>(), 170);
    }

    #[test]
    fn test_incorrect_resets_streak_and_next_correct_is_base() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(4);

        assert_eq!(
            runner.answer(&question, "a"),
            AnswerOutcome::Correct { xp: 20 }
        );
        runner.advance();
        assert_eq!(
            runner.answer(&question, "a"),
            AnswerOutcome::Correct { xp: 25 }
        );
        runner.advance();

        assert_eq!(runner.answer(&question, "b"), AnswerOutcome::Incorrect);
        assert_eq!(runner.streak(), 0);
        runner.advance();

        assert_eq!(
            runner.answer(&question, "a"),
            AnswerOutcome::Correct { xp: 20 }
        );
    }

    #[test]
    fn test_second_answer_is_ignored() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(1);

        assert_eq!(runner.answer(&question, "b"), AnswerOutcome::Incorrect);
        let (score, streak) = (runner.score(), runner.streak());

        assert_eq!(runner.answer(&question, "a"), AnswerOutcome::Ignored);
        assert_eq!(runner.score(), score);
        assert_eq!(runner.streak(), streak);
        assert_eq!(runner.selected(), Some("b"));
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(1);
        assert_eq!(runner.answer(&question, "z"), AnswerOutcome::Ignored);
        assert!(!runner.answered());
    }

    #[test]
    fn test_imperfect_run_has_no_bonus() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(2);

        runner.answer(&question, "b");
        runner.advance();
        runner.answer(&question, "a");
        match runner.advance() {
            Some(QuizAdvance::Summary { score, perfect }) => {
                assert_eq!(score, 1);
                assert!(!perfect);
            }
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn test_advance_without_answer_is_ignored() {
        let mut runner = QuizRunner::new(2);
        assert_eq!(runner.advance(), None);
        assert_eq!(runner.index(), 0);
    }

    #[test]
    fn test_retake_resets_attempt_only() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(1);

        runner.answer(&question, "a");
        runner.advance();
        assert!(runner.in_summary());

        runner.retake();
        assert!(!runner.in_summary());
        assert_eq!(runner.score(), 0);
        assert_eq!(runner.streak(), 0);
        assert_eq!(runner.index(), 0);
        assert!(!runner.answered());
    }

    #[test]
    fn test_empty_quiz_is_inert() {
        let question = make_question("a");
        let mut runner = QuizRunner::new(0);
        assert_eq!(runner.answer(&question, "a"), AnswerOutcome::Ignored);
        assert_eq!(runner.advance(), None);
    }
}
