// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the progression tracker and viewers
//!
//! These tests verify the critical invariants:
//! 1. Level is always derived from total XP (flat 100 per level)
//! 2. The badge set only ever grows
//! 3. Viewer cursors never leave their bounds

use codexflow::progression::{Badge, BadgeRules, LearningEvent, Progression};
use codexflow::viewers::lesson::LessonWalker;
use codexflow::viewers::quiz::answer_award;
use proptest::prelude::*;

/// An action against the tracker, for random sequences
#[derive(Debug, Clone)]
enum TrackerOp {
    Grant(u32),
    Incorrect,
}

fn tracker_ops() -> impl Strategy<Value = Vec<TrackerOp>> {
    prop::collection::vec(
        prop_oneof![
            (1u32..=500).prop_map(TrackerOp::Grant),
            Just(TrackerOp::Incorrect),
        ],
        0..64,
    )
}

proptest! {
    #[test]
    fn prop_level_always_derived_from_xp(ops in tracker_ops()) {
        let mut tracker = Progression::new();
        for op in &ops {
            match op {
                TrackerOp::Grant(amount) => { tracker.grant_xp(*amount); }
                TrackerOp::Incorrect => tracker.record_incorrect_answer(),
            }
            prop_assert_eq!(tracker.level(), tracker.xp() / 100 + 1);
        }
    }

    #[test]
    fn prop_xp_and_level_are_monotonic(ops in tracker_ops()) {
        let mut tracker = Progression::new();
        let (mut last_xp, mut last_level) = (tracker.xp(), tracker.level());
        for op in &ops {
            match op {
                TrackerOp::Grant(amount) => { tracker.grant_xp(*amount); }
                TrackerOp::Incorrect => tracker.record_incorrect_answer(),
            }
            prop_assert!(tracker.xp() >= last_xp);
            prop_assert!(tracker.level() >= last_level);
            last_xp = tracker.xp();
            last_level = tracker.level();
        }
    }

    #[test]
    fn prop_streak_counts_grants_since_last_incorrect(ops in tracker_ops()) {
        let mut tracker = Progression::new();
        let mut expected = 0u32;
        for op in &ops {
            match op {
                TrackerOp::Grant(amount) => {
                    tracker.grant_xp(*amount);
                    expected += 1;
                }
                TrackerOp::Incorrect => {
                    tracker.record_incorrect_answer();
                    expected = 0;
                }
            }
            prop_assert_eq!(tracker.streak(), expected);
        }
    }

    #[test]
    fn prop_badge_set_never_shrinks(ops in tracker_ops()) {
        let rules = BadgeRules::standard();
        let mut tracker = Progression::new();
        let mut last_count = 0;
        for op in &ops {
            let event = match op {
                TrackerOp::Grant(amount) => {
                    tracker.grant_xp(*amount);
                    LearningEvent::AnswerCorrect
                }
                TrackerOp::Incorrect => {
                    tracker.record_incorrect_answer();
                    LearningEvent::AnswerIncorrect
                }
            };
            for badge in rules.evaluate(&tracker, &event) {
                tracker.unlock_badge(badge);
            }
            prop_assert!(tracker.badges().len() >= last_count);
            last_count = tracker.badges().len();
        }
    }

    #[test]
    fn prop_unlock_is_idempotent(badge_index in 0usize..4) {
        let badge = Badge::catalog()[badge_index];
        let mut tracker = Progression::new();
        prop_assert!(tracker.unlock_badge(badge));
        prop_assert!(!tracker.unlock_badge(badge));
        prop_assert_eq!(tracker.badges().len(), 1);
    }

    #[test]
    fn prop_answer_award_bounded(streak in 0u32..1000) {
        let award = answer_award(streak);
        prop_assert!(award >= 20);
        prop_assert!(award <= 25);
    }

    #[test]
    fn prop_lesson_cursor_stays_in_bounds(
        total in 0usize..20,
        steps in prop::collection::vec(any::<bool>(), 0..100),
    ) {
        let mut walker = LessonWalker::new(total);
        for forward in steps {
            if forward {
                walker.next();
            } else {
                walker.previous();
            }
            if total == 0 {
                prop_assert_eq!(walker.index(), 0);
            } else {
                prop_assert!(walker.index() < total);
            }
        }
    }
}
