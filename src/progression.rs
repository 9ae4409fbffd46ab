// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Session progression: experience points, levels, streaks and badges
//!
//! Pure state machine with a single mutation surface. The TUI owns one
//! [`Progression`] per session, applies viewer events to it, and passes
//! immutable snapshots down to the render code. Nothing here is persisted;
//! the session state dies with the process.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Experience points per level. Level is always derived as
/// `xp / XP_PER_LEVEL + 1`, so a single grant that crosses two boundaries
/// raises the level by two.
pub const XP_PER_LEVEL: u32 = 100;

/// XP granted for the first successful analysis of the session
pub const FIRST_ANALYSIS_XP: u32 = 50;

/// XP granted for working through the whole flashcard deck
pub const DECK_COMPLETED_XP: u32 = 50;

// =============================================================================
// Badges
// =============================================================================

/// Permanent, idempotent achievement flags
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// First successful analysis call
    FirstAnalysis,
    /// Session streak reached 5
    StreakMaster,
    /// In the catalog with no bound rule yet
    Scholar,
    /// In the catalog with no bound rule yet
    QuizWiz,
}

impl Badge {
    /// Stable identifier, as used on the wire and in the rule table
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::FirstAnalysis => "first_analysis",
            Self::StreakMaster => "streak_master",
            Self::Scholar => "scholar",
            Self::QuizWiz => "quiz_wiz",
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstAnalysis => "Explorer",
            Self::StreakMaster => "On Fire!",
            Self::Scholar => "Scholar",
            Self::QuizWiz => "Quiz Wiz",
        }
    }

    /// Short description shown next to the badge
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstAnalysis => "Analyzed your first repository file",
            Self::StreakMaster => "Kept a streak of five going",
            Self::Scholar => "Finished every chapter of a lesson",
            Self::QuizWiz => "Aced a knowledge check",
        }
    }

    /// The full curated badge catalog, in display order
    #[must_use]
    pub fn catalog() -> [Self; 4] {
        [
            Self::FirstAnalysis,
            Self::StreakMaster,
            Self::Scholar,
            Self::QuizWiz,
        ]
    }
}

// =============================================================================
// Events
// =============================================================================

/// Events the viewers and orchestrator feed into the progression layer.
///
/// Badge rules are keyed on these, so new unlock conditions can be added
/// to [`BadgeRules`] without touching any viewer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningEvent {
    /// An analysis request completed successfully
    AnalysisSucceeded,
    /// The lesson walker's explicit finish action fired on the last chapter
    LessonFinished,
    /// The flashcard deck was exhausted
    DeckCompleted,
    /// A quiz question was answered correctly
    AnswerCorrect,
    /// A quiz question was answered incorrectly
    AnswerIncorrect,
    /// The quiz reached its summary state
    QuizCompleted {
        /// Whether every question was answered correctly
        perfect: bool,
    },
}

// =============================================================================
// Progression state
// =============================================================================

/// Result of one XP grant, for the UI to celebrate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    /// XP added by this grant
    pub amount: u32,
    /// Levels gained by this grant (0 for most grants, can exceed 1)
    pub levels_gained: u32,
}

/// Session-scoped gamification state.
///
/// `xp` and `level` are monotonic; `level` is always derived from `xp`;
/// badges are add-only. The streak is a session counter of consecutive
/// XP-granting actions, zeroed by incorrect quiz answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    xp: u32,
    level: u32,
    streak: u32,
    badges: BTreeSet<Badge>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Fresh session state: 0 XP, level 1, no streak, no badges
    #[must_use]
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            badges: BTreeSet::new(),
        }
    }

    /// Total experience points
    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// Current level (>= 1)
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current streak of consecutive XP-granting actions
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Badges unlocked so far, in catalog order
    #[must_use]
    pub fn badges(&self) -> &BTreeSet<Badge> {
        &self.badges
    }

    /// Whether `badge` has been unlocked
    #[must_use]
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    /// Add `amount` XP and bump the streak.
    ///
    /// The level is rederived from the new total, so one grant can raise
    /// it by more than one.
    pub fn grant_xp(&mut self, amount: u32) -> XpGain {
        self.xp += amount;
        let new_level = self.xp / XP_PER_LEVEL + 1;
        let levels_gained = new_level - self.level;
        self.level = new_level;
        self.streak += 1;
        XpGain {
            amount,
            levels_gained,
        }
    }

    /// Zero the streak. XP and level are untouched.
    pub fn record_incorrect_answer(&mut self) {
        self.streak = 0;
    }

    /// Unlock `badge`. Returns `true` only the first time.
    pub fn unlock_badge(&mut self, badge: Badge) -> bool {
        self.badges.insert(badge)
    }

    /// Cumulative XP threshold at which the next level starts
    #[must_use]
    pub fn xp_for_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    /// Progress through the current level, 0.0..=1.0
    #[must_use]
    pub fn level_progress(&self) -> f64 {
        f64::from(self.xp % XP_PER_LEVEL) / f64::from(XP_PER_LEVEL)
    }
}

// =============================================================================
// Badge rules
// =============================================================================

/// A single unlock rule: fires when its predicate holds for the state
/// after an event has been applied.
pub type BadgeRule = fn(&Progression, &LearningEvent) -> bool;

/// Capability table mapping badges to unlock rules.
///
/// The orchestrator evaluates the table after every event. Badges with no
/// entry (`scholar`, `quiz_wiz`) stay locked until a rule is registered
/// here; no unlock check lives anywhere else.
pub struct BadgeRules {
    rules: Vec<(Badge, BadgeRule)>,
}

impl Default for BadgeRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl BadgeRules {
    /// The standard rule set
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: vec![
                (Badge::FirstAnalysis, |_, event| {
                    matches!(event, LearningEvent::AnalysisSucceeded)
                }),
                (Badge::StreakMaster, |state, _| state.streak() >= 5),
            ],
        }
    }

    /// An empty table, for callers that wire their own rules
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an additional rule
    pub fn register(&mut self, badge: Badge, rule: BadgeRule) {
        self.rules.push((badge, rule));
    }

    /// Badges whose rule fires for `event` against `state` and that are
    /// not yet unlocked. The caller applies the unlocks.
    #[must_use]
    pub fn evaluate(&self, state: &Progression, event: &LearningEvent) -> Vec<Badge> {
        self.rules
            .iter()
            .filter(|(badge, rule)| !state.has_badge(*badge) && rule(state, event))
            .map(|(badge, _)| *badge)
            .collect()
    }
}
