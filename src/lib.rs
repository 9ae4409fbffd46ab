// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Codexflow library - interactive code onboarding engine
//!
//! This crate provides the client-side core for turning a single repository
//! file into a guided lesson: one call to the remote analysis service, then
//! local viewers (lesson, flashcards, quiz, graph) over the returned data,
//! with a session-scoped progression tracker for XP, levels, streaks and
//! badges.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod commands;
pub mod config;
pub mod graph;
pub mod progression;
pub mod tui;
pub mod viewers;

/// Core data types matching the analysis service contract
pub mod types {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    // =========================================================================
    // Request
    // =========================================================================

    /// Body of the `POST /analyze` request
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AnalyzeRequest {
        /// Repository URL to analyze
        pub repo_url: String,
        /// Path of the file to build the lesson from, relative to the repo root
        pub file_path: String,
    }

    // =========================================================================
    // Graph
    // =========================================================================

    /// Position in 2D space (layout hint only, never semantic)
    #[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    /// A node in the dependency graph returned by the service
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GraphNode {
        /// Service-assigned node identifier
        pub id: String,
        /// Node kind as reported by the service ("function", "class", ...)
        #[serde(rename = "type")]
        pub node_type: String,
        /// Display label; falls back to the id when absent
        pub label: Option<String>,
        /// Layout hint from the service
        #[serde(default)]
        pub position: Position,
        /// Opaque extra payload
        #[serde(default)]
        pub data: HashMap<String, serde_json::Value>,
    }

    impl GraphNode {
        /// Best display name for this node
        #[must_use]
        pub fn display_label(&self) -> &str {
            self.label.as_deref().unwrap_or(&self.id)
        }
    }

    /// A directed edge between two graph nodes
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GraphEdge {
        /// Service-assigned edge identifier
        pub id: String,
        /// Source node id
        pub source: String,
        /// Target node id
        pub target: String,
        /// Human-readable label
        pub label: Option<String>,
    }

    /// Node and edge lists for the dependency graph
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct GraphData {
        /// All nodes
        #[serde(default)]
        pub nodes: Vec<GraphNode>,
        /// All edges
        #[serde(default)]
        pub edges: Vec<GraphEdge>,
    }

    // =========================================================================
    // Lesson
    // =========================================================================

    /// One chapter of the generated walkthrough
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Chapter {
        /// Chapter heading
        pub title: String,
        /// Chapter body text
        pub content: String,
    }

    // =========================================================================
    // Quiz
    // =========================================================================

    /// A single answer option
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct QuizOption {
        /// Option identifier ("a".."d" in practice)
        pub id: String,
        /// Option text
        pub text: String,
    }

    /// A multiple-choice question with exactly one designated answer
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct QuizQuestion {
        /// Question text
        pub question: String,
        /// Answer options
        #[serde(default)]
        pub options: Vec<QuizOption>,
        /// Id of the correct option
        pub answer: String,
    }

    impl QuizQuestion {
        /// The designated correct option, if the id resolves
        #[must_use]
        pub fn correct_option(&self) -> Option<&QuizOption> {
            self.options.iter().find(|o| o.id == self.answer)
        }

        /// Whether `option_id` names the correct option
        #[must_use]
        pub fn is_correct(&self, option_id: &str) -> bool {
            self.answer == option_id
        }
    }

    // =========================================================================
    // Analysis result
    // =========================================================================

    /// The complete response of the analysis service.
    ///
    /// Immutable once received; replaced wholesale on a new analysis.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct AnalysisResult {
        /// Dependency graph of the analyzed file
        #[serde(default)]
        pub graph: GraphData,
        /// Lesson chapters
        #[serde(default)]
        pub chapters: Vec<Chapter>,
        /// Quiz questions
        #[serde(default)]
        pub quiz: Vec<QuizQuestion>,
    }

    /// An analysis result together with what was asked for and when
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AnalysisSession {
        /// Repository URL the lesson was built from
        pub repo_url: String,
        /// File path the lesson was built from
        pub file_path: String,
        /// When the result was fetched
        pub fetched_at: DateTime<Utc>,
        /// The service response
        pub result: AnalysisResult,
    }

    impl AnalysisSession {
        /// Wrap a fresh service response
        #[must_use]
        pub fn new(repo_url: String, file_path: String, result: AnalysisResult) -> Self {
            Self {
                repo_url,
                file_path,
                fetched_at: Utc::now(),
                result,
            }
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
