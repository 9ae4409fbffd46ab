// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! HTTP client for the remote analysis service
//!
//! One request, one response: `POST /analyze` with the repository URL and
//! file path, returning the full lesson payload. Failures collapse into
//! [`ServiceError`]; callers present a single generic message and must not
//! retry automatically.

use crate::types::{AnalysisResult, AnalyzeRequest};
use std::time::Duration;
use tracing::debug;

/// Default analysis endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Errors from the analysis path.
///
/// The orchestrator flattens all of these into one user-visible message;
/// the structured detail is for the log only.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Empty repository URL or file path
    #[error("repository URL and file path must not be empty")]
    EmptyInput,

    /// Could not reach the service at all
    #[error("analysis service unreachable")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status
    #[error("analysis service returned status {0}")]
    Status(u16),

    /// The response body did not parse as an analysis result
    #[error("analysis service returned a malformed response")]
    MalformedBody(#[source] reqwest::Error),
}

/// Blocking client for the analysis service
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl AnalysisClient {
    /// Create a client for `endpoint` with the given request timeout.
    ///
    /// The remote analysis runs LLM passes over the file and can take a
    /// while; pick the timeout from configuration, not a reflex.
    pub fn new(endpoint: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The configured endpoint, without a trailing slash
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one analysis call.
    ///
    /// Sends exactly one request; every call re-executes the remote
    /// analysis in full. No caching, no retry.
    pub fn analyze(
        &self,
        repo_url: &str,
        file_path: &str,
    ) -> Result<AnalysisResult, ServiceError> {
        if repo_url.trim().is_empty() || file_path.trim().is_empty() {
            return Err(ServiceError::EmptyInput);
        }

        let request = AnalyzeRequest {
            repo_url: repo_url.to_string(),
            file_path: file_path.to_string(),
        };

        debug!(url = %self.endpoint, file = %file_path, "sending analysis request");

        let response = self
            .http
            .post(format!("{}/analyze", self.endpoint))
            .json(&request)
            .send()
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "analysis request rejected");
            return Err(ServiceError::Status(status.as_u16()));
        }

        response.json().map_err(ServiceError::MalformedBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnalysisClient {
        AnalysisClient::new(DEFAULT_ENDPOINT, 5).unwrap()
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let c = client();
        assert!(matches!(
            c.analyze("", "src/main.rs"),
            Err(ServiceError::EmptyInput)
        ));
        assert!(matches!(
            c.analyze("https://github.com/a/b", "   "),
            Err(ServiceError::EmptyInput)
        ));
    }

    #[test]
    fn test_endpoint_trailing_slash_normalized() {
        let c = AnalysisClient::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(c.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_request_body_shape() {
        let request = AnalyzeRequest {
            repo_url: "https://github.com/a/b".into(),
            file_path: "src/lib.rs".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["repo_url"], "https://github.com/a/b");
        assert_eq!(json["file_path"], "src/lib.rs");
    }

    #[test]
    fn test_response_parsing_defaults() {
        // A sparse but well-formed body must parse to empty collections,
        // never an error.
        let result: AnalysisResult = serde_json::from_str(
            r#"{"graph": {"nodes": [], "edges": []}, "chapters": [], "quiz": []}"#,
        )
        .unwrap();
        assert!(result.chapters.is_empty());
        assert!(result.quiz.is_empty());
        assert!(result.graph.nodes.is_empty());
    }
}
