// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for the pull request endpoints of the GitHub REST API.

use log::debug;
use reqwest::{
    blocking::{Client, Response},
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{args::CheckArgs, config::Settings};

/// Number of changed files requested per page (maximum allowed by the API).
const FILES_PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid repository '{0}', expected 'owner/name'")]
    InvalidRepository(String),

    #[error("invalid pull request number '{0}'")]
    InvalidNumber(String),

    #[error("invalid GitHub token")]
    InvalidToken,
}

/// Pull request to review, with the token used to access it.
pub struct PullRequest {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    token: String,
}

impl PullRequest {
    pub fn new(token: &str, repository: &str, number: &str) -> Result<Self, GithubError> {
        let (owner, repo) = repository
            .trim()
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| GithubError::InvalidRepository(repository.to_string()))?;
        let number = number
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| GithubError::InvalidNumber(number.to_string()))?;
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            token: token.trim().to_string(),
        })
    }

    /// Build the pull request from command-line arguments (or environment).
    ///
    /// `None` is returned if the token, the repository or the pull request number is
    /// missing (or empty): the catalogs are then checked without pull request.
    pub fn from_args(args: &CheckArgs) -> Result<Option<Self>, GithubError> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        match (
            non_empty(&args.github_token),
            non_empty(&args.repository),
            non_empty(&args.pr_number),
        ) {
            (Some(token), Some(repository), Some(number)) => {
                Self::new(&token, &repository, &number).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// File changed in a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    #[serde(default)]
    pub status: String,
    /// Unified diff of the file (absent for binary or too large files).
    #[serde(default)]
    pub patch: Option<String>,
}

/// Inline review comment on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewComment {
    pub body: String,
    pub commit_id: String,
    pub path: String,
    pub line: usize,
    pub side: &'static str,
}

impl ReviewComment {
    /// Create a comment on a line of the new version of a file.
    pub fn new(body: String, commit_id: &str, path: &str, line: usize) -> Self {
        Self {
            body,
            commit_id: commit_id.to_string(),
            path: path.to_string(),
            line,
            side: "RIGHT",
        }
    }
}

#[derive(Deserialize)]
struct PullRequestInfo {
    head: CommitRef,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

/// Service hosting the pull request.
pub trait ReviewService {
    /// Get the SHA of the latest commit of the pull request.
    fn head_sha(&self) -> Result<String, GithubError>;

    /// Get all files changed in the pull request.
    fn changed_files(&self) -> Result<Vec<ChangedFile>, GithubError>;

    /// Create an inline review comment.
    fn create_review_comment(&self, comment: &ReviewComment) -> Result<(), GithubError>;
}

pub struct GithubClient {
    client: Client,
    pull_url: String,
}

impl GithubClient {
    /// Create a new client for the given pull request.
    pub fn new(pull_request: &PullRequest, settings: &Settings) -> Result<Self, GithubError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", pull_request.token))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("tsexam/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            pull_url: pull_url(&settings.api_url, pull_request),
        })
    }

    /// Return the response if the status is a success, otherwise an error with the
    /// body returned by the API.
    fn check_status(response: Response) -> Result<Response, GithubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_default().trim().to_string();
        Err(GithubError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// URL of a pull request in the API.
fn pull_url(api_url: &str, pull_request: &PullRequest) -> String {
    format!(
        "{}/repos/{}/{}/pulls/{}",
        api_url.trim_end_matches('/'),
        pull_request.owner,
        pull_request.repo,
        pull_request.number,
    )
}

impl ReviewService for GithubClient {
    fn head_sha(&self) -> Result<String, GithubError> {
        let response = self.client.get(&self.pull_url).send()?;
        let info: PullRequestInfo = Self::check_status(response)?.json()?;
        debug!("pull request head: {}", info.head.sha);
        Ok(info.head.sha)
    }

    fn changed_files(&self) -> Result<Vec<ChangedFile>, GithubError> {
        let mut files = Vec::new();
        let mut page = 1;
        loop {
            let url = format!(
                "{}/files?per_page={FILES_PER_PAGE}&page={page}",
                self.pull_url
            );
            let response = self.client.get(&url).send()?;
            let batch: Vec<ChangedFile> = Self::check_status(response)?.json()?;
            let count = batch.len();
            files.extend(batch);
            if count < FILES_PER_PAGE {
                break;
            }
            page += 1;
        }
        debug!("{} files changed in pull request", files.len());
        Ok(files)
    }

    fn create_review_comment(&self, comment: &ReviewComment) -> Result<(), GithubError> {
        let response = self
            .client
            .post(format!("{}/comments", self.pull_url))
            .json(comment)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_new() {
        let pr = PullRequest::new("token", "jamulussoftware/jamulus", " 42 ").expect("valid");
        assert_eq!(pr.owner, "jamulussoftware");
        assert_eq!(pr.repo, "jamulus");
        assert_eq!(pr.number, 42);
        assert_eq!(
            pull_url("https://api.github.com/", &pr),
            "https://api.github.com/repos/jamulussoftware/jamulus/pulls/42"
        );
    }

    #[test]
    fn test_pull_request_invalid() {
        for repository in ["jamulus", "/jamulus", "owner/", "a/b/c"] {
            assert!(matches!(
                PullRequest::new("token", repository, "1"),
                Err(GithubError::InvalidRepository(_))
            ));
        }
        for number in ["", "abc", "0", "-3"] {
            assert!(matches!(
                PullRequest::new("token", "owner/repo", number),
                Err(GithubError::InvalidNumber(_))
            ));
        }
    }

    #[test]
    fn test_changed_file_deserialize() {
        let files: Vec<ChangedFile> = serde_json::from_str(
            r#"[
  {"sha": "abc", "filename": "src/translation/translation_de.ts", "status": "modified",
   "additions": 1, "deletions": 1, "changes": 2,
   "patch": "@@ -1,1 +1,1 @@\n-a\n+b"},
  {"sha": "def", "filename": "src/res/logo.png", "status": "added"}
]"#,
        )
        .expect("valid JSON");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "src/translation/translation_de.ts");
        assert_eq!(files[0].patch.as_deref(), Some("@@ -1,1 +1,1 @@\n-a\n+b"));
        assert!(files[1].patch.is_none());
    }

    #[test]
    fn test_review_comment_serialize() {
        let comment = ReviewComment::new("body".to_string(), "abc123", "a/b.ts", 12);
        let json = serde_json::to_value(&comment).expect("valid JSON");
        assert_eq!(
            json,
            serde_json::json!({
                "body": "body",
                "commit_id": "abc123",
                "path": "a/b.ts",
                "line": 12,
                "side": "RIGHT",
            })
        );
    }

    #[test]
    fn test_client_new() {
        let pr = PullRequest::new("token", "owner/repo", "7").expect("valid");
        assert!(GithubClient::new(&pr, &Settings::default()).is_ok());
        let pr = PullRequest::new("bad\ntoken", "owner/repo", "7").expect("valid");
        assert!(matches!(
            GithubClient::new(&pr, &Settings::default()),
            Err(GithubError::InvalidToken)
        ));
    }
}
