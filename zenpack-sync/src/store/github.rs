//! GitHub contents API store.
//!
//! Reads with `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` and
//! writes with `PUT` on the same URL. The blob `sha` is the revision token;
//! GitHub refuses a `PUT` whose `sha` does not match the current file.

use super::remote::{Credential, RemoteFile, RemoteStore, RevisionToken};
use crate::config::GitHubConfig;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// `GET` contents response.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: Option<String>,
    sha: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// `PUT` contents request body.
#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

/// GitHub-backed remote store.
pub struct GitHubStore {
    config: GitHubConfig,
    client: Client,
}

impl GitHubStore {
    /// Creates a store for the configured repository and branch.
    pub fn new(config: GitHubConfig) -> SyncResult<Self> {
        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(SyncError::Config(
                "GitHub owner and repository must be set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Contents URL for a repository-relative path.
    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.owner),
            urlencoding::encode(&self.config.repo),
            encode_path(path)
        )
    }
}

/// Percent-encodes each path segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Maps a non-success read response to an error.
async fn fetch_error(path: &str, response: Response) -> SyncError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND => SyncError::NotFound(path.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SyncError::Auth(format!("read of {path} rejected: {status}"))
        }
        _ => SyncError::Transport(format!("read of {path} failed: {status} {body}")),
    }
}

/// Maps a non-success write response to an error.
///
/// GitHub answers a stale `sha` with 409, and a create over an existing file
/// (no `sha` supplied) with 422 mentioning the `sha`.
async fn write_error(path: &str, response: Response) -> SyncError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
            SyncError::Conflict(format!("{path} changed since it was fetched"))
        }
        StatusCode::UNPROCESSABLE_ENTITY if body.contains("sha") => {
            SyncError::Conflict(format!("{path} exists but no matching revision was given"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SyncError::Auth(format!("write of {path} rejected: {status}"))
        }
        _ => SyncError::Transport(format!("write of {path} failed: {status} {body}")),
    }
}

#[async_trait]
impl RemoteStore for GitHubStore {
    fn provider_name(&self) -> &'static str {
        "GitHub"
    }

    async fn fetch_resource(&self, path: &str, credential: &Credential) -> SyncResult<RemoteFile> {
        let secret = credential.secret()?;

        debug!("Fetching {} from {}/{}", path, self.config.owner, self.config.repo);

        let response = self
            .client
            .get(self.contents_url(path))
            .header(AUTHORIZATION, format!("token {secret}"))
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await
            .map_err(|e| SyncError::Transport(format!("read of {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(fetch_error(path, response).await);
        }

        let contents: ContentsResponse = response.json().await.map_err(|e| {
            SyncError::Transport(format!("failed to parse contents response for {path}: {e}"))
        })?;

        if let Some(encoding) = contents.encoding.as_deref() {
            if encoding != "base64" {
                return Err(SyncError::Transport(format!(
                    "{path} is served with unsupported encoding {encoding:?}"
                )));
            }
        }

        Ok(RemoteFile {
            raw_text: contents.content.unwrap_or_default(),
            revision: RevisionToken::new(contents.sha),
        })
    }

    async fn write_resource(
        &self,
        path: &str,
        raw_text: &str,
        revision: Option<&RevisionToken>,
        message: &str,
        credential: &Credential,
    ) -> SyncResult<RevisionToken> {
        let secret = credential.secret()?;

        debug!(
            "Writing {} ({} bytes encoded, revision {:?})",
            path,
            raw_text.len(),
            revision.map(RevisionToken::as_str)
        );

        let body = PutContentsRequest {
            message,
            content: raw_text,
            sha: revision.map(RevisionToken::as_str),
            branch: &self.config.branch,
        };

        let response = self
            .client
            .put(self.contents_url(path))
            .header(AUTHORIZATION, format!("token {secret}"))
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(format!("write of {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(write_error(path, response).await);
        }

        let written: PutContentsResponse = response.json().await.map_err(|e| {
            SyncError::Transport(format!("failed to parse write response for {path}: {e}"))
        })?;

        info!("Committed {} (sha: {})", path, written.content.sha);
        Ok(RevisionToken::new(written.content.sha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_path_keeps_separators() {
        assert_eq!(encode_path("en/pack_1.json"), "en/pack_1.json");
        assert_eq!(encode_path("/pt br/pack 1.json"), "pt%20br/pack%201.json");
    }

    #[test]
    fn contents_url_trims_trailing_slash() {
        let store = GitHubStore::new(GitHubConfig {
            api_base_url: "http://localhost:9/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            store.contents_url("version.txt"),
            "http://localhost:9/repos/balruben-cpu/Zen_Data/contents/version.txt"
        );
    }
}
