//! GitHub REST adapter for the latest published release.

use neko_core::{
    application::{ApplicationError, ports::ReleaseApi},
    domain::{RemoteRelease, RepoInfo},
    error::NekoResult,
};
use reqwest::{StatusCode, blocking::Client, header};
use tracing::{debug, instrument, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> NekoResult<Self> {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .user_agent(concat!("neko-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::ApiRequest {
                url: api_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            api_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn latest_release_url(&self, repo: &RepoInfo) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        )
    }
}

/// Decode a `releases/latest` body.
pub fn parse_release(url: &str, body: &str) -> NekoResult<RemoteRelease> {
    serde_json::from_str(body).map_err(|e| {
        ApplicationError::ApiRequest {
            url: url.to_string(),
            reason: format!("invalid release payload: {e}"),
        }
        .into()
    })
}

impl ReleaseApi for GithubClient {
    #[instrument(skip_all, fields(repo = %repo))]
    fn latest_release(&self, repo: &RepoInfo) -> NekoResult<Option<RemoteRelease>> {
        let url = self.latest_release_url(repo);
        let request_error = |reason: String| ApplicationError::ApiRequest {
            url: url.clone(),
            reason,
        };

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!(%url, authenticated = self.token.is_some(), "Requesting latest release");
        let response = request.send().map_err(|e| request_error(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(repo = %repo, "No releases published yet");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApplicationError::ApiResponse {
                url: url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().map_err(|e| request_error(e.to_string()))?;
        parse_release(&url, &body).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "name": "widget 1.3.0",
        "tag_name": "v1.3.0",
        "published_at": "2025-12-20T14:03:00Z",
        "prerelease": false,
        "author": { "login": "octocat", "id": 1 },
        "html_url": "https://github.com/acme/widget/releases/tag/v1.3.0",
        "assets": []
    }"#;

    #[test]
    fn builds_latest_release_url() {
        let client = GithubClient::new("https://github.example.com/api/v3/", None).unwrap();
        assert_eq!(
            client.latest_release_url(&RepoInfo::new("acme", "widget")),
            "https://github.example.com/api/v3/repos/acme/widget/releases/latest"
        );
    }

    #[test]
    fn parses_release_payload() {
        let release = parse_release("u", PAYLOAD).unwrap();
        assert_eq!(release.title(), "widget 1.3.0");
        assert_eq!(release.tag_name, "v1.3.0");
        assert_eq!(release.author_login(), Some("octocat"));
        assert!(!release.prerelease);
    }

    #[test]
    fn nameless_release_falls_back_to_tag() {
        let release = parse_release(
            "u",
            r#"{"name": null, "tag_name": "v0.1.0", "html_url": "https://x"}"#,
        )
        .unwrap();
        assert_eq!(release.title(), "v0.1.0");
        assert!(release.published_at.is_none());
    }

    #[test]
    fn malformed_payload_is_request_error() {
        assert_eq!(parse_release("u", "<html>").unwrap_err().code(), "NEKO_2000");
    }

    #[test]
    fn empty_token_is_ignored() {
        let client = GithubClient::new(DEFAULT_API_URL, Some(String::new())).unwrap();
        assert!(client.token.is_none());
    }
}
