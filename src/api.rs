use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const AUTH_HEADER: &str = "Authorization";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// Every endpoint wraps its payload in the same `{success, message, data}`
// envelope; absent fields are omitted rather than sent as null.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub author: Option<User>,
}

impl Commit {
    // Badge label in the multi-commit list: the decimal id cut to 7 chars.
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(7).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommitBatch {
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub file_changes: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    pub fn commit_batch(&self, commit_ids: &[String]) -> Result<CommitBatch> {
        let url = format!("{}/api/version-control/commit-batch", self.base_url);
        debug!(%url, commits = commit_ids.len(), "requesting commit batch");
        let mut req = ureq::get(&url);
        for id in commit_ids {
            req = req.query("commitIds", id);
        }
        self.fetch(req).context("failed to load commit details")
    }

    pub fn project(&self, id: &str) -> Result<Project> {
        let url = format!("{}/api/projects/{id}", self.base_url);
        debug!(%url, "requesting project");
        self.fetch(ureq::get(&url))
            .context("failed to load project details")
    }

    pub fn current_user(&self) -> Result<User> {
        let url = format!("{}/api/auth/user", self.base_url);
        debug!(%url, "requesting current user");
        self.fetch(ureq::get(&url))
            .context("failed to load user info")
    }

    pub fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(%url, "posting login request");
        let payload = serde_json::json!({
            "username": username,
            "password": password,
        });
        let resp = ureq::post(&url)
            .timeout(REQUEST_TIMEOUT)
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string())
            .map_err(map_transport_error)?;
        unwrap_envelope(resp).context("login failed")
    }

    fn fetch<T: DeserializeOwned>(&self, req: ureq::Request) -> Result<T> {
        let resp = self
            .with_auth(req.timeout(REQUEST_TIMEOUT))
            .call()
            .map_err(map_transport_error)?;
        unwrap_envelope(resp)
    }

    fn with_auth(&self, req: ureq::Request) -> ureq::Request {
        match &self.token {
            Some(token) => req.set(AUTH_HEADER, &format!("Bearer {token}")),
            None => req,
        }
    }
}

fn map_transport_error(err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            anyhow!(format_http_error(code, &body))
        }
        other => anyhow!(other),
    }
}

fn format_http_error(code: u16, body: &str) -> String {
    let body = body.trim();
    let detail = if body.is_empty() {
        None
    } else {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_owned())
                .or_else(|| Some(body.to_owned())),
            Err(_) => Some(body.to_owned()),
        }
    };

    let mut formatted = match detail {
        Some(detail) => format!("HTTP {code}: {detail}"),
        None => format!("HTTP {code}"),
    };
    if code == 401 {
        formatted.push_str(" (session expired? run `commitview login`)");
    }
    formatted
}

fn unwrap_envelope<T: DeserializeOwned>(resp: ureq::Response) -> Result<T> {
    let body = resp
        .into_string()
        .context("failed to read response body")?;
    decode_envelope(&body)
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiResponse<T> =
        serde_json::from_str(body).context("failed to parse API response")?;
    let message = envelope
        .message
        .unwrap_or_else(|| "server returned no data".to_owned());
    if !envelope.success {
        bail!(message);
    }
    envelope.data.ok_or_else(|| anyhow!(message))
}

#[cfg(test)]
mod tests {
    use super::{Commit, CommitBatch, Project, decode_envelope, format_http_error};

    #[test]
    fn decodes_commit_batch_envelope() {
        let body = r#"{
            "success": true,
            "data": {
                "commits": [{
                    "id": 12345678,
                    "message": "Fix login",
                    "createdAt": "2025-08-10T14:23:05",
                    "branchName": "main",
                    "author": {"id": 1, "username": "ada"}
                }],
                "fileChanges": {"src/app.js": "@@ -1,1 +1,1 @@\n- a\n+ b\n"},
                "totalCommits": 1
            }
        }"#;

        let batch: CommitBatch = decode_envelope(body).unwrap();
        assert_eq!(batch.commits.len(), 1);
        assert_eq!(batch.commits[0].message.as_deref(), Some("Fix login"));
        assert_eq!(
            batch.commits[0].author.as_ref().map(|a| a.username.as_str()),
            Some("ada")
        );
        assert!(batch.file_changes.contains_key("src/app.js"));
    }

    #[test]
    fn short_id_truncates_long_ids_only() {
        let commit = Commit {
            id: 98765432101,
            message: None,
            created_at: None,
            branch_name: None,
            author: None,
        };
        assert_eq!(commit.short_id(), "9876543");

        let small = Commit { id: 42, ..commit };
        assert_eq!(small.short_id(), "42");
    }

    #[test]
    fn missing_batch_fields_default_to_empty() {
        let batch: CommitBatch = decode_envelope(r#"{"success": true, "data": {}}"#).unwrap();
        assert!(batch.commits.is_empty());
        assert!(batch.file_changes.is_empty());
    }

    #[test]
    fn unsuccessful_envelope_surfaces_its_message() {
        let err = decode_envelope::<CommitBatch>(
            r#"{"success": false, "message": "Commit not found"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Commit not found");
    }

    #[test]
    fn successful_envelope_without_data_is_an_error() {
        let err = decode_envelope::<Project>(r#"{"success": true}"#).unwrap_err();
        assert_eq!(err.to_string(), "server returned no data");
    }

    #[test]
    fn http_errors_prefer_the_envelope_message() {
        let formatted = format_http_error(500, r#"{"success": false, "message": "boom"}"#);
        assert_eq!(formatted, "HTTP 500: boom");

        assert_eq!(format_http_error(502, ""), "HTTP 502");
        assert_eq!(format_http_error(503, "gateway down"), "HTTP 503: gateway down");
    }
}
