//! Acquia Cloud API v2 client: implements the `CloudApi` port over ureq.
//!
//! Authenticates with the OAuth2 client-credentials grant once per client and
//! reuses the bearer token for every later request. No retries.

use std::cell::OnceCell;
use std::fmt;
use std::time::Duration;

use anyhow::Result;
use cloud_api_types::{
    ApiErrorBody, ApplicationResponse, EnvironmentResponse, EnvironmentsResponse, TokenResponse,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::application::ports::CloudApi;
use crate::domain::alias::{ApplicationMetadata, Environment};
use crate::domain::config::ApiConfig;

const ACCEPT: &str = "application/hal+json, application/json";
const MAX_ERROR_BODY: usize = 200;

/// Failures talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("GET {url} failed with HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("cannot reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "remote_api_auth",
            Self::Status { .. } | Self::Transport { .. } | Self::Decode { .. } => "remote_api",
        }
    }
}

/// API key and secret.
#[derive(Clone)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Blocking Acquia Cloud API client.
pub struct AcquiaCloudClient {
    agent: ureq::Agent,
    base_url: String,
    token_url: String,
    credentials: Credentials,
    token: OnceCell<String>,
}

impl AcquiaCloudClient {
    #[must_use]
    pub fn new(api: &ApiConfig, credentials: Credentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("drush-alias/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token_url: api.token_url.clone(),
            credentials,
            token: OnceCell::new(),
        }
    }

    fn token(&self) -> Result<&str, ApiError> {
        if let Some(token) = self.token.get() {
            return Ok(token.as_str());
        }
        tracing::debug!(url = %self.token_url, "requesting access token");
        let response = self
            .agent
            .post(&self.token_url)
            .set("Accept", "application/json")
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.key.as_str()),
                ("client_secret", self.credentials.secret.as_str()),
            ]);
        let body = match response {
            Ok(resp) => read_body(&self.token_url, resp)?,
            Err(ureq::Error::Status(status, resp)) => {
                return Err(ApiError::Auth {
                    status,
                    message: error_message(&resp.into_string().unwrap_or_default()),
                });
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(ApiError::Transport {
                    url: self.token_url.clone(),
                    message: t.to_string(),
                });
            }
        };
        let token: TokenResponse = decode(&self.token_url, &body)?;
        Ok(self.token.get_or_init(|| token.access_token).as_str())
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.token()?;
        let url = endpoint(&self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .agent
            .get(&url)
            .set("Accept", ACCEPT)
            .set("Authorization", &format!("Bearer {token}"))
            .call();
        match response {
            Ok(resp) => decode(&url, &read_body(&url, resp)?),
            Err(ureq::Error::Status(status, resp)) => Err(ApiError::Status {
                message: error_message(&resp.into_string().unwrap_or_default()),
                url,
                status,
            }),
            Err(ureq::Error::Transport(t)) => Err(ApiError::Transport {
                message: t.to_string(),
                url,
            }),
        }
    }
}

impl CloudApi for AcquiaCloudClient {
    fn application(&self, uuid: &str) -> Result<ApplicationMetadata> {
        let response: ApplicationResponse = self.get(&format!("applications/{uuid}"))?;
        Ok(application_from_response(response))
    }

    fn environments(&self, application_uuid: &str) -> Result<Vec<Environment>> {
        let response: EnvironmentsResponse =
            self.get(&format!("applications/{application_uuid}/environments"))?;
        Ok(response
            .into_items()
            .into_iter()
            .map(environment_from_response)
            .collect())
    }
}

// ── Mapping ───────────────────────────────────────────────────────────────────

#[must_use]
pub fn application_from_response(response: ApplicationResponse) -> ApplicationMetadata {
    ApplicationMetadata {
        uuid: response.uuid,
        name: response.name,
        hosting_type: response.hosting.kind,
        hosting_id: response.hosting.id,
    }
}

#[must_use]
pub fn environment_from_response(response: EnvironmentResponse) -> Environment {
    Environment {
        name: response.name,
        domains: response.domains,
        ssh_url: response.ssh_url,
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn read_body(url: &str, response: ureq::Response) -> Result<String, ApiError> {
    response.into_string().map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// The API's `message` field when the body is a JSON error, otherwise the
/// start of the raw body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}
