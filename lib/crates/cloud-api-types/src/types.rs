use serde::{Deserialize, Serialize};

use crate::hosting::HostingType;

/// `GET /applications/{uuid}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationResponse {
    pub uuid: String,
    pub name: String,
    pub hosting: Hosting,
}

/// Hosting block of an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hosting {
    #[serde(rename = "type")]
    pub kind: HostingType,
    /// Colon-delimited `realm:sitegroup`, e.g. `prod:mysite`.
    pub id: String,
}

/// One item of `GET /applications/{uuid}/environments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentResponse {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Domains in the order the API returns them; may contain wildcards.
    #[serde(default)]
    pub domains: Vec<String>,
    /// `user@host`
    pub ssh_url: String,
}

/// HAL collection envelope: `{"total": n, "_embedded": {"items": [...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection<T> {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embedded<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.embedded.items
    }
}

pub type EnvironmentsResponse = Collection<EnvironmentResponse>;

/// OAuth2 client-credentials token response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    pub message: String,
}
