//! Alias derivation: turns an application's environments into Drush site
//! aliases grouped by site.
//!
//! Pure functions only: no I/O, no logging, no filesystem access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use cloud_api_types::HostingType;

use crate::domain::error::AliasError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DOC_ROOT_PREFIX: &str = "/var/www/html";
pub const DOC_ROOT_SUFFIX: &str = "docroot";
pub const DEFAULT_SSH_OPTIONS: &str = "-p 22";
pub const DEFAULT_DUMP_DIR: &str = "/mnt/tmp";

// ── Inputs ───────────────────────────────────────────────────────────────────

/// Application metadata as resolved from the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationMetadata {
    pub uuid: String,
    pub name: String,
    pub hosting_type: HostingType,
    /// Colon-delimited `realm:site`, e.g. `prod:mysite`.
    pub hosting_id: String,
}

/// One remote environment of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    /// In API order; may contain wildcard entries such as `*.example.com`.
    pub domains: Vec<String>,
    /// `user@host`
    pub ssh_url: String,
}

/// Values baked into every descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationOptions {
    pub docroot_prefix: String,
    pub docroot_suffix: String,
    pub ssh_options: String,
    pub dump_dir: String,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self {
            docroot_prefix: DOC_ROOT_PREFIX.to_string(),
            docroot_suffix: DOC_ROOT_SUFFIX.to_string(),
            ssh_options: DEFAULT_SSH_OPTIONS.to_string(),
            dump_dir: DEFAULT_DUMP_DIR.to_string(),
        }
    }
}

impl DerivationOptions {
    /// `<prefix>/<remote user>/<suffix>`
    #[must_use]
    pub fn document_root(&self, remote_user: &str) -> String {
        format!(
            "{}/{remote_user}/{}",
            self.docroot_prefix.trim_end_matches('/'),
            self.docroot_suffix.trim_matches('/')
        )
    }
}

// ── Outputs ──────────────────────────────────────────────────────────────────

/// How to reach one site in one environment. Field order is the order the
/// alias file is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    pub uri: String,
    pub host: String,
    /// Always empty; kept so Drush sees the key.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    pub paths: AliasPaths,
    pub root: String,
    pub user: String,
    pub ssh: SshSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPaths {
    #[serde(rename = "dump-dir")]
    pub dump_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshSettings {
    pub options: String,
}

impl ConnectionDescriptor {
    #[must_use]
    pub fn document_root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn ssh_options(&self) -> &str {
        &self.ssh.options
    }

    #[must_use]
    pub fn dump_dir(&self) -> &str {
        &self.paths.dump_dir
    }
}

/// Aliases of a single site, keyed by environment name.
pub type SiteAliases = BTreeMap<String, ConnectionDescriptor>;

/// Site ID → environment name → descriptor.
///
/// Inserting an existing `(site, environment)` pair replaces the previous
/// descriptor (last write wins) and hands the replaced value back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasBundle {
    sites: BTreeMap<String, SiteAliases>,
}

impl AliasBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        site_id: &str,
        environment: &str,
        descriptor: ConnectionDescriptor,
    ) -> Option<ConnectionDescriptor> {
        self.sites
            .entry(site_id.to_string())
            .or_default()
            .insert(environment.to_string(), descriptor)
    }

    #[must_use]
    pub fn get(&self, site_id: &str, environment: &str) -> Option<&ConnectionDescriptor> {
        self.sites.get(site_id)?.get(environment)
    }

    #[must_use]
    pub fn site(&self, site_id: &str) -> Option<&SiteAliases> {
        self.sites.get(site_id)
    }

    /// Sites in ascending site-ID order.
    pub fn sites(&self) -> impl Iterator<Item = (&str, &SiteAliases)> {
        self.sites.iter().map(|(id, aliases)| (id.as_str(), aliases))
    }

    #[must_use]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.sites.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// A `(site, environment)` slot in the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasKey {
    pub site_id: String,
    pub environment: String,
}

/// Result of a derivation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    Aliases {
        bundle: AliasBundle,
        /// Slots written more than once; only the last descriptor survives.
        overwritten: Vec<AliasKey>,
    },
    /// The hosting model is not one aliases can be derived for; nothing was
    /// produced for any of the application's environments.
    UnsupportedHosting {
        hosting_type: String,
        environments: usize,
    },
}

// ── SSH target ───────────────────────────────────────────────────────────────

/// `user@host` split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub user: String,
    pub host: String,
}

impl SshTarget {
    /// Split an environment's SSH URL on its single `@`.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::MalformedSshUrl`] unless the URL contains exactly
    /// one `@` with a non-empty user and host on either side.
    pub fn parse(environment: &str, ssh_url: &str) -> Result<Self, AliasError> {
        let mut parts = ssh_url.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(host), None) if !user.is_empty() && !host.is_empty() => Ok(Self {
                user: user.to_string(),
                host: host.to_string(),
            }),
            _ => Err(AliasError::MalformedSshUrl {
                environment: environment.to_string(),
                ssh_url: ssh_url.to_string(),
            }),
        }
    }
}

// ── Filters and site IDs ─────────────────────────────────────────────────────

/// Site-factory domain filter: wildcard subdomains (`*.`) carry no site.
#[must_use]
pub fn is_wildcard_domain(domain: &str) -> bool {
    domain.contains("*.")
}

/// Descriptor filter: wildcard subdomains and wildcard ports (`:*`).
///
/// For site-factory hosting this repeats the `*.` check already applied by
/// [`is_wildcard_domain`]; for single-site hosting it is the only filter.
#[must_use]
pub fn is_wildcard_uri(uri: &str) -> bool {
    uri.contains(":*") || uri.contains("*.")
}

/// Second colon segment of a hosting ID (`prod:mysite` → `mysite`).
///
/// # Errors
///
/// Returns [`AliasError::InvalidHostingId`] if the segment is missing or empty.
pub fn site_id_from_hosting_id(hosting_id: &str) -> Result<&str, AliasError> {
    hosting_id
        .split(':')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| AliasError::InvalidHostingId(hosting_id.to_string()))
}

/// First dot segment of a site-factory domain (`site1.factory.com` → `site1`).
///
/// # Errors
///
/// Returns [`AliasError::EmptySiteId`] if the domain starts with a dot or is
/// empty.
pub fn site_id_from_domain<'a>(environment: &str, domain: &'a str) -> Result<&'a str, AliasError> {
    match domain.split('.').next() {
        Some(segment) if !segment.is_empty() => Ok(segment),
        _ => Err(AliasError::EmptySiteId {
            environment: environment.to_string(),
            domain: domain.to_string(),
        }),
    }
}

/// Build the descriptor for one URI, or `None` for wildcard URIs.
#[must_use]
pub fn connection_descriptor(
    uri: &str,
    target: &SshTarget,
    options: &DerivationOptions,
) -> Option<ConnectionDescriptor> {
    if is_wildcard_uri(uri) {
        return None;
    }
    Some(ConnectionDescriptor {
        uri: uri.to_string(),
        host: target.host.clone(),
        options: BTreeMap::new(),
        paths: AliasPaths {
            dump_dir: options.dump_dir.clone(),
        },
        root: options.document_root(&target.user),
        user: target.user.clone(),
        ssh: SshSettings {
            options: options.ssh_options.clone(),
        },
    })
}

// ── Derivation ───────────────────────────────────────────────────────────────

/// Derive the alias bundle for an application's environments.
///
/// Environments are processed in input order. Single-site hosting (`ace`,
/// `acp`) yields at most one alias per environment, keyed by the hosting ID's
/// site segment and pointing at the environment's first domain. Site-factory
/// hosting (`acsf`) yields one alias per non-wildcard domain, keyed by the
/// domain's first label. Any other hosting model yields
/// [`Derivation::UnsupportedHosting`].
///
/// # Errors
///
/// Returns an [`AliasError`] for a malformed SSH URL, a hosting ID without a
/// site segment, a single-site environment without domains, or a domain that
/// yields an empty site ID. Any of these aborts the whole run.
pub fn derive(
    app: &ApplicationMetadata,
    environments: &[Environment],
    options: &DerivationOptions,
) -> Result<Derivation, AliasError> {
    let mut bundle = AliasBundle::new();
    let mut overwritten = Vec::new();

    if environments.is_empty() {
        return Ok(Derivation::Aliases {
            bundle,
            overwritten,
        });
    }

    let single_site_id = match &app.hosting_type {
        HostingType::Ace | HostingType::Acp => Some(site_id_from_hosting_id(&app.hosting_id)?),
        HostingType::Acsf => None,
        HostingType::Other(raw) => {
            return Ok(Derivation::UnsupportedHosting {
                hosting_type: raw.clone(),
                environments: environments.len(),
            });
        }
    };

    let mut record = |site_id: &str, env_name: &str, descriptor: ConnectionDescriptor| {
        if bundle.insert(site_id, env_name, descriptor).is_some() {
            overwritten.push(AliasKey {
                site_id: site_id.to_string(),
                environment: env_name.to_string(),
            });
        }
    };

    for env in environments {
        let target = SshTarget::parse(&env.name, &env.ssh_url)?;

        if let Some(site_id) = single_site_id {
            let uri = env
                .domains
                .first()
                .ok_or_else(|| AliasError::NoDomains(env.name.clone()))?;
            if let Some(descriptor) = connection_descriptor(uri, &target, options) {
                record(site_id, &env.name, descriptor);
            }
            continue;
        }

        for domain in env.domains.iter().filter(|d| !is_wildcard_domain(d)) {
            let site_id = site_id_from_domain(&env.name, domain)?;
            if let Some(descriptor) = connection_descriptor(domain, &target, options) {
                record(site_id, &env.name, descriptor);
            }
        }
    }

    Ok(Derivation::Aliases {
        bundle,
        overwritten,
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
