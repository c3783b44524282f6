//! Unit tests for the alias generation service.
//!
//! The cloud API is a `mockall` mock; the filesystem and reporter are
//! recording fakes, so every test checks exactly which files were written.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use drush_alias_cli::application::services::alias_generation::{
    GenerateRequest, generate_aliases, write_bundle,
};
use drush_alias_cli::domain::alias::{
    AliasBundle, DerivationOptions, HostingType, SshTarget, connection_descriptor,
};
use drush_alias_cli::domain::error::{AliasError, ConfigError};
use drush_alias_cli::domain::site_file::parse_site_file;

use crate::mocks::{APP_UUID, MockApi, RecordingFs, RecordingReporter, api_with, app, env};

const ALIAS_DIR: &str = "/drush";

fn request(dry_run: bool) -> GenerateRequest<'static> {
    GenerateRequest {
        application_uuid: APP_UUID,
        alias_dir: Path::new(ALIAS_DIR),
        dry_run,
    }
}

fn site_path(site_id: &str) -> PathBuf {
    Path::new(ALIAS_DIR).join(format!("{site_id}.site.yml"))
}

// ── generate_aliases ─────────────────────────────────────────────────────────

#[test]
fn test_generate_ace_writes_one_site_file() {
    let api = api_with(
        app(HostingType::Ace, "org:sitecode"),
        vec![
            env("dev", &["dev.example.com"], "devuser@dev.example.com"),
            env("prod", &["www.example.com", "example.com"], "produser@prod.host"),
        ],
    );
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert_eq!(fs.written(), vec![site_path("sitecode")]);
    assert_eq!(report.written, vec![site_path("sitecode")]);
    assert!(report.failures.is_empty());
    assert_eq!(report.environments, 2);

    let aliases = parse_site_file(&fs.content(site_path("sitecode"))).unwrap();
    assert_eq!(aliases.len(), 2);
    assert_eq!(aliases["dev"].root, "/var/www/html/devuser/docroot");
    assert_eq!(aliases["prod"].uri, "www.example.com");
    assert_eq!(aliases["prod"].host, "prod.host");
}

#[test]
fn test_generate_acsf_writes_one_file_per_site() {
    let api = api_with(
        app(HostingType::Acsf, "prod:factory"),
        vec![env(
            "01live",
            &["site1.factory.com", "*.factory.com", "site2.factory.com"],
            "factory.01live@web.host",
        )],
    );
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert_eq!(fs.written(), vec![site_path("site1"), site_path("site2")]);
    assert_eq!(report.aliases.alias_count(), 2);
    assert_eq!(reporter.of_kind("success").len(), 2);
}

#[test]
fn test_generate_no_environments_writes_nothing() {
    let api = api_with(app(HostingType::Ace, "org:sitecode"), Vec::new());
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert!(fs.written().is_empty());
    assert!(report.aliases.is_empty());
    assert_eq!(report.environments, 0);
    assert_eq!(reporter.of_kind("warn").len(), 1);
}

#[test]
fn test_generate_missing_dir_fails_before_any_write() {
    let api = api_with(
        app(HostingType::Ace, "org:sitecode"),
        vec![env("dev", &["dev.example.com"], "devuser@dev.example.com")],
    );
    let fs = RecordingFs::without_dir();
    let reporter = RecordingReporter::default();

    let err = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::OutputDirMissing(dir)) if dir == Path::new(ALIAS_DIR)
    ));
    assert!(fs.written().is_empty());
    assert!(err.to_string().contains("Please create the directory"));
}

#[test]
fn test_generate_unsupported_hosting_warns_and_writes_nothing() {
    let api = api_with(
        app(HostingType::from("ode"), "org:sitecode"),
        vec![env("dev", &["dev.example.com"], "devuser@dev.example.com")],
    );
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.unsupported_hosting.as_deref(), Some("ode"));
    assert!(fs.written().is_empty());
    assert_eq!(*fs.dir_checks.borrow(), 0);
    let warnings = reporter.of_kind("warn");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ode"));
}

#[test]
fn test_generate_dry_run_never_touches_filesystem() {
    let api = api_with(
        app(HostingType::Acp, "org:sitecode"),
        vec![env("dev", &["dev.example.com"], "devuser@dev.example.com")],
    );
    let fs = RecordingFs::without_dir();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(true),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.aliases.alias_count(), 1);
    assert!(report.written.is_empty());
    assert_eq!(*fs.dir_checks.borrow(), 0);
}

#[test]
fn test_generate_malformed_ssh_url_aborts_before_writing() {
    let api = api_with(
        app(HostingType::Ace, "org:sitecode"),
        vec![env("dev", &["dev.example.com"], "no-at-sign")],
    );
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let err = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AliasError>(),
        Some(AliasError::MalformedSshUrl { .. })
    ));
    assert!(fs.written().is_empty());
}

#[test]
fn test_generate_collision_is_reported_as_warning() {
    let api = api_with(
        app(HostingType::Acsf, "prod:factory"),
        vec![env(
            "01live",
            &["site1.factory.com", "site1.other.com"],
            "factory.01live@web.host",
        )],
    );
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.overwritten.len(), 1);
    assert_eq!(
        report.aliases.get("site1", "01live").unwrap().uri,
        "site1.other.com"
    );
    assert!(reporter.of_kind("warn")[0].contains("@site1.01live"));
}

#[test]
fn test_generate_application_error_skips_environment_listing() {
    let mut api = MockApi::new();
    api.expect_application()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("HTTP 404")));
    api.expect_environments().never();
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let err = generate_aliases(
        &api,
        &fs,
        &reporter,
        &request(false),
        &DerivationOptions::default(),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("HTTP 404"));
    assert!(fs.written().is_empty());
}

// ── write_bundle ─────────────────────────────────────────────────────────────

fn bundle_of(sites: &[&str]) -> AliasBundle {
    let target = SshTarget::parse("dev", "devuser@dev.host").unwrap();
    let options = DerivationOptions::default();
    let mut bundle = AliasBundle::new();
    for site in sites {
        let descriptor =
            connection_descriptor(&format!("{site}.example.com"), &target, &options).unwrap();
        bundle.insert(site, "dev", descriptor);
    }
    bundle
}

#[test]
fn test_write_bundle_empty_bundle_writes_nothing() {
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = write_bundle(&fs, &reporter, &AliasBundle::new(), Path::new(ALIAS_DIR)).unwrap();

    assert!(report.written.is_empty());
    assert!(fs.written().is_empty());
}

#[test]
fn test_write_bundle_continues_after_site_failure() {
    let fs = RecordingFs::failing_on(site_path("a"));
    let reporter = RecordingReporter::default();

    let report = write_bundle(
        &fs,
        &reporter,
        &bundle_of(&["a", "b", "c"]),
        Path::new(ALIAS_DIR),
    )
    .unwrap();

    assert_eq!(report.written, vec![site_path("b"), site_path("c")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].site_id, "a");
    assert_eq!(report.failures[0].path.as_deref(), Some(site_path("a").as_path()));
    assert!(report.failures[0].message.contains("permission denied"));
    assert_eq!(reporter.of_kind("error").len(), 1);
}

#[test]
fn test_write_bundle_unsafe_site_id_is_a_site_failure() {
    let fs = RecordingFs::default();
    let reporter = RecordingReporter::default();

    let report = write_bundle(
        &fs,
        &reporter,
        &bundle_of(&["..", "good"]),
        Path::new(ALIAS_DIR),
    )
    .unwrap();

    assert_eq!(fs.written(), vec![site_path("good")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].site_id, "..");
    assert!(report.failures[0].path.is_none());
}
