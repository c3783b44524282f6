//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! the domain stays pure, services only see ports, and commands render
//! through `app.renderer()`.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

fn src_dir(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(sub)
}

/// Every `(file:line: text)` in `dir` whose code contains one of `needles`.
fn find_violations(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if needles.iter().any(|n| line.contains(n)) {
                violations.push(format!("{rel}:{}: {}", i + 1, line.trim()));
            }
        }
    }
    violations
}

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let violations = find_violations(
        &src_dir("domain"),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "std::fs",
            "std::process",
            "std::net",
            "ureq::",
            "tracing::",
        ],
    );
    assert!(
        violations.is_empty(),
        "Domain layer must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_layer_depends_only_on_ports_and_domain() {
    let violations = find_violations(
        &src_dir("application"),
        &["crate::infra", "crate::commands", "crate::output", "std::fs"],
    );
    assert!(
        violations.is_empty(),
        "Application layer must not reach into infra, commands or output:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_does_not_import_presentation() {
    let violations = find_violations(&src_dir("infra"), &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "Infra layer must not import commands or output:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_inline_json_branching_in_commands() {
    let violations = find_violations(&src_dir("commands"), &["json: bool", "if json", "if !json"]);
    assert!(
        violations.is_empty(),
        "Found inline JSON branching in commands/; use app.renderer() instead:\n{}",
        violations.join("\n")
    );
}
