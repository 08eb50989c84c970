#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Manifest policy tests.
//!
//! These tests verify that Cargo.toml keeps the panic-free lint table, the
//! feature layout and the demo targets the crate documents. All checks are
//! synchronous filesystem reads.

use std::path::{Path, PathBuf};

/// Returns the project root directory (where Cargo.toml lives).
fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Reads a file relative to the project root and returns its contents.
fn read_project_file(relative_path: &str) -> String {
    let path = project_root().join(relative_path);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to read '{}': {}. This file is required by project policy.",
            path.display(),
            e
        )
    })
}

fn manifest() -> toml::Table {
    read_project_file("Cargo.toml")
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Cargo.toml is not valid TOML: {e}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Module: panic_policy
// ─────────────────────────────────────────────────────────────────────────────

mod panic_policy {
    use super::*;

    const REQUIRED_DENY_LINTS: &[&str] = &[
        "unwrap_used",
        "expect_used",
        "panic",
        "todo",
        "unimplemented",
        "indexing_slicing",
    ];

    #[test]
    fn cargo_toml_has_all_panic_free_lints() {
        let manifest = manifest();
        let lints = manifest["lints"]["clippy"]
            .as_table()
            .expect("Cargo.toml is missing a [lints.clippy] section");

        for lint in REQUIRED_DENY_LINTS {
            assert_eq!(
                lints.get(*lint).and_then(|v| v.as_str()),
                Some("deny"),
                "Cargo.toml must set `{lint} = \"deny\"` in [lints.clippy] to keep \
                 library code panic-free."
            );
        }
    }

    /// Every `.rs` file under `dir`, recursively.
    fn rust_sources(dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(rust_sources(&path));
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        files
    }

    #[test]
    fn library_sources_do_not_call_unwrap_outside_tests() {
        let sources = rust_sources(&project_root().join("src"));
        assert!(sources.len() >= 10, "expected the whole module tree, got {sources:?}");

        for file in sources {
            let contents = std::fs::read_to_string(&file).unwrap();
            let library_part = contents.split("#[cfg(test)]").next().unwrap_or_default();
            for (number, line) in library_part.lines().enumerate() {
                let code = line.trim_start();
                if code.starts_with("//") {
                    continue;
                }
                assert!(
                    !code.contains(".unwrap()") && !code.contains(".expect("),
                    "{}:{} panics outside its test module: {code}",
                    file.display(),
                    number + 1
                );
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Module: feature_policy
// ─────────────────────────────────────────────────────────────────────────────

mod feature_policy {
    use super::*;

    #[test]
    fn http_client_is_a_default_feature() {
        let manifest = manifest();
        let default = manifest["features"]["default"].as_array().unwrap();
        assert!(default.iter().any(|f| f.as_str() == Some("client-http")));
    }

    #[test]
    fn http_feature_enables_only_reqwest() {
        let manifest = manifest();
        let gate = manifest["features"]["client-http"].as_array().unwrap();
        let enabled: Vec<_> = gate.iter().filter_map(|f| f.as_str()).collect();
        assert_eq!(enabled, ["dep:reqwest"]);
    }

    #[test]
    fn reqwest_is_optional_and_gated() {
        let manifest = manifest();
        assert_eq!(
            manifest["dependencies"]["reqwest"]["optional"].as_bool(),
            Some(true)
        );
        let gate = manifest["features"]["client-http"].as_array().unwrap();
        assert!(gate.iter().any(|f| f.as_str() == Some("dep:reqwest")));
    }

    #[test]
    fn demo_targets_point_at_existing_files() {
        let manifest = manifest();
        let demos = manifest["example"].as_array().unwrap();
        assert!(!demos.is_empty());
        for demo in demos {
            let path = demo["path"].as_str().unwrap();
            assert!(
                path.starts_with("demos/"),
                "demo `{path}` must live under demos/"
            );
            assert!(project_root().join(path).is_file(), "missing demo {path}");
        }
    }
}
