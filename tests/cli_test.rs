//! Integration tests for the script-search binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RED_BOLD: &str = "\x1b[31m\x1b[1m";
const RESET: &str = "\x1b[0m";

fn setup_scripts(scripts: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, content) in scripts {
        fs::write(temp.path().join(name), content).unwrap();
    }
    temp
}

fn search(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("script-search"));
    cmd.current_dir(dir)
        .env_remove("SCRIPT_SEARCH_DIR")
        .env_remove("SCRIPT_SEARCH_PATTERN")
        .env_remove("RUST_LOG");
    cmd
}

fn docstring(text: &str) -> String {
    format!("#!/usr/bin/env python\n\"\"\"\n{}\n\"\"\"\n\nimport os\n", text)
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("script-search"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--search-parser"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("script-search"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_keywords() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    search(temp.path()).assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_highlights_filename_match() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[(
        "scil_denoise_image.py",
        &docstring("Apply NLMeans denoising."),
    )]);

    let expected = format!(
        "================== scil_{r}denoise{e}_image.py ==================\n\
         Apply NLMeans denoising.\n\
         ================== End of scil_{r}denoise{e}_image.py ==================\n",
        r = RED_BOLD,
        e = RESET
    );

    search(temp.path())
        .args(["--color", "always", "denoise"])
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

#[test]
fn cli_requires_every_keyword() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        ("scil_denoise_image.py", &docstring("Apply NLMeans denoising.")),
        ("scil_tractogram_filter.py", &docstring("Filter streamlines.")),
    ]);

    search(temp.path())
        .args(["denoise", "tractogram"])
        .assert()
        .success()
        .stdout("No results found!\n");
    Ok(())
}

#[test]
fn cli_matches_case_insensitively_and_keeps_casing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[(
        "scil_compute_metrics.py",
        &docstring("Compute dti metrics from a tensor fit."),
    )]);

    search(temp.path())
        .args(["--color", "always", "DTI"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Compute {}dti{} metrics",
            RED_BOLD, RESET
        )));
    Ok(())
}

#[test]
fn cli_prints_placeholder_for_missing_docstring() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_empty.py", "import os\n")]);

    search(temp.path())
        .arg("empty")
        .assert()
        .success()
        .stdout(
            "================== scil_empty.py ==================\n\
             No docstring available!\n\
             ================== End of scil_empty.py ==================\n",
        );
    Ok(())
}

#[test]
fn cli_highlights_keyword_inside_placeholder() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_doc.py", "import os\n")]);

    search(temp.path())
        .args(["--color", "always", "doc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "\nNo {}doc{}string available!\n",
            RED_BOLD, RESET
        )));
    Ok(())
}

#[test]
fn cli_reports_in_sorted_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        ("scil_b.py", &docstring("Second.")),
        ("scil_a.py", &docstring("First.")),
    ]);

    let output = search(temp.path()).arg("scil").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let a = stdout.find("== scil_a.py ==").expect("scil_a.py reported");
    let b = stdout.find("== scil_b.py ==").expect("scil_b.py reported");
    assert!(a < b);
    Ok(())
}

#[test]
fn cli_output_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        ("scil_a.py", &docstring("Alpha dti.")),
        ("scil_b.py", &docstring("Beta dti.")),
    ]);

    let first = search(temp.path()).arg("dti").output()?;
    let second = search(temp.path()).arg("dti").output()?;
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn cli_ignores_non_matching_extensions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_notes.txt", "denoise")]);

    search(temp.path())
        .arg("notes")
        .assert()
        .success()
        .stdout("No results found!\n");
    Ok(())
}

#[test]
fn cli_uses_pattern_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_notes.txt", "\"\"\"Notes.\"\"\"\n")]);

    search(temp.path())
        .args(["--pattern", "*.txt", "notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("End of scil_notes.txt"));
    Ok(())
}

#[test]
fn cli_uses_dir_flag_and_env() -> Result<(), Box<dyn std::error::Error>> {
    let scripts = setup_scripts(&[("scil_a.py", &docstring("Alpha."))]);
    let elsewhere = TempDir::new()?;

    search(elsewhere.path())
        .arg("--dir")
        .arg(scripts.path())
        .arg("alpha")
        .assert()
        .success()
        .stdout(predicate::str::contains("scil_a.py"));

    search(elsewhere.path())
        .env("SCRIPT_SEARCH_DIR", scripts.path())
        .arg("alpha")
        .assert()
        .success()
        .stdout(predicate::str::contains("scil_a.py"));
    Ok(())
}

#[test]
fn cli_missing_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    search(temp.path())
        .args(["--dir", "does-not-exist", "alpha"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Script directory not found"));
    Ok(())
}

#[test]
fn cli_skips_malformed_script_with_warning() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        ("scil_broken.py", "\"\"\"Never closed\nimport os\n"),
        ("scil_ok.py", &docstring("Works.")),
    ]);

    search(temp.path())
        .arg("scil")
        .assert()
        .success()
        .stdout(predicate::str::contains("scil_ok.py"))
        .stdout(predicate::str::contains("scil_broken.py").not())
        .stderr(predicate::str::contains("Skipping scil_broken.py"));
    Ok(())
}

#[test]
fn cli_strict_aborts_on_malformed_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_broken.py", "\"\"\"Never closed\n")]);

    search(temp.path())
        .args(["--strict", "scil"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed source"));
    Ok(())
}

#[test]
fn cli_reads_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        (".script-search.yml", "pattern: '*.txt'\n"),
        ("scil_notes.txt", "\"\"\"Notes.\"\"\"\n"),
    ]);

    search(temp.path())
        .arg("notes")
        .assert()
        .success()
        .stdout(predicate::str::contains("End of scil_notes.txt"));
    Ok(())
}

#[test]
fn cli_error_color_follows_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[
        (".script-search.yml", "color: always\nstrict: true\n"),
        ("scil_broken.py", "\"\"\"Never closed\n"),
    ]);

    search(temp.path())
        .arg("scil")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(format!("{}✗ Error", RED_BOLD)));
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[(".script-search.yml", "unknown_key: 1\n")]);

    search(temp.path())
        .arg("notes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_scripts(&[("scil_a.py", &docstring("Alpha."))]);

    let output = search(temp.path()).args(["--json", "alpha"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["mode"], "docstring");
    assert_eq!(value["matches"][0]["filename"], "scil_a.py");
    assert_eq!(value["matches"][0]["text"], "Alpha.");
    Ok(())
}

#[cfg(unix)]
mod help_text {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn make_executable(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn cli_search_parser_searches_help_output() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        make_executable(
            temp.path(),
            "scil_tool.py",
            "echo 'usage: scil_tool.py [--tractogram FILE]'",
        );

        search(temp.path())
            .args(["--search-parser", "tractogram"])
            .assert()
            .success()
            .stdout(
                "================== scil_tool.py ==================\n\
                 usage: scil_tool.py [--tractogram FILE]\n\n\
                 ================== End of scil_tool.py ==================\n",
            );
        Ok(())
    }

    #[test]
    fn cli_search_parser_skips_failing_script() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        make_executable(temp.path(), "scil_fail.py", "echo tractogram; exit 1");

        search(temp.path())
            .args(["--search-parser", "tractogram"])
            .assert()
            .success()
            .stdout("No results found!\n")
            .stderr(predicate::str::contains("Skipping scil_fail.py"));
        Ok(())
    }

    #[test]
    fn cli_search_parser_times_out() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        make_executable(temp.path(), "scil_hang.py", "exec sleep 30");

        search(temp.path())
            .args(["--search-parser", "--timeout", "1", "scil"])
            .timeout(std::time::Duration::from_secs(20))
            .assert()
            .success()
            .stdout("No results found!\n")
            .stderr(predicate::str::contains("timed out"));
        Ok(())
    }
}
