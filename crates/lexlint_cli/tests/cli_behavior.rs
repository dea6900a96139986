//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper to create a command for the lexlint CLI
fn lexlint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lexlint"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        lexlint_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        lexlint_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn lint_requires_paths() {
        lexlint_cmd().arg("lint").assert().failure();
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn clean_file_exits_zero() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixture("clean.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 1 files, found 0 issues"));
    }

    #[test]
    fn warnings_alone_exit_zero() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixture("warnings.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("warning [wrap_regexp]"))
            .stdout(predicate::str::contains("warning [todo_comment]"))
            .stdout(predicate::str::contains("found 2 issues (0 errors, 2 warnings)"));
    }

    #[test]
    fn error_diagnostic_exits_one() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixture("clean.js"))
            .arg(fixture("broken.js"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "2:28 error [unclosed_string]: Unclosed string.",
            ))
            .stdout(predicate::str::contains("Checked 2 files"));
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg("nonexistent_file.js")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("1 file(s) failed to lint"))
            .stdout(predicate::str::contains("Checked 0 files"));
    }

    #[test]
    fn json_format() {
        let temp = TempDir::new().unwrap();

        let output = lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg("--format")
            .arg("json")
            .arg(fixture("warnings.js"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let diagnostics = value[0]["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0]["code"], "wrap_regexp");
        assert_eq!(diagnostics[0]["severity"], "warning");
        assert_eq!(diagnostics[0]["line"], 1);
    }

    #[test]
    fn report_format_is_zero_based() {
        let temp = TempDir::new().unwrap();

        let output = lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg("--format=report")
            .arg(fixture("broken.js"))
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let report = &value[0];
        assert_eq!(report["severity"], "error");
        assert_eq!(report["code"], "unclosed_string");
        assert_eq!(report["start"]["line"], 1);
        assert_eq!(report["start"]["column"], 27);
        assert_eq!(report["end"]["line"], 1);
        assert_eq!(report["end"]["column"], 28);
    }

    #[test]
    fn discovered_config_is_applied() {
        let temp = TempDir::new().unwrap();
        temp.child(".lexlint.json")
            .write_str(r#"{"options": {"wrap_regexp": "off", "devel": true}}"#)
            .unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixture("warnings.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("found 0 issues"));
    }

    #[test]
    fn explicit_config_is_applied() {
        let temp = TempDir::new().unwrap();
        let config = temp.child("strict.jsonc");
        config
            .write_str("{\n  // promote\n  \"options\": {\"todo_comment\": \"error\"}\n}")
            .unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("--config")
            .arg(config.path())
            .arg("lint")
            .arg(fixture("warnings.js"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains("error [todo_comment]"));
    }

    #[test]
    fn invalid_config_exits_two() {
        let temp = TempDir::new().unwrap();
        temp.child(".lexlint.json")
            .write_str(r#"{"options": {"no_tabs": "loud"}}"#)
            .unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixture("clean.js"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_new_config_file() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success()
            .stderr(predicate::str::contains("Created .lexlint.jsonc"));

        temp.child(".lexlint.jsonc")
            .assert(predicate::str::contains("max_line_length"));
    }

    #[test]
    fn fails_when_config_exists_without_force() {
        let temp = TempDir::new().unwrap();
        temp.child(".lexlint.jsonc").write_str("{}").unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn overwrites_with_force() {
        let temp = TempDir::new().unwrap();
        temp.child(".lexlint.jsonc").write_str("{}").unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .arg("--force")
            .assert()
            .success();

        temp.child(".lexlint.jsonc")
            .assert(predicate::str::contains("options"));
    }

    #[cfg(unix)]
    #[test]
    fn force_does_not_follow_symlinks() {
        let temp = TempDir::new().unwrap();
        let target = temp.child("target_file");
        target.write_str("Important Data").unwrap();
        temp.child(".lexlint.jsonc").symlink_to_file(target.path()).unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .arg("--force")
            .assert()
            .success();

        target.assert("Important Data");
        let meta = std::fs::symlink_metadata(temp.path().join(".lexlint.jsonc")).unwrap();
        assert!(meta.is_file());
    }
}

mod rules_command {
    use super::*;

    #[test]
    fn lists_rules_and_options() {
        let temp = TempDir::new().unwrap();

        lexlint_cmd()
            .current_dir(temp.path())
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("unclosed_string"))
            .stdout(predicate::str::contains("max_line_length"))
            .stdout(predicate::str::contains("browser"));
    }
}
