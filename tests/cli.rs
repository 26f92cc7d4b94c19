//! Command line tests for kodegen_sea.
//!
//! Validation failures run against the real binary with no tools installed.
//! Full builds use shell-script stand-ins for node, npm, esbuild and postject,
//! so they only run on unix.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn sea_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("kodegen_sea");
    for var in [
        "KODEGEN_SEA_NODE",
        "KODEGEN_SEA_NPM",
        "KODEGEN_SEA_ESBUILD",
        "KODEGEN_SEA_POSTJECT",
        "KODEGEN_SEA_TMPDIR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Scratch layout: `app/index.js`, an empty `out/` and an empty `tmp/`.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("app")).unwrap();
    std::fs::create_dir_all(temp.path().join("out")).unwrap();
    std::fs::create_dir_all(temp.path().join("tmp")).unwrap();
    std::fs::write(temp.path().join("app/index.js"), "console.log('hello')").unwrap();
    temp
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_lists_options() {
    sea_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--use-snapshot"))
        .stdout(predicate::str::contains("--assets"))
        .stdout(predicate::str::contains("--enable-experimental-sea-warning"));
}

#[test]
fn short_version_flag_prints_version() {
    sea_cmd()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_entry_argument_is_a_usage_error() {
    sea_cmd().assert().failure();
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn missing_entry_point_is_a_reference_error() {
    let temp = project();

    sea_cmd()
        .current_dir(temp.path())
        .args(["app/missing", "--output", "out", "--temp-dir", "tmp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Reference Error:"))
        .stderr(predicate::str::contains("missing.js' does not exist"));

    assert!(entries(&temp.path().join("tmp")).is_empty());
    assert!(entries(&temp.path().join("out")).is_empty());
}

#[test]
fn output_that_is_a_file_is_a_state_error() {
    let temp = project();
    std::fs::write(temp.path().join("taken"), "").unwrap();

    sea_cmd()
        .current_dir(temp.path())
        .args(["app/index", "--output", "taken", "--temp-dir", "tmp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("State Error:"))
        .stderr(predicate::str::contains("is not a directory"));

    assert!(entries(&temp.path().join("tmp")).is_empty());
}

#[test]
fn empty_name_is_an_argument_error() {
    let temp = project();

    sea_cmd()
        .current_dir(temp.path())
        .args(["app/index.js", "--name", "", "--temp-dir", "tmp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Argument Error:"));
}

// =============================================================================
// Full builds with stand-in tools
// =============================================================================

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const FAKE_NODE: &str = r#"#!/bin/sh
if [ "$1" = "--experimental-sea-config" ]; then
  printf 'blob:' > sea-prep.blob
  cat "$2" >> sea-prep.blob
fi
"#;

    const FAKE_NPM: &str = r#"#!/bin/sh
case "$1" in
  -v) echo 10.0.0 ;;
  install) mkdir -p node_modules && touch node_modules/.installed ;;
esac
"#;

    const FAKE_ESBUILD: &str = r#"#!/bin/sh
entry="$1"
for arg in "$@"; do
  case "$arg" in
    --outfile=*) out="${arg#--outfile=}" ;;
  esac
done
cp "$entry" "$out"
"#;

    const FAKE_POSTJECT: &str = r#"#!/bin/sh
cat "$3" >> "$1"
"#;

    fn script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn sea_cmd_with_tools(root: &Path) -> Command {
        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let mut cmd = sea_cmd();
        cmd.current_dir(root)
            .env("KODEGEN_SEA_NODE", script(&bin, "node", FAKE_NODE))
            .env("KODEGEN_SEA_NPM", script(&bin, "npm", FAKE_NPM))
            .env("KODEGEN_SEA_ESBUILD", script(&bin, "esbuild", FAKE_ESBUILD))
            .env("KODEGEN_SEA_POSTJECT", script(&bin, "postject", FAKE_POSTJECT))
            .env("KODEGEN_SEA_TMPDIR", root.join("tmp"));
        cmd
    }

    #[test]
    fn builds_a_single_executable() {
        let temp = project();
        std::fs::write(temp.path().join("app/package.json"), "{}").unwrap();
        std::fs::write(temp.path().join("logo.png"), "png").unwrap();

        sea_cmd_with_tools(temp.path())
            .args(["app/index", "-o", "out", "-n", "hello", "-a", "logo.png"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "✅ 'hello' has been successfully written to",
            ));

        assert_eq!(entries(&temp.path().join("out")), vec!["hello".to_string()]);
        assert!(entries(&temp.path().join("tmp")).is_empty());

        let built = std::fs::read_to_string(temp.path().join("out/hello")).unwrap();
        assert!(built.starts_with(FAKE_NODE));
        assert!(built.contains("\"logo.png\""));
        assert!(built.contains("\"disableExperimentalSEAWarning\":true"));

        let mode = std::fs::metadata(temp.path().join("out/hello"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);

        // Dependencies were installed into the staged copy only.
        assert!(!temp.path().join("app/node_modules").exists());
    }

    #[test]
    fn rebuild_warns_and_replaces_existing_executable() {
        let temp = project();
        std::fs::write(temp.path().join("out/index"), "previous build").unwrap();

        sea_cmd_with_tools(temp.path())
            .args(["app/index", "-o", "out"])
            .assert()
            .success()
            .stderr(predicate::str::contains("already exists and will be replaced"));

        let built = std::fs::read_to_string(temp.path().join("out/index")).unwrap();
        assert!(built.starts_with(FAKE_NODE));
        assert_eq!(entries(&temp.path().join("out")), vec!["index".to_string()]);
    }

    #[test]
    fn nested_temp_dir_is_not_staged() {
        let temp = project();
        std::fs::create_dir(temp.path().join("app/.tmp")).unwrap();

        sea_cmd_with_tools(temp.path())
            .env("KODEGEN_SEA_TMPDIR", temp.path().join("app/.tmp"))
            .args(["app/index", "-o", "out"])
            .assert()
            .success();

        assert_eq!(entries(&temp.path().join("out")), vec!["index".to_string()]);
        assert!(entries(&temp.path().join("app/.tmp")).is_empty());
    }

    #[test]
    fn quiet_build_prints_nothing() {
        let temp = project();

        sea_cmd_with_tools(temp.path())
            .args(["app/index.js", "--output", "out", "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        assert_eq!(entries(&temp.path().join("out")), vec!["index".to_string()]);
    }

    #[test]
    fn duplicate_assets_publish_nothing() {
        let temp = project();
        for dir in ["a", "b"] {
            std::fs::create_dir_all(temp.path().join(dir)).unwrap();
            std::fs::write(temp.path().join(dir).join("x.png"), dir).unwrap();
        }

        sea_cmd_with_tools(temp.path())
            .args(["app/index", "-o", "out", "--assets", "a/x.png", "b/x.png"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Duplicate Asset Error:"))
            .stderr(predicate::str::contains("'x.png'"));

        assert!(entries(&temp.path().join("out")).is_empty());
        assert!(entries(&temp.path().join("tmp")).is_empty());
    }

    #[test]
    fn missing_npm_with_manifest_is_a_resource_error() {
        let temp = project();
        std::fs::write(temp.path().join("app/package.json"), "{}").unwrap();

        sea_cmd_with_tools(temp.path())
            .env("KODEGEN_SEA_NPM", temp.path().join("no-such-npm"))
            .args(["app/index", "-o", "out"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "Resource Error: npm must be installed globally on your system",
            ));

        assert!(entries(&temp.path().join("out")).is_empty());
        assert!(entries(&temp.path().join("tmp")).is_empty());
    }

    #[test]
    fn failing_bundler_is_a_bundle_error() {
        let temp = project();
        let bin = temp.path().join("broken");
        std::fs::create_dir_all(&bin).unwrap();
        let esbuild = script(
            &bin,
            "esbuild",
            "#!/bin/sh\necho 'Could not resolve \"express\"' >&2\nexit 1\n",
        );

        sea_cmd_with_tools(temp.path())
            .env("KODEGEN_SEA_ESBUILD", esbuild)
            .args(["app/index", "-o", "out"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Bundle Error:"))
            .stderr(predicate::str::contains("express"));

        assert!(entries(&temp.path().join("out")).is_empty());
        assert!(entries(&temp.path().join("tmp")).is_empty());
    }
}
