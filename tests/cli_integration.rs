//! CLI integration tests for scriptgate.
//!
//! These tests run the binary against packages unpacked into temporary
//! directories. `HOME` points into the sandbox so no user config leaks in.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the scriptgate binary command, isolated from the user's environment.
fn scriptgate(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scriptgate").unwrap();
    cmd.env("HOME", home)
        .env_remove("SCRIPTGATE_ENABLE_SCRIPTS")
        .arg("--no-color");
    cmd
}

/// Create a temporary directory for test packages.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a package directory named `dir` containing `manifest`.
fn write_package(root: &Path, dir: &str, manifest: &str) -> std::path::PathBuf {
    let pkg = root.join(dir);
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("package.json"), manifest).unwrap();
    pkg
}

// ============================================================================
// scriptgate plan
// ============================================================================

#[test]
fn test_plan_runs_scripts_in_lifecycle_order() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "esbuild",
        r#"{
            "name": "esbuild",
            "version": "0.19.2",
            "scripts": {"postinstall": "node install.js", "preinstall": "node check.js"}
        }"#,
    );

    scriptgate(tmp.path())
        .args(["plan", "esbuild", "--platform", "linux", "--arch", "x64"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "esbuild@npm:0.19.2: run script `preinstall`, script `postinstall`",
        ));
}

#[test]
fn test_plan_binding_gyp_adds_node_gyp_rebuild() {
    let tmp = temp_dir();
    let pkg = write_package(tmp.path(), "bcrypt", r#"{"name": "bcrypt", "version": "5.1.1"}"#);
    fs::write(pkg.join("binding.gyp"), "{}").unwrap();

    scriptgate(tmp.path())
        .args(["plan"])
        .current_dir(&pkg)
        .assert()
        .success()
        .stdout(predicate::str::contains("bcrypt@npm:5.1.1: run shell `node-gyp rebuild`"));
}

#[test]
fn test_plan_without_build_steps_is_silent() {
    let tmp = temp_dir();
    write_package(tmp.path(), "lodash", r#"{"name": "lodash", "version": "4.17.21"}"#);

    scriptgate(tmp.path())
        .args(["plan", "lodash", "--enable-scripts", "false"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lodash@npm:4.17.21: nothing to build"))
        .stderr(predicate::str::contains("warning").not());
}

#[test]
fn test_plan_disabled_scripts_flag() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "sharp",
        r#"{"name": "sharp", "version": "0.33.0", "scripts": {"install": "node install.js"}}"#,
    );

    scriptgate(tmp.path())
        .args(["plan", "sharp", "--enable-scripts", "false"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (DISABLED_BUILD_SCRIPTS)"))
        .stderr(predicate::str::contains(
            "warning[SG0004]: sharp@npm:0.33.0 lists build scripts, but all build scripts have been disabled.",
        ));
}

#[test]
fn test_plan_disabled_scripts_env() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "sharp",
        r#"{"name": "sharp", "version": "0.33.0", "scripts": {"install": "node install.js"}}"#,
    );

    scriptgate(tmp.path())
        .env("SCRIPTGATE_ENABLE_SCRIPTS", "false")
        .args(["plan", "sharp"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (DISABLED_BUILD_SCRIPTS)"));
}

#[test]
fn test_plan_invalid_env_value_fails() {
    let tmp = temp_dir();
    write_package(tmp.path(), "sharp", r#"{"name": "sharp", "version": "0.33.0"}"#);

    scriptgate(tmp.path())
        .env("SCRIPTGATE_ENABLE_SCRIPTS", "maybe")
        .args(["plan", "sharp"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCRIPTGATE_ENABLE_SCRIPTS"));
}

#[test]
fn test_plan_project_config_forces_build() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "sharp",
        r#"{"name": "sharp", "version": "0.33.0", "scripts": {"install": "node install.js"}}"#,
    );
    fs::create_dir_all(tmp.path().join(".scriptgate")).unwrap();
    fs::write(
        tmp.path().join(".scriptgate/config.toml"),
        r#"
enable-scripts = false

[dependencies-meta.sharp]
built = true
"#,
    )
    .unwrap();

    scriptgate(tmp.path())
        .args(["plan", "sharp"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sharp@npm:0.33.0: run script `install`"));
}

#[test]
fn test_plan_project_config_disables_build() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "core-js",
        r#"{"name": "core-js", "version": "3.35.0", "scripts": {"postinstall": "node postinstall"}}"#,
    );
    fs::create_dir_all(tmp.path().join(".scriptgate")).unwrap();
    fs::write(
        tmp.path().join(".scriptgate/config.toml"),
        "[dependencies-meta.\"core-js@3.35.0\"]\nbuilt = false\n",
    )
    .unwrap();

    scriptgate(tmp.path())
        .args(["plan", "core-js"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (BUILD_DISABLED)"))
        .stderr(predicate::str::contains("info[SG0005]"));

    // Info messages are dropped in quiet mode
    scriptgate(tmp.path())
        .args(["--quiet", "plan", "core-js"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("SG0005").not());
}

#[test]
fn test_plan_soft_link() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "local-addon",
        r#"{"name": "local-addon", "version": "1.0.0", "scripts": {"install": "make"}}"#,
    );

    scriptgate(tmp.path())
        .args(["plan", "local-addon", "--soft"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (SOFT_LINK_BUILD)"))
        .stderr(predicate::str::contains("warning[SG0006]"))
        .stderr(predicate::str::contains("referenced through a soft link"));
}

#[test]
fn test_plan_incompatible_os() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "fsevents",
        r#"{"name": "fsevents", "version": "2.3.3", "os": ["darwin"], "scripts": {"install": "node-gyp rebuild"}}"#,
    );

    scriptgate(tmp.path())
        .args(["plan", "fsevents", "--platform", "linux", "--arch", "x64"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (INCOMPATIBLE_OS)"))
        .stderr(predicate::str::contains(
            "fsevents@npm:2.3.3 The platform linux is incompatible with this module, build skipped.",
        ));
}

#[test]
fn test_plan_json_output() {
    let tmp = temp_dir();
    let addon = write_package(tmp.path(), "addon", r#"{"name": "addon", "version": "1.0.0"}"#);
    fs::write(addon.join("binding.gyp"), "{}").unwrap();
    write_package(
        tmp.path(),
        "armonly",
        r#"{"name": "armonly", "version": "1.0.0", "cpu": ["arm64"], "scripts": {"install": "x"}}"#,
    );

    let output = scriptgate(tmp.path())
        .args(["plan", "addon", "armonly", "--json", "--platform", "linux", "--arch", "x64"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), 2);

    assert_eq!(plans[0]["locator"], "addon@npm:1.0.0");
    assert_eq!(plans[0]["link_type"], "hard");
    assert_eq!(plans[0]["decision"]["outcome"], "run");
    assert_eq!(plans[0]["decision"]["detail"][0]["type"], "shellcode");
    assert_eq!(plans[0]["decision"]["detail"][0]["value"], "node-gyp rebuild");

    assert_eq!(plans[1]["decision"]["outcome"], "skipped");
    assert_eq!(plans[1]["decision"]["detail"], "INCOMPATIBLE_CPU");

    // Diagnostics become JSON events on stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    let event: serde_json::Value = stderr
        .lines()
        .find(|line| line.contains("\"reason\":\"diagnostic\""))
        .map(|line| serde_json::from_str(line).unwrap())
        .unwrap();
    assert_eq!(event["name"], "INCOMPATIBLE_CPU");
    assert_eq!(event["code"], "SG0008");
    assert_eq!(event["level"], "warning");
}

#[test]
fn test_plan_missing_manifest_fails() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join("empty")).unwrap();

    scriptgate(tmp.path())
        .args(["plan", "empty"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load package"));
}

// ============================================================================
// scriptgate check
// ============================================================================

#[test]
fn test_check_compatible() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "fsevents",
        r#"{"name": "fsevents", "version": "2.3.3", "os": ["darwin"]}"#,
    );

    scriptgate(tmp.path())
        .args(["check", "fsevents", "--platform", "darwin", "--arch", "arm64"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fsevents@npm:2.3.3 is compatible with darwin-arm64"));
}

#[test]
fn test_check_incompatible_fails() {
    let tmp = temp_dir();
    write_package(
        tmp.path(),
        "fsevents",
        r#"{"name": "fsevents", "version": "2.3.3", "os": ["darwin"]}"#,
    );

    scriptgate(tmp.path())
        .args(["check", "fsevents", "--platform", "win32", "--arch", "x64"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("INCOMPATIBLE_OS").or(predicate::str::contains("SG0007")))
        .stderr(predicate::str::contains("cannot be built on win32-x64"));
}

#[test]
fn test_check_finds_manifest_in_parent() {
    let tmp = temp_dir();
    let pkg = write_package(
        tmp.path(),
        "armonly",
        r#"{"name": "armonly", "version": "1.0.0", "cpu": ["!ia32"]}"#,
    );
    let nested = pkg.join("lib/deep");
    fs::create_dir_all(&nested).unwrap();

    scriptgate(tmp.path())
        .args(["check", "--platform", "linux", "--arch", "x64"])
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("armonly@npm:1.0.0 is compatible"));
}

#[test]
fn test_check_without_manifest_fails() {
    let tmp = temp_dir();

    scriptgate(tmp.path())
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `package.json`"));
}
