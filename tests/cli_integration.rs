use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn target_picker() -> Command {
    Command::cargo_bin("target-picker").unwrap()
}

fn scenario_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const SMALL: &str = r##"
[[bodies]]
name = "Sun"
color = "#ffcc00"

[[bodies]]
name = "Far"
parent = "Sun"
distance = 200.0

[[bodies]]
name = "Near"
parent = "Sun"
distance = 100.0

[[satellites]]
name = "Probe"
body = "Near"

[[antennas]]
name = "Dish"
"##;

#[test]
fn shows_help() {
    target_picker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("antenna"));
}

#[test]
fn shows_version() {
    target_picker()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    target_picker()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn tree_subcommand_help() {
    target_picker()
        .args(["tree", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--collapse"));
}

#[test]
fn tui_subcommand_help() {
    target_picker()
        .args(["tui", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interactive"));
}

#[test]
fn tree_prints_builtin_system() {
    target_picker()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("    No Target\n  ▼ Kerbol\n"))
        .stdout(predicate::str::contains("*     ▼ Mun\n"));
}

#[test]
fn tree_from_scenario_file() {
    let file = scenario_file(SMALL);
    target_picker()
        .arg("tree")
        .arg(file.path())
        .assert()
        .success()
        .stdout("*   No Target\n  ▼ Sun\n    ▼ Near\n        Probe\n      Far\n");
}

#[test]
fn tree_with_target_and_collapse() {
    let file = scenario_file(SMALL);
    target_picker()
        .arg("tree")
        .arg(file.path())
        .args(["--target", "Far", "--collapse", "Near"])
        .assert()
        .success()
        .stdout("    No Target\n  ▼ Sun\n    ► Near\n*     Far\n");
}

#[test]
fn tree_with_colors() {
    let file = scenario_file(SMALL);
    target_picker()
        .arg("tree")
        .arg(file.path())
        .arg("--colors")
        .assert()
        .success()
        .stdout(predicate::str::contains("  ▼ Sun  [#ffcc00]"))
        .stdout(predicate::str::contains("Far  [#ffeb04]"));
}

#[test]
fn tree_with_json_output() {
    target_picker()
        .args(["tree", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"selection\""));
}

#[test]
fn tree_for_named_antenna() {
    target_picker()
        .args(["tree", "--antenna", "Communotron 88-88"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("*   No Target\n"));
}

#[test]
fn unknown_antenna_fails() {
    target_picker()
        .args(["tree", "--antenna", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown antenna 'Nope'"));
}

#[test]
fn unknown_target_fails() {
    target_picker()
        .args(["tree", "--target", "Vulcan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vulcan"));
}

#[test]
fn invalid_scenario_fails() {
    let file = scenario_file("[[satellites]]\nname = \"Lost\"\nbody = \"Nowhere\"\n");
    target_picker()
        .arg("tree")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere"));
}

#[test]
fn verbose_flag_accepted() {
    target_picker().args(["-vvv", "tree"]).assert().success();
}

#[test]
fn invalid_config_path_fails() {
    target_picker()
        .args(["--config", "/nonexistent/path.toml", "tree"])
        .assert()
        .failure();
}

#[test]
fn config_changes_sentinel_label() {
    let config = scenario_file("[picker]\nno_target_label = \"Idle\"\nindent_width = 3\n");
    let scenario = scenario_file(SMALL);
    target_picker()
        .arg("--config")
        .arg(config.path())
        .arg("tree")
        .arg(scenario.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("*   Idle\n  ▼ Sun\n     ▼ Near\n"));
}

#[test]
fn generates_completions() {
    target_picker()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("target-picker"));
}
