use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn demo_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/catalog.json")
}

/// Helper function to create a Command with --no-color flag for testing
fn roam_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roam").expect("Failed to find roam binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Temporary database with the demo catalog imported
fn seeded_environment() -> (TempDir, PathBuf) {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roam_cmd(&db_path)
        .args(["catalog", "import"])
        .arg(demo_catalog())
        .assert()
        .success();

    (temp_dir, db_path)
}

fn compose_goa(db_path: &Path) {
    roam_cmd(db_path)
        .args([
            "trip", "compose", "1", "--place", "10,11", "--activity", "20", "--dish", "30",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_list_empty_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roam_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_no_subcommand_lists_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roam_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_import_catalog() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roam_cmd(&db_path)
        .args(["catalog", "import"])
        .arg(demo_catalog())
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Imported 11 catalog row(s)"));
}

#[test]
fn test_cli_import_rejects_malformed_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let bad_file = temp_dir.path().join("bad.json");
    std::fs::write(&bad_file, r#"{"destinations": [{"name": "No id"}]}"#).unwrap();

    roam_cmd(&db_path)
        .args(["catalog", "import"])
        .arg(&bad_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid catalog file"));
}

#[test]
fn test_cli_destination_list() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["destination", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | Goa | India |"))
        .stdout(predicate::str::contains("₹27,000"))
        .stdout(predicate::str::contains("Manali"));
}

#[test]
fn test_cli_destination_show_catalog() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["destination", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Goa, India"))
        .stdout(predicate::str::contains("## Activities (2)"))
        .stdout(predicate::str::contains("- Scuba diving (ID: 20) ₹1,500"))
        .stdout(predicate::str::contains("Hadimba Temple").not());
}

#[test]
fn test_cli_destination_show_missing() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["destination", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Destination with ID 99 not found"));
}

#[test]
fn test_cli_compose_dry_run_saves_nothing() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args([
            "trip", "compose", "1", "--place", "10,11", "--activity", "20", "--dish", "30",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Trip to Goa"))
        .stdout(predicate::str::contains("- Selected items: 4"))
        .stdout(predicate::str::contains("| **Total** | **₹28,900** |"));

    roam_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_compose_saves_trip() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args([
            "trip", "compose", "1", "--place", "10,11", "--activity", "20", "--dish", "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Trip 1 saved with all 4 selected item(s)",
        ))
        .stdout(predicate::str::contains("# 1. Trip to Goa"))
        .stdout(predicate::str::contains("- Budget: ₹28,900"))
        .stdout(predicate::str::contains("## Places (2)"))
        .stdout(predicate::str::contains("## Culinary (1)"));

    roam_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Trip to Goa (ID: 1)"))
        .stdout(predicate::str::contains("- **Items**: 4"));
}

#[test]
fn test_cli_compose_without_items_uses_base_budget() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["trip", "compose", "2", "--name", "Spring in the hills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip 1 saved with all 0 selected item(s)"))
        .stdout(predicate::str::contains("# 1. Spring in the hills"))
        .stdout(predicate::str::contains("- Budget: ₹13,000"));
}

#[test]
fn test_cli_compose_rejects_unknown_item() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["trip", "compose", "1", "--activity", "41"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No activity with ID 41 in the catalog"));

    roam_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_trip_show_is_scoped_to_user() {
    let (_temp_dir, db_path) = seeded_environment();
    compose_goa(&db_path);

    roam_cmd(&db_path)
        .args(["trip", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: ○ Planned"))
        .stdout(predicate::str::contains("Basilica of Bom Jesus"));

    roam_cmd(&db_path)
        .args(["--user", "someone-else", "trip", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip with ID 1 not found"));

    roam_cmd(&db_path)
        .args(["--user", "someone-else", "trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_trip_advance_through_lifecycle() {
    let (_temp_dir, db_path) = seeded_environment();
    compose_goa(&db_path);

    roam_cmd(&db_path)
        .args(["trip", "advance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip 1 moved from planned to ongoing"));

    roam_cmd(&db_path)
        .args(["trip", "advance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip 1 moved from ongoing to completed"));

    roam_cmd(&db_path)
        .args(["trip", "advance", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trip is already completed"));
}

#[test]
fn test_cli_advance_missing_trip() {
    let (_temp_dir, db_path) = seeded_environment();

    roam_cmd(&db_path)
        .args(["trip", "advance", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip with ID 7 not found"));
}
