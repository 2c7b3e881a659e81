#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LOCATION_ID: &str = "location-11111111-1111-1111-1111-111111111111";
const TRAVELER_ID: &str = "traveler-22222222-2222-2222-2222-222222222222";
const EARLY_EVENT_ID: &str = "event-33333333-3333-3333-3333-333333333333";
const LATE_EVENT_ID: &str = "event-44444444-4444-4444-4444-444444444444";

/// Create a temp directory with a complete test world file.
fn test_world() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(
        &path,
        format!(
            r#"{{
  "meta": {{
    "name": "Test World",
    "description": "A world for integration tests",
    "schema_version": 1,
    "created_at": "2024-01-01T00:00:00Z",
    "updated_at": "2024-01-01T00:00:00Z"
  }},
  "locations": [
    {{
      "id": "{LOCATION_ID}",
      "name": "The Sunken Plaza",
      "description": "A drowned marketplace.",
      "span": {{
        "latitude": {{"low": -10.0, "high": 10.0}},
        "longitude": {{"low": -10.0, "high": 10.0}},
        "altitude": {{"low": -100.0, "high": 0.0}},
        "continuum": {{"low": -1000.0, "high": 1000.0}},
        "reality": [0]
      }},
      "tags": ["ruin", "market"]
    }}
  ],
  "travelers": [
    {{
      "id": "{TRAVELER_ID}",
      "name": "Ilsa Voss",
      "description": "",
      "journey": [
        {{
          "position": {{"latitude": 100.0, "longitude": 0.0, "altitude": 0.0,
                        "continuum": 1.0, "reality": 0}},
          "movement_type": "immediate"
        }},
        {{
          "position": {{"latitude": 0.0, "longitude": 0.0, "altitude": -50.0,
                        "continuum": 2.0, "reality": 0}},
          "movement_type": "immediate"
        }}
      ],
      "tags": ["scout"]
    }}
  ],
  "events": [
    {{
      "id": "{LATE_EVENT_ID}",
      "name": "The Second Flood",
      "description": "",
      "span": {{
        "latitude": {{"low": -20.0, "high": 20.0}},
        "longitude": {{"low": -20.0, "high": 20.0}},
        "altitude": {{"low": -200.0, "high": 50.0}},
        "continuum": {{"low": 0.0, "high": 10.0}},
        "reality": [0]
      }},
      "affected_locations": ["{LOCATION_ID}"],
      "affected_travelers": ["{TRAVELER_ID}"],
      "tags": ["flood"]
    }},
    {{
      "id": "{EARLY_EVENT_ID}",
      "name": "The First Flood",
      "description": "",
      "span": {{
        "latitude": {{"low": -20.0, "high": 20.0}},
        "longitude": {{"low": -20.0, "high": 20.0}},
        "altitude": {{"low": -200.0, "high": 50.0}},
        "continuum": {{"low": -5.0, "high": 0.0}},
        "reality": [0]
      }},
      "affected_locations": ["{LOCATION_ID}"],
      "tags": ["flood"]
    }}
  ]
}}"#
        ),
    )
    .unwrap();
    (dir, path)
}

fn zw() -> Command {
    Command::cargo_bin("zw").unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_world_file() {
    let dir = TempDir::new().unwrap();
    zw().args(["init", "myworld"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created world 'myworld'"));

    assert!(dir.path().join("myworld.json").exists());
}

#[test]
fn init_fails_if_file_exists() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("myworld.json"), "{}").unwrap();

    zw().args(["init", "myworld"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_entity_counts() {
    let (_dir, path) = test_world();
    zw().args(["check", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Test World")
                .and(predicate::str::contains("1 locations, 1 travelers, 2 events")),
        );
}

#[test]
fn check_rejects_inverted_range() {
    let (_dir, path) = test_world();
    let broken = fs::read_to_string(&path)
        .unwrap()
        .replace(r#"{"low": -5.0, "high": 0.0}"#, r#"{"low": 5.0, "high": 0.0}"#);
    fs::write(&path, broken).unwrap();

    zw().args(["check", "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn check_rejects_dangling_event_link() {
    let (_dir, path) = test_world();
    // Rename only the stored location, leaving the event references dangling.
    let broken = fs::read_to_string(&path).unwrap().replace(
        &format!("\"id\": \"{LOCATION_ID}\""),
        "\"id\": \"location-99999999-9999-9999-9999-999999999999\"",
    );
    fs::write(&path, broken).unwrap();

    zw().args(["check", "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("location not found"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_locations_shows_table() {
    let (_dir, path) = test_world();
    zw().args(["list", "locations", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sunken")
                .and(predicate::str::contains("ruin"))
                .and(predicate::str::contains("1 entities")),
        );
}

#[test]
fn list_applies_tag_filters() {
    let (_dir, path) = test_world();
    zw().args([
        "list",
        "events",
        "--filter",
        "tagged_none=flood",
        "-f",
        path.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No entities found"));
}

#[test]
fn list_rejects_unsupported_filter() {
    let (_dir, path) = test_world();
    zw().args([
        "list",
        "events",
        "--filter",
        "haunted=yes",
        "-f",
        path.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported filter: haunted"));
}

#[test]
fn list_rejects_journey_filter_on_events() {
    let (_dir, path) = test_world();
    zw().args([
        "list",
        "events",
        "--filter",
        r#"journey_includes={"latitude": 0.0, "longitude": 0.0, "altitude": 0.0, "continuum": 0.0, "reality": 0}"#,
        "-f",
        path.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported filter: journey_includes"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_displays_event_details() {
    let (_dir, path) = test_world();
    zw().args(["show", LATE_EVENT_ID, "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Second Flood")
                .and(predicate::str::contains(LOCATION_ID))
                .and(predicate::str::contains(TRAVELER_ID)),
        );
}

#[test]
fn show_unknown_id_fails() {
    let (_dir, path) = test_world();
    zw().args([
        "show",
        "event-99999999-9999-9999-9999-999999999999",
        "-f",
        path.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("event not found"));
}

// ---------------------------------------------------------------------------
// timeline
// ---------------------------------------------------------------------------

#[test]
fn location_timeline_orders_events_by_continuum() {
    let (_dir, path) = test_world();
    let output = zw()
        .args(["timeline", LOCATION_ID, "-f", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("The First Flood").unwrap();
    let second = stdout.find("The Second Flood").unwrap();
    assert!(first < second, "events out of order:\n{stdout}");
}

#[test]
fn traveler_timeline_interleaves_moves_and_events() {
    let (_dir, path) = test_world();
    let output = zw()
        .args(["timeline", TRAVELER_ID, "-f", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    // Two immediate moves, then the event discovered at the second move.
    let arrival = stdout
        .find("@ 2 in reality 0")
        .unwrap_or_else(|| panic!("missing second move in:\n{stdout}"));
    let flood = stdout.find("The Second Flood").unwrap();
    assert!(arrival < flood, "event should follow the arrival:\n{stdout}");
}

#[test]
fn timeline_rejects_event_ids() {
    let (_dir, path) = test_world();
    zw().args(["timeline", LATE_EVENT_ID, "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a location or traveler id"));
}
