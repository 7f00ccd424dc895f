//! End-to-end session persistence scenarios against real files.

use pypad_config::session::{load_tabs, save_tabs};
use pypad_config::TabRecord;
use tempfile::TempDir;

fn record(index: usize, label: &str, active: bool, command: &str) -> TabRecord {
    TabRecord {
        index,
        label: label.to_string(),
        active,
        command: command.to_string(),
    }
}

#[test]
fn shutdown_then_startup_restores_tabs_and_active() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("pypad-tabs.json");

    // Three tabs, the middle one active.
    let saved = vec![
        record(0, "Python", false, "a"),
        record(1, "Python 2", true, "b"),
        record(2, "Python 3", false, "c"),
    ];
    save_tabs(&path, &saved).expect("save");

    let restored = load_tabs(&path).expect("session present");
    assert_eq!(restored.len(), 3);
    let commands: Vec<&str> = restored.iter().map(|r| r.command.as_str()).collect();
    assert_eq!(commands, vec!["a", "b", "c"]);
    assert!(restored[1].active);
    assert_eq!(restored.iter().filter(|r| r.active).count(), 1);
}

#[test]
fn save_overwrites_previous_session_wholesale() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("pypad-tabs.json");

    save_tabs(
        &path,
        &[
            record(0, "Python", true, "old"),
            record(1, "Python 2", false, "older"),
        ],
    )
    .expect("first save");

    save_tabs(&path, &[record(0, "Python", true, "new")]).expect("second save");

    let restored = load_tabs(&path).expect("session present");
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].command, "new");
}

#[test]
fn truncated_file_is_treated_as_absent() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("pypad-tabs.json");

    save_tabs(&path, &[record(0, "Python", true, "x = 1")]).expect("save");
    let full = std::fs::read_to_string(&path).expect("read back");
    std::fs::write(&path, &full[..full.len() / 2]).expect("truncate");

    assert!(load_tabs(&path).is_none());
}
