//! Integration tests exercising the assembled app through egui_kittest.
//!
//! The editor area is custom-painted, so behavior is asserted through state
//! changes after running frames rather than through AccessKit queries.
mod common;

use egui_kittest::kittest::Queryable;
use pypad_core::log::Severity;

use common::create_harness;

// ── Startup ────────────────────────────────────────────────────────────────

#[test]
fn test_app_starts_with_one_active_tab() {
    let harness = create_harness();
    let app = harness.state();
    assert!(app.panel.tab_count() >= 1);
    assert!(app.panel.active < app.panel.tab_count());
}

#[test]
fn test_menu_bar_is_present() {
    let harness = create_harness();
    harness.get_by_label("File");
    harness.get_by_label("Run");
    harness.get_by_label("View");
}

// ── Tab operations through the tab bar ─────────────────────────────────────

#[test]
fn test_add_tab_button_creates_and_activates() {
    let mut harness = create_harness();
    let before = harness.state().panel.tab_count();

    harness.get_by_label("+").click();
    harness.run();

    let app = harness.state();
    assert_eq!(app.panel.tab_count(), before + 1);
    assert_eq!(app.panel.active, app.panel.tab_count() - 1);
}

#[test]
fn test_close_button_activates_preceding_tab() {
    let mut harness = create_harness();
    harness.state_mut().panel.add_tab();
    harness.state_mut().panel.add_tab();
    harness.run();
    let count = harness.state().panel.tab_count();

    harness.get_by_label("\u{00D7}").click();
    harness.run();

    let app = harness.state();
    assert_eq!(app.panel.tab_count(), count - 1);
    assert!(app.panel.active < app.panel.tab_count());
}

#[test]
fn test_tab_contents_are_independent() {
    let mut harness = create_harness();
    harness.state_mut().panel.active_tab_mut().insert_text("first");
    harness.state_mut().panel.add_tab();
    harness.state_mut().panel.active_tab_mut().insert_text("second");
    harness.run();

    let app = harness.state();
    let texts: Vec<String> = app.panel.tabs.iter().map(|t| t.text()).collect();
    assert!(texts.contains(&"first".to_string()));
    assert!(texts.contains(&"second".to_string()));
    assert_eq!(app.panel.active_tab().text(), "second");
}

// ── Editing through the widget state ───────────────────────────────────────

#[test]
fn test_inserted_text_lands_in_buffer() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .panel
        .active_tab_mut()
        .insert_text("print('hello')");
    harness.run();

    assert_eq!(
        harness.state().panel.active_tab().text(),
        "print('hello')"
    );
}

#[test]
fn test_multiline_text_updates_line_count() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .panel
        .active_tab_mut()
        .insert_text("a = 1\nb = 2\nc = 3");
    harness.run();

    assert_eq!(harness.state().panel.active_tab().buffer.len_lines(), 3);
}

// ── Output panel ───────────────────────────────────────────────────────────

#[test]
fn test_output_panel_renders_logged_lines() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .output
        .log("NameError: boom", Severity::Error);
    harness.run();

    harness.get_by_label("NameError: boom");
}

#[test]
fn test_output_lines_accumulate_in_order() {
    let mut harness = create_harness();
    let base = harness.state().output.lines().len();
    harness.state_mut().output.log("one", Severity::Info);
    harness.state_mut().output.log("two", Severity::Warning);
    harness.run();

    let app = harness.state();
    let lines = app.output.lines();
    assert_eq!(lines.len(), base + 2);
    assert_eq!(lines[base].text, "one");
    assert_eq!(lines[base + 1].text, "two");
}

#[test]
fn test_clear_log_menu_action() {
    let mut harness = create_harness();
    harness.state_mut().output.log("stale", Severity::Regular);
    harness.run();

    harness.get_by_label("Run").click();
    harness.run();
    harness.get_by_label("Clear Log").click();
    harness.run();

    assert!(harness.state().output.is_empty());
}

// ── View toggles ───────────────────────────────────────────────────────────

#[test]
fn test_line_numbers_toggle() {
    let mut harness = create_harness();
    let before = harness.state().show_line_numbers;

    harness.get_by_label("View").click();
    harness.run();
    harness.get_by_label("Line Numbers").click();
    harness.run();

    assert_eq!(harness.state().show_line_numbers, !before);
}
