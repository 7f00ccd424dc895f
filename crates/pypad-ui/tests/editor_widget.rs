//! Editor widget behavior through the full app harness.
//!
//! The widget paints directly, so assertions go through the tab state after
//! frames run.
mod common;

use pypad_core::cursor::Position;

use common::create_harness;

#[test]
fn test_caret_starts_at_origin() {
    let harness = create_harness();
    let cursor = &harness.state().panel.active_tab().cursor;
    assert_eq!(cursor.position, Position::new(0, 0));
}

#[test]
fn test_caret_advances_past_inserted_text() {
    let mut harness = create_harness();
    harness.state_mut().panel.active_tab_mut().insert_text("abc");
    harness.run();

    let cursor = &harness.state().panel.active_tab().cursor;
    assert_eq!(cursor.position, Position::new(0, 3));
}

#[test]
fn test_selection_survives_frames() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .panel
        .active_tab_mut()
        .insert_text("select me");
    {
        let tab = harness.state_mut().panel.active_tab_mut();
        tab.cursor.move_to(Position::new(0, 0), &tab.buffer);
        tab.cursor.start_selection();
        tab.cursor.move_to(Position::new(0, 6), &tab.buffer);
    }
    harness.run();

    assert_eq!(
        harness.state().panel.active_tab().selected_text().as_deref(),
        Some("select")
    );
}

#[test]
fn test_scroll_clamps_to_content() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .panel
        .active_tab_mut()
        .insert_text("a\nb\nc");
    harness.state_mut().panel.active_tab_mut().scroll_y = 9999.0;
    harness.run();

    let scroll = harness.state().panel.active_tab().scroll_y;
    assert!(scroll <= 2.0, "scroll_y = {scroll}");
}

#[test]
fn test_backward_delete_through_state() {
    let mut harness = create_harness();
    harness.state_mut().panel.active_tab_mut().insert_text("ab");
    harness.state_mut().panel.active_tab_mut().delete_backward();
    harness.run();

    assert_eq!(harness.state().panel.active_tab().text(), "a");
}
