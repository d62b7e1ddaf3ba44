use super::*;
use crate::engine::{DisplayChangeKind, HookKey};
use crate::work_area::CycleDirection;

fn two_monitor_harness(settings: Settings) -> Harness {
    let mut h = harness(settings);
    h.platform.add_monitor(1, Rect::new(0, 0, 900, 600));
    h.platform.add_monitor(2, Rect::new(900, 0, 900, 600));
    h.platform.add_window(
        1,
        FakeWindow {
            rect: Rect::new(100, 100, 300, 200),
            monitor: Some(MON),
            zonable: true,
            path: Some("/usr/bin/term".into()),
            ..FakeWindow::default()
        },
    );
    h.platform.state.lock().unwrap().foreground = Some(WIN);
    h.engine.on_display_change(DisplayChangeKind::Initialization);
    h
}

#[test]
fn snap_forward_walks_the_zones_in_order() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.state.lock().unwrap().foreground = Some(WIN);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Forward));
    assert_eq!(h.platform.window(1).stamp, Some(1));
    assert_eq!(h.platform.window(1).rect, Rect::new(0, 0, 300, 600));

    assert!(h.engine.on_snap_hotkey(CycleDirection::Forward));
    assert_eq!(h.platform.window(1).stamp, Some(2));
    assert_eq!(h.platform.window(1).rect, Rect::new(300, 0, 300, 600));
}

#[test]
fn snap_backward_from_nowhere_lands_on_the_last_zone() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.state.lock().unwrap().foreground = Some(WIN);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Backward));
    assert_eq!(h.platform.window(1).stamp, Some(3));
}

#[test]
fn single_monitor_cycles_past_the_edge() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.state.lock().unwrap().foreground = Some(WIN);
    h.platform.state.lock().unwrap().windows.get_mut(&WIN).unwrap().stamp = Some(3);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Forward));
    assert_eq!(h.platform.window(1).stamp, Some(1));
}

#[test]
fn overflow_crosses_onto_the_next_monitor() {
    let mut h = two_monitor_harness(Settings::default());
    h.platform.state.lock().unwrap().windows.get_mut(&WIN).unwrap().stamp = Some(3);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Forward));

    // First zone of the right-hand monitor.
    let window = h.platform.window(1);
    assert_eq!(window.stamp, Some(1));
    assert_eq!(window.rect, Rect::new(900, 0, 300, 600));
}

#[test]
fn overflow_backward_wraps_to_the_rightmost_monitor() {
    let mut h = two_monitor_harness(Settings::default());
    h.platform.state.lock().unwrap().windows.get_mut(&WIN).unwrap().stamp = Some(1);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Backward));

    // Last zone of the right-hand monitor.
    let window = h.platform.window(1);
    assert_eq!(window.stamp, Some(3));
    assert_eq!(window.rect, Rect::new(1500, 0, 300, 600));
}

#[test]
fn a_stale_stamp_counts_as_unzoned() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.state.lock().unwrap().foreground = Some(WIN);
    // Stamp beyond the 3-zone layout.
    h.platform.state.lock().unwrap().windows.get_mut(&WIN).unwrap().stamp = Some(9);

    assert!(h.engine.on_snap_hotkey(CycleDirection::Forward));
    assert_eq!(h.platform.window(1).stamp, Some(1));
}

#[test]
fn key_hook_only_fires_with_override_and_win_held() {
    let settings = Settings {
        override_snap_hotkeys: true,
        ..Settings::default()
    };
    let mut h = single_monitor_with_window(settings);
    h.platform.state.lock().unwrap().foreground = Some(WIN);

    assert!(!h.engine.on_key_down(HookKey::Right, false));
    assert!(!h.engine.on_key_down(HookKey::Other, true));
    assert!(h.engine.on_key_down(HookKey::Right, true));
    assert_eq!(h.platform.window(1).stamp, Some(1));
}

#[test]
fn key_hook_is_inert_when_override_is_off() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.state.lock().unwrap().foreground = Some(WIN);

    assert!(!h.engine.on_key_down(HookKey::Right, true));
    assert_eq!(h.platform.window(1).stamp, None);
}

#[test]
fn a_hinted_drag_swallows_every_keystroke() {
    let mut h = single_monitor_with_window(Settings::default());
    h.platform.set_shift(true);
    h.engine.move_size_start(WIN, MON, pt(200, 200));
    assert!(h.engine.drag_enabled());

    assert!(h.engine.on_key_down(HookKey::Other, false));
    assert!(h.engine.on_key_down(HookKey::Right, true));
    // The swallowed arrow never snapped anything.
    assert_eq!(h.platform.window(1).stamp, None);

    h.engine.move_size_end(WIN, pt(450, 300));
    assert!(!h.engine.on_key_down(HookKey::Other, false));
}

#[test]
fn snap_needs_a_zonable_foreground_window() {
    let mut h = single_monitor_with_window(Settings::default());
    // No foreground window at all.
    assert!(!h.engine.on_snap_hotkey(CycleDirection::Forward));

    h.platform.state.lock().unwrap().foreground = Some(WIN);
    h.platform.state.lock().unwrap().windows.get_mut(&WIN).unwrap().zonable = false;
    assert!(!h.engine.on_snap_hotkey(CycleDirection::Forward));
}
