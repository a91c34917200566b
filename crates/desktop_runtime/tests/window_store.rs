use std::collections::BTreeSet;

use desktop_runtime::{
    interaction::PointerPress, GestureCommit, PointerPosition, ResizeEdge, RuntimeEffect, Viewport,
    WindowGestures, WindowId, WindowManagerConfig, WindowRect, WindowStore,
};
use pretty_assertions::assert_eq;

fn desktop() -> WindowStore {
    desktop_with_page(1280, 720)
}

fn desktop_with_page(width: i32, height: i32) -> WindowStore {
    let config = WindowManagerConfig::default();
    let viewport = Viewport::from_page_size(width, height, &config);
    WindowStore::new(config, viewport)
}

/// Opens and closes `browser` twice after `notes`, leaving the pair one open short of auto-tile.
fn prime_notes_browser_pair(store: &mut WindowStore) -> WindowId {
    let notes = open(store, "notes", 0);
    for now in [1_000, 2_000] {
        let browser = open(store, "browser", now);
        let _ = store.close_window(browser).deliver();
    }
    notes
}

fn assert_inside_viewport(store: &WindowStore) {
    let viewport = store.viewport();
    for window in store.state().windows() {
        let rect = window.rect;
        assert!(
            rect.x >= 0 && rect.y >= 0 && rect.right() <= viewport.width && rect.bottom() <= viewport.height,
            "{} at {rect:?} leaves {viewport:?}",
            window.id
        );
    }
}

fn open(store: &mut WindowStore, kind: &str, now_ms: u64) -> WindowId {
    let effects = store.open_window(kind, now_ms).deliver();
    assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
    store
        .active_window_id()
        .expect("opened window becomes active")
}

fn rect(store: &WindowStore, window_id: WindowId) -> WindowRect {
    store.window(window_id).expect("window exists").rect
}

fn assert_z_order_sound(store: &WindowStore) {
    let z_values: BTreeSet<u64> = store.state().windows().iter().map(|w| w.z_index).collect();
    assert_eq!(z_values.len(), store.state().windows().len(), "z-index collision");
    assert!(z_values
        .iter()
        .all(|z| *z <= store.state().z_counter()));
}

#[test]
fn first_window_cascades_from_origin_in_effective_viewport() {
    let mut store = desktop();
    assert_eq!(
        store.viewport(),
        Viewport {
            width: 1280,
            height: 676
        }
    );

    let notes = open(&mut store, "notes", 0);

    assert_eq!(
        rect(&store, notes),
        WindowRect {
            x: 70,
            y: 50,
            w: 520,
            h: 340
        }
    );
    assert_eq!(store.window(notes).map(|w| w.title.as_str()), Some("Notes"));
}

#[test]
fn third_co_open_tiles_new_window_beside_partner() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);

    for now in [1_000, 2_000] {
        let browser = open(&mut store, "browser", now);
        assert_eq!(store.window(browser).map(|w| w.rect.x), Some(94));
        let _ = store.close_window(browser).deliver();
    }
    let browser = open(&mut store, "browser", 3_000);

    assert_eq!(
        rect(&store, browser),
        WindowRect {
            x: 896,
            y: 0,
            w: 384,
            h: 676
        }
    );
    assert_eq!(
        rect(&store, notes),
        WindowRect {
            x: 0,
            y: 0,
            w: 896,
            h: 676
        }
    );
    assert_eq!(store.active_window_id(), Some(browser));
    let partner_z = store.window(notes).map(|w| w.z_index);
    let new_z = store.window(browser).map(|w| w.z_index);
    assert!(partner_z < new_z);
    assert_z_order_sound(&store);
}

#[test]
fn focusing_the_top_window_twice_is_a_no_op() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let _browser = open(&mut store, "browser", 10_000);

    let first = store.focus_window(notes);
    assert!(first.changed());
    let _ = first.deliver();
    let before = store.state().clone();

    let second = store.focus_window(notes);
    assert!(!second.changed());
    assert_eq!(store.state(), &before);
}

#[test]
fn z_indices_stay_unique_across_mixed_operations() {
    let mut store = desktop();
    let a = open(&mut store, "notes", 0);
    let b = open(&mut store, "browser", 10_000);
    let c = open(&mut store, "terminal", 20_000);

    let _ = store.focus_window(a).deliver();
    let _ = store.minimize_window(b).deliver();
    let _ = store.toggle_taskbar_window(b).deliver();
    let _ = store.toggle_maximize(c).deliver();
    let _ = store.focus_window(a).deliver();

    assert_z_order_sound(&store);
    assert_eq!(store.state().top_visible_window_id(), Some(a));
    assert_eq!(store.active_window_id(), Some(a));
}

#[test]
fn maximize_then_restore_returns_previous_frame() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let _ = store.reposition_window(notes, 300, 200).deliver();
    let before = rect(&store, notes);

    let _ = store.toggle_maximize(notes).deliver();
    assert_eq!(rect(&store, notes), store.viewport().rect());
    assert!(store.window(notes).is_some_and(|w| w.maximized));

    let _ = store.toggle_maximize(notes).deliver();
    assert_eq!(rect(&store, notes), before);
    assert!(store.window(notes).is_some_and(|w| !w.maximized && w.saved_rect.is_none()));
}

#[test]
fn restoring_a_snapshot_brings_back_windows_but_keeps_usage_and_history() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let _ = store.capture_snapshot(1_000).deliver();

    let _ = store.reposition_window(notes, 400, 300).deliver();
    let _ = open(&mut store, "browser", 2_000);
    let usage = store.state().usage_stats().clone();
    let _ = store.capture_snapshot(3_000).deliver();

    let _ = store.restore_snapshot(0).deliver();

    assert_eq!(store.state().window_order(), vec![notes]);
    assert_eq!(rect(&store, notes).x, 70);
    assert_eq!(store.active_window_id(), Some(notes));
    assert_eq!(store.state().usage_stats(), &usage);
    assert_eq!(store.history().timestamps(), vec![1_000, 3_000]);

    let stale = store.restore_snapshot(7);
    assert!(!stale.changed());
}

#[test]
fn history_keeps_the_twelve_newest_captures() {
    let mut store = desktop();
    let _ = open(&mut store, "notes", 0);

    for ts in 1..=13 {
        let _ = store.capture_snapshot(ts).deliver();
    }

    assert_eq!(store.history().len(), 12);
    assert_eq!(store.history().timestamps().first(), Some(&2));
    assert_eq!(store.history().timestamps().last(), Some(&13));
}

#[test]
fn closing_an_unknown_window_leaves_state_untouched() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let before = store.state().clone();

    let outcome = store.close_window(WindowId(notes.0 + 40));

    assert!(!outcome.changed());
    assert!(outcome.notifications.is_empty());
    assert_eq!(store.state(), &before);
}

#[test]
fn closing_the_active_window_activates_the_next_topmost() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let browser = open(&mut store, "browser", 10_000);
    let terminal = open(&mut store, "terminal", 20_000);
    let _ = store.focus_window(notes).deliver();
    let _ = store.focus_window(terminal).deliver();

    let _ = store.close_window(terminal).deliver();

    assert_eq!(store.active_window_id(), Some(notes));
    assert!(store.window(browser).is_some());
}

#[test]
fn north_west_resize_gesture_keeps_south_east_corner() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let record = store.window(notes).cloned().expect("notes window");
    let config = store.config().clone();
    let mut gestures = WindowGestures::new(notes);

    let press = PointerPress {
        pointer_id: 1,
        button: 0,
        position: PointerPosition { x: 70, y: 50 },
    };
    assert!(gestures.begin_resize(press, ResizeEdge::NorthWest, &record));
    let _ = gestures.resize_to(1, PointerPosition { x: 170, y: 100 }, store.viewport(), &config);
    let commit = gestures.finish_resize(1).expect("resize commit");
    assert_eq!(
        commit,
        GestureCommit::Resize {
            window_id: notes,
            rect: WindowRect {
                x: 170,
                y: 100,
                w: 420,
                h: 290
            }
        }
    );

    let _ = store.commit_gesture(commit).deliver();

    let after = rect(&store, notes);
    assert_eq!((after.right(), after.bottom()), (record.rect.right(), record.rect.bottom()));
    assert_eq!((after.w, after.h), (420, 290));
}

#[test]
fn drag_commit_snaps_to_the_left_edge() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let record = store.window(notes).cloned().expect("notes window");
    let viewport = store.viewport();
    let config = store.config().clone();
    let mut gestures = WindowGestures::new(notes);

    let press = PointerPress {
        pointer_id: 3,
        button: 0,
        position: PointerPosition { x: 100, y: 60 },
    };
    assert!(gestures.begin_drag(press, &record));
    let _ = gestures.drag_to(3, PointerPosition { x: 42, y: 160 }, viewport, &config);
    let commit = gestures.finish_drag(3).expect("drag commit");
    let _ = store.commit_gesture(commit).deliver();

    assert_eq!(
        rect(&store, notes),
        WindowRect {
            x: 0,
            y: 150,
            w: 520,
            h: 340
        }
    );
}

#[test]
fn auto_tile_on_narrow_viewport_keeps_both_windows_inside() {
    let mut store = desktop_with_page(800, 644);
    let notes = prime_notes_browser_pair(&mut store);

    let browser = open(&mut store, "browser", 3_000);

    assert_inside_viewport(&store);
    assert_eq!(
        rect(&store, browser),
        WindowRect {
            x: 540,
            y: 0,
            w: 260,
            h: 600
        }
    );
    assert_eq!(rect(&store, notes).right(), rect(&store, browser).x);
}

#[test]
fn auto_tile_falls_back_to_cascade_when_partner_is_minimized() {
    let mut store = desktop();
    let notes = prime_notes_browser_pair(&mut store);
    let _ = store.minimize_window(notes).deliver();

    let browser = open(&mut store, "browser", 3_000);

    assert_eq!(
        rect(&store, browser),
        WindowRect {
            x: 94,
            y: 74,
            w: 520,
            h: 340
        }
    );
    assert_eq!(
        rect(&store, notes),
        WindowRect {
            x: 70,
            y: 50,
            w: 520,
            h: 340
        }
    );
    assert!(store.window(notes).is_some_and(|w| w.minimized));
}

#[test]
fn auto_tile_falls_back_to_cascade_when_partner_is_closed() {
    let mut store = desktop();
    let notes = prime_notes_browser_pair(&mut store);
    let _ = store.close_window(notes).deliver();

    let browser = open(&mut store, "browser", 3_000);

    assert_eq!(
        rect(&store, browser),
        WindowRect {
            x: 70,
            y: 50,
            w: 520,
            h: 340
        }
    );
    assert_eq!(store.state().window_order(), vec![browser]);
}

#[test]
fn restore_reproduces_captured_windows_and_active_window_exactly() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let browser = open(&mut store, "browser", 10_000);
    let _ = store.focus_window(notes).deliver();
    let _ = store.capture_snapshot(11_000).deliver();
    let captured_windows = store.state().windows().to_vec();
    let captured_active = store.active_window_id();

    // Restoring the layout that is already on screen changes nothing.
    assert!(!store.restore_snapshot(0).changed());

    let _ = store.reposition_window(notes, 500, 300).deliver();
    let _ = store.toggle_maximize(browser).deliver();
    let _ = open(&mut store, "terminal", 20_000);

    let _ = store.restore_snapshot(0).deliver();

    assert_eq!(store.state().windows(), captured_windows.as_slice());
    assert_eq!(store.active_window_id(), captured_active);
}

#[test]
fn west_resize_dragged_off_screen_keeps_east_edge() {
    let mut store = desktop();
    let notes = open(&mut store, "notes", 0);
    let before = store.window(notes).cloned().expect("notes window");
    let viewport = store.viewport();
    let config = store.config().clone();
    let mut gestures = WindowGestures::new(notes);

    let press = PointerPress {
        pointer_id: 9,
        button: 0,
        position: PointerPosition { x: 70, y: 200 },
    };
    assert!(gestures.begin_resize(press, ResizeEdge::West, &before));
    let _ = gestures.resize_to(9, PointerPosition { x: -80, y: 200 }, viewport, &config);
    let commit = gestures.finish_resize(9).expect("resize commit");
    let _ = store.commit_gesture(commit).deliver();

    let after = rect(&store, notes);
    assert_eq!(after.x, 0);
    assert_eq!(after.right(), before.rect.right());
    assert_inside_viewport(&store);
}
