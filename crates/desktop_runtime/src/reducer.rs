//! Reducer actions, side-effect intents, and transition logic for the window store.

use thiserror::Error;

use crate::{
    apps::app_title,
    config::WindowManagerConfig,
    model::{AppKind, DesktopState, Snapshot, Viewport, WindowId, WindowRecord},
    usage::record_open,
    window_manager::{
        cascade_rect, clamp_position, clamp_size, default_rect, fit_to_viewport, tile_split,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window for `app_kind`, consulting the usage heuristic for placement.
    OpenWindow {
        /// App hosted by the new window.
        app_kind: AppKind,
        /// Viewport the window is placed into.
        viewport: Viewport,
        /// Wall-clock time of the open, used by the co-open heuristic.
        now_ms: u64,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id, un-minimizing it.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window, or restore it if it is already maximized.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Viewport to pin to (or restore within).
        viewport: Viewport,
    },
    /// Move a non-maximized window, clamped to the viewport.
    RepositionWindow {
        /// Window to move.
        window_id: WindowId,
        /// Requested left edge.
        x: i32,
        /// Requested top edge.
        y: i32,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Resize a non-maximized window from its current origin.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Re-pin maximized windows and re-clamp the rest after the page was resized.
    ViewportChanged {
        /// New effective viewport.
        viewport: Viewport,
    },
    /// Mark first-boot initialization as done.
    SetInitialized,
    /// Taskbar button behavior: focus when hidden or inactive, minimize when active.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Replace the window collection and active id with a historical capture.
    RestoreSnapshot {
        /// Capture to restore.
        snapshot: Snapshot,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Replace the whole state with a persisted one, repairing counters and focus.
    Hydrate {
        /// Persisted state.
        state: DesktopState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current store state to the durable slot.
    PersistLayout,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a transition was rejected. Callers treat every variant as a no-op.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("{0} not found")]
    WindowNotFound(WindowId),
    /// Geometry changes are ignored while the window is pinned to the viewport.
    #[error("{0} is maximized")]
    WindowMaximized(WindowId),
}

/// Applies a [`DesktopAction`] to the window store state and collects resulting side effects.
///
/// Validation happens before any field is written, so an `Err` leaves `state` untouched.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not
/// present, and [`ReducerError::WindowMaximized`] for move/resize requests on a maximized window.
pub fn reduce_desktop(
    state: &mut DesktopState,
    config: &WindowManagerConfig,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    match action {
        DesktopAction::OpenWindow {
            app_kind,
            viewport,
            now_ms,
        } => {
            let partner = record_open(&mut state.usage, &app_kind, now_ms, config);
            let partner_index = partner.and_then(|kind| topmost_visible_of_kind(state, &kind));
            let window_id = next_window_id(state);

            let rect = match partner_index {
                Some(index) => {
                    let (left, right) = tile_split(viewport, config);
                    let z_index = next_z(state);
                    let partner = &mut state.windows[index];
                    partner.rect = left;
                    partner.maximized = false;
                    partner.saved_rect = None;
                    partner.z_index = z_index;
                    right
                }
                None => cascade_rect(state.windows.len(), viewport, config),
            };

            let z_index = next_z(state);
            state.windows.push(WindowRecord {
                id: window_id,
                title: app_title(&app_kind),
                app_kind,
                rect,
                z_index,
                minimized: false,
                maximized: false,
                saved_rect: None,
            });
            state.active_window_id = Some(window_id);
        }
        DesktopAction::CloseWindow { window_id } => {
            let index = window_index(state, window_id)?;
            state.windows.remove(index);
            if state.active_window_id == Some(window_id) {
                state.active_window_id = state.top_visible_window_id();
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window_internal(state, window_id)?;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let index = window_index(state, window_id)?;
            state.windows[index].minimized = true;
            if state.active_window_id == Some(window_id) {
                state.active_window_id = state.top_visible_window_id();
            }
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            let index = window_index(state, window_id)?;
            let z_index = next_z(state);
            let window = &mut state.windows[index];
            if window.maximized {
                let restored = window
                    .saved_rect
                    .take()
                    .unwrap_or_else(|| default_rect(viewport, config));
                window.rect = fit_to_viewport(restored, viewport, config);
                window.maximized = false;
            } else {
                window.saved_rect = Some(window.rect);
                window.rect = viewport.rect();
                window.maximized = true;
            }
            window.minimized = false;
            window.z_index = z_index;
            state.active_window_id = Some(window_id);
        }
        DesktopAction::RepositionWindow {
            window_id,
            x,
            y,
            viewport,
        } => {
            let window = movable_window_mut(state, window_id)?;
            let (x, y) = clamp_position(x, y, window.rect.w, window.rect.h, viewport);
            window.rect.x = x;
            window.rect.y = y;
        }
        DesktopAction::ResizeWindow {
            window_id,
            width,
            height,
            viewport,
        } => {
            let window = movable_window_mut(state, window_id)?;
            let (w, h) = clamp_size(window.rect.x, window.rect.y, width, height, viewport, config);
            window.rect.w = w;
            window.rect.h = h;
        }
        DesktopAction::ViewportChanged { viewport } => {
            for window in &mut state.windows {
                window.rect = if window.maximized {
                    viewport.rect()
                } else {
                    fit_to_viewport(window.rect, viewport, config)
                };
            }
        }
        DesktopAction::SetInitialized => {
            state.initialized = true;
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let index = window_index(state, window_id)?;
            let showing_active =
                state.active_window_id == Some(window_id) && !state.windows[index].minimized;
            let action = if showing_active {
                DesktopAction::MinimizeWindow { window_id }
            } else {
                DesktopAction::FocusWindow { window_id }
            };
            return reduce_desktop(state, config, action);
        }
        DesktopAction::RestoreSnapshot { snapshot, viewport } => {
            let Snapshot {
                windows,
                active_window_id,
                ..
            } = snapshot;
            state.windows = windows;
            state.active_window_id = active_window_id;
            repair_after_replace(state, config);
            return reduce_desktop(state, config, DesktopAction::ViewportChanged { viewport });
        }
        DesktopAction::Hydrate { state: hydrated } => {
            *state = hydrated;
            repair_after_replace(state, config);
        }
    }

    Ok(vec![RuntimeEffect::PersistLayout])
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn next_z(state: &mut DesktopState) -> u64 {
    state.z_counter = state.z_counter.saturating_add(1);
    state.z_counter
}

fn window_index(state: &DesktopState, window_id: WindowId) -> Result<usize, ReducerError> {
    state
        .windows
        .iter()
        .position(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}

fn movable_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    let index = window_index(state, window_id)?;
    let window = &mut state.windows[index];
    if window.maximized {
        return Err(ReducerError::WindowMaximized(window_id));
    }
    Ok(window)
}

fn topmost_visible_of_kind(state: &DesktopState, kind: &AppKind) -> Option<usize> {
    state
        .windows
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_visible() && &w.app_kind == kind)
        .max_by_key(|(_, w)| w.z_index)
        .map(|(index, _)| index)
}

fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> Result<(), ReducerError> {
    let index = window_index(state, window_id)?;
    let window = &state.windows[index];
    if state.active_window_id == Some(window_id) && window.z_index == state.z_counter {
        return Ok(());
    }
    let z_index = next_z(state);
    let window = &mut state.windows[index];
    window.z_index = z_index;
    window.minimized = false;
    state.active_window_id = Some(window_id);
    Ok(())
}

/// Restores counter, id, size, and focus invariants after the window list was swapped wholesale.
fn repair_after_replace(state: &mut DesktopState, config: &WindowManagerConfig) {
    let max_id = state.windows.iter().map(|w| w.id.0).max().unwrap_or(0);
    state.next_window_id = state.next_window_id.max(max_id.saturating_add(1));

    let max_z = state.windows.iter().map(|w| w.z_index).max().unwrap_or(0);
    state.z_counter = state.z_counter.max(max_z).max(1);

    for window in &mut state.windows {
        window.rect.w = window.rect.w.max(config.min_window_width);
        window.rect.h = window.rect.h.max(config.min_window_height);
        if !window.maximized {
            window.saved_rect = None;
        }
    }

    let active_is_visible = state
        .active_window_id
        .and_then(|id| state.window(id))
        .is_some_and(WindowRecord::is_visible);
    if !active_is_visible {
        state.active_window_id = state.top_visible_window_id();
    }
}
