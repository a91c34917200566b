//! Per-window pointer gesture controllers.
//!
//! A gesture lives from a primary-button press to pointer up/cancel. While it runs, pointer moves
//! are turned into [`VisualUpdate`]s that the view applies directly to the element, coalesced to
//! one per display refresh by [`FrameCoalescer`]. Only the final geometry reaches the store, as a
//! [`GestureCommit`].

use std::{cell::Cell, fmt, rc::Rc};

use platform_host::{FrameScheduler, FrameToken};

use crate::{
    config::WindowManagerConfig,
    model::{PointerPosition, ResizeEdge, Viewport, WindowId, WindowRecord, WindowRect},
    window_manager::{resize_within_viewport, snap_drag_position},
};

/// Browser `PointerEvent.pointerId`.
pub type PointerId = i32;

/// `PointerEvent.button` value of the primary button.
pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPress {
    pub pointer_id: PointerId,
    pub button: i16,
    pub position: PointerPosition,
}

/// Visual-only change to apply while a gesture runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualUpdate {
    /// Offset from the window's committed position (a CSS translate).
    Translate { dx: i32, dy: i32 },
    /// Full replacement frame for the element.
    Frame(WindowRect),
}

/// Final geometry of a finished gesture, to be committed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommit {
    Move { window_id: WindowId, x: i32, y: i32 },
    Resize { window_id: WindowId, rect: WindowRect },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragGesture {
    pointer_id: PointerId,
    grab_dx: i32,
    grab_dy: i32,
    start: WindowRect,
    last_x: i32,
    last_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResizeGesture {
    pointer_id: PointerId,
    edge: ResizeEdge,
    pointer_start: PointerPosition,
    start: WindowRect,
    last: WindowRect,
}

/// Transient drag/resize state for one window. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGestures {
    window_id: WindowId,
    drag: Option<DragGesture>,
    resize: Option<ResizeGesture>,
}

impl WindowGestures {
    pub fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            drag: None,
            resize: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    fn accepts(&self, press: PointerPress, window: &WindowRecord) -> bool {
        press.button == PRIMARY_BUTTON
            && window.id == self.window_id
            && !window.maximized
            && self.drag.is_none()
            && self.resize.is_none()
    }

    /// Starts a title-bar drag. Returns `false` when the press is ignored.
    pub fn begin_drag(&mut self, press: PointerPress, window: &WindowRecord) -> bool {
        if !self.accepts(press, window) {
            return false;
        }
        self.drag = Some(DragGesture {
            pointer_id: press.pointer_id,
            grab_dx: press.position.x - window.rect.x,
            grab_dy: press.position.y - window.rect.y,
            start: window.rect,
            last_x: window.rect.x,
            last_y: window.rect.y,
        });
        true
    }

    /// Starts a resize from `edge`. Returns `false` when the press is ignored.
    pub fn begin_resize(
        &mut self,
        press: PointerPress,
        edge: ResizeEdge,
        window: &WindowRecord,
    ) -> bool {
        if !self.accepts(press, window) {
            return false;
        }
        self.resize = Some(ResizeGesture {
            pointer_id: press.pointer_id,
            edge,
            pointer_start: press.position,
            start: window.rect,
            last: window.rect,
        });
        true
    }

    /// Tracks a pointer move during a drag. Moves from other pointers are ignored.
    pub fn drag_to(
        &mut self,
        pointer_id: PointerId,
        position: PointerPosition,
        viewport: Viewport,
        config: &WindowManagerConfig,
    ) -> Option<VisualUpdate> {
        let drag = self.drag.as_mut().filter(|d| d.pointer_id == pointer_id)?;
        let (x, y) = snap_drag_position(
            position.x - drag.grab_dx,
            position.y - drag.grab_dy,
            drag.start.w,
            drag.start.h,
            viewport,
            config,
        );
        drag.last_x = x;
        drag.last_y = y;
        Some(VisualUpdate::Translate {
            dx: x - drag.start.x,
            dy: y - drag.start.y,
        })
    }

    /// Tracks a pointer move during a resize. Moves from other pointers are ignored.
    ///
    /// The frame never leaves the viewport, so the committed rect matches what was shown.
    pub fn resize_to(
        &mut self,
        pointer_id: PointerId,
        position: PointerPosition,
        viewport: Viewport,
        config: &WindowManagerConfig,
    ) -> Option<VisualUpdate> {
        let resize = self.resize.as_mut().filter(|r| r.pointer_id == pointer_id)?;
        resize.last = resize_within_viewport(
            resize.start,
            resize.edge,
            position.x - resize.pointer_start.x,
            position.y - resize.pointer_start.y,
            viewport,
            config,
        );
        Some(VisualUpdate::Frame(resize.last))
    }

    /// Ends the drag owned by `pointer_id` (pointer up or cancel).
    pub fn finish_drag(&mut self, pointer_id: PointerId) -> Option<GestureCommit> {
        if self.drag.map(|d| d.pointer_id) != Some(pointer_id) {
            return None;
        }
        let drag = self.drag.take()?;
        Some(GestureCommit::Move {
            window_id: self.window_id,
            x: drag.last_x,
            y: drag.last_y,
        })
    }

    /// Ends the resize owned by `pointer_id` (pointer up or cancel).
    pub fn finish_resize(&mut self, pointer_id: PointerId) -> Option<GestureCommit> {
        if self.resize.map(|r| r.pointer_id) != Some(pointer_id) {
            return None;
        }
        let resize = self.resize.take()?;
        Some(GestureCommit::Resize {
            window_id: self.window_id,
            rect: resize.last,
        })
    }

    /// Drops any gesture owned by `pointer_id` without committing (capture lost).
    pub fn abandon(&mut self, pointer_id: PointerId) -> bool {
        let mut dropped = false;
        if self.drag.map(|d| d.pointer_id) == Some(pointer_id) {
            self.drag = None;
            dropped = true;
        }
        if self.resize.map(|r| r.pointer_id) == Some(pointer_id) {
            self.resize = None;
            dropped = true;
        }
        dropped
    }
}

/// Keeps at most one visual update scheduled: each new request cancels and replaces the last.
#[derive(Clone)]
pub struct FrameCoalescer {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameToken>>>,
}

impl fmt::Debug for FrameCoalescer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCoalescer")
            .field("pending", &self.pending.get())
            .finish()
    }
}

impl FrameCoalescer {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Schedules `apply` for the next frame, replacing any update still waiting.
    ///
    /// On hosts that cannot schedule frames the update is dropped; the gesture commit still
    /// carries the final geometry.
    pub fn schedule(&self, apply: impl FnOnce() + 'static) {
        self.cancel();
        let pending = self.pending.clone();
        let token = self.scheduler.request_frame(Box::new(move || {
            pending.set(None);
            apply();
        }));
        self.pending.set(token);
    }

    /// Drops the waiting update, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
    }
}
