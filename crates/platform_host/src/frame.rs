//! Display-refresh scheduling contracts.
//!
//! Browsers expose `requestAnimationFrame`; other hosts (and tests) queue callbacks and flush them
//! explicitly with [`ManualFrameScheduler::run_pending`].

use std::{cell::RefCell, rc::Rc};

/// Handle for a scheduled frame callback, usable to cancel it before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub i32);

/// Callback run once on the next display refresh.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Host service that runs callbacks on the next display refresh.
pub trait FrameScheduler {
    /// Schedules `callback` for the next frame.
    ///
    /// Returns `None` when the host cannot schedule frames; callers should then apply the update
    /// synchronously or drop it.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameToken>;

    /// Cancels a frame previously returned by [`FrameScheduler::request_frame`]. Cancelling a
    /// frame that already ran is a no-op.
    fn cancel_frame(&self, token: FrameToken);
}

#[derive(Default)]
struct ManualFrameQueue {
    next_token: i32,
    pending: Vec<(FrameToken, FrameCallback)>,
}

#[derive(Clone, Default)]
/// Frame scheduler whose callbacks only run when [`ManualFrameScheduler::run_pending`] is called.
pub struct ManualFrameScheduler {
    queue: Rc<RefCell<ManualFrameQueue>>,
}

impl std::fmt::Debug for ManualFrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualFrameScheduler")
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl ManualFrameScheduler {
    /// Returns the number of callbacks waiting for the next frame.
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Runs every queued callback in request order and returns how many ran.
    pub fn run_pending(&self) -> usize {
        let pending = std::mem::take(&mut self.queue.borrow_mut().pending);
        let ran = pending.len();
        for (_, callback) in pending {
            callback();
        }
        ran
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameToken> {
        let mut queue = self.queue.borrow_mut();
        queue.next_token = queue.next_token.wrapping_add(1);
        let token = FrameToken(queue.next_token);
        queue.pending.push((token, callback));
        Some(token)
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.queue
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != token);
    }
}
