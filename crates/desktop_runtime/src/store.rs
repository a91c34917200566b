//! The window store: owned state, named transitions, and projection subscriptions.
//!
//! Every write goes through a named transition that runs [`reduce_desktop`] on a scratch copy and
//! commits only when the reducer accepts the action. Rejected actions (stale ids, geometry changes
//! on maximized windows) are logged and leave the store untouched.
//!
//! Observers subscribe to a [`Projection`] and are handed back as [`Notifications`] only when that
//! projection's value changed. The caller delivers them after releasing any borrow of the store,
//! so callbacks may freely read it again.

use std::{fmt, rc::Rc};

use leptos::logging::warn;

use crate::{
    config::WindowManagerConfig,
    interaction::GestureCommit,
    model::{AppKind, DesktopState, Viewport, WindowId, WindowRecord},
    persistence::PersistedDesktop,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    time_machine::{capture, SnapshotHistory},
    usage::UsageStats,
};

/// A read-only view of the store that observers can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// One window's record (`None` once it closes).
    Window(WindowId),
    /// The active window id.
    ActiveWindow,
    /// Window ids in open order.
    WindowOrder,
    /// Every window record.
    Windows,
    /// Usage heuristic counters.
    UsageStats,
    /// Snapshot capture timestamps, oldest first.
    History,
}

/// Current value of a [`Projection`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionValue {
    Window(Option<WindowRecord>),
    ActiveWindow(Option<WindowId>),
    WindowOrder(Vec<WindowId>),
    Windows(Vec<WindowRecord>),
    UsageStats(UsageStats),
    History(Vec<u64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type ObserverCallback = Rc<dyn Fn(&ProjectionValue)>;

struct Observer {
    id: SubscriptionId,
    projection: Projection,
    callback: ObserverCallback,
}

/// Observer callbacks owed after a transition, with the values they should receive.
#[derive(Default)]
#[must_use = "notifications do nothing until delivered"]
pub struct Notifications(Vec<(ObserverCallback, ProjectionValue)>);

impl Notifications {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Invokes each pending callback in subscription order.
    pub fn deliver(self) {
        for (callback, value) in self.0 {
            callback(&value);
        }
    }
}

impl fmt::Debug for Notifications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|(_, value)| value))
            .finish()
    }
}

/// Result of a store transition.
#[derive(Debug, Default)]
#[must_use = "dispatch outcomes carry effects and observer notifications"]
pub struct DispatchOutcome {
    /// Side effects for the runtime to execute. Empty when nothing changed.
    pub effects: Vec<RuntimeEffect>,
    /// Observers whose projection changed.
    pub notifications: Notifications,
}

impl DispatchOutcome {
    /// Returns `true` when the transition changed stored state.
    pub fn changed(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Delivers notifications and hands back the effects.
    pub fn deliver(self) -> Vec<RuntimeEffect> {
        self.notifications.deliver();
        self.effects
    }
}

/// Single owner of window state, usage stats, and snapshot history.
pub struct WindowStore {
    config: WindowManagerConfig,
    viewport: Viewport,
    state: DesktopState,
    history: SnapshotHistory,
    observers: Vec<Observer>,
    next_subscription: u64,
}

impl fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowStore")
            .field("viewport", &self.viewport)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl WindowStore {
    pub fn new(config: WindowManagerConfig, viewport: Viewport) -> Self {
        let history = SnapshotHistory::new(config.snapshot_capacity);
        Self {
            config,
            viewport,
            state: DesktopState::default(),
            history,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.state.window(window_id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.state.active_window_id()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// Computes the current value of `projection`.
    pub fn project(&self, projection: Projection) -> ProjectionValue {
        match projection {
            Projection::Window(id) => ProjectionValue::Window(self.state.window(id).cloned()),
            Projection::ActiveWindow => ProjectionValue::ActiveWindow(self.state.active_window_id()),
            Projection::WindowOrder => ProjectionValue::WindowOrder(self.state.window_order()),
            Projection::Windows => ProjectionValue::Windows(self.state.windows().to_vec()),
            Projection::UsageStats => ProjectionValue::UsageStats(self.state.usage_stats().clone()),
            Projection::History => ProjectionValue::History(self.history.timestamps()),
        }
    }

    /// Registers `callback` for changes to `projection`.
    pub fn subscribe(
        &mut self,
        projection: Projection,
        callback: impl Fn(&ProjectionValue) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push(Observer {
            id,
            projection,
            callback: Rc::new(callback),
        });
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id != id);
        self.observers.len() != before
    }

    pub fn open_window(&mut self, app_kind: impl Into<AppKind>, now_ms: u64) -> DispatchOutcome {
        self.dispatch(DesktopAction::OpenWindow {
            app_kind: app_kind.into(),
            viewport: self.viewport,
            now_ms,
        })
    }

    pub fn close_window(&mut self, window_id: WindowId) -> DispatchOutcome {
        self.dispatch(DesktopAction::CloseWindow { window_id })
    }

    pub fn focus_window(&mut self, window_id: WindowId) -> DispatchOutcome {
        self.dispatch(DesktopAction::FocusWindow { window_id })
    }

    pub fn minimize_window(&mut self, window_id: WindowId) -> DispatchOutcome {
        self.dispatch(DesktopAction::MinimizeWindow { window_id })
    }

    pub fn toggle_maximize(&mut self, window_id: WindowId) -> DispatchOutcome {
        self.dispatch(DesktopAction::ToggleMaximize {
            window_id,
            viewport: self.viewport,
        })
    }

    pub fn reposition_window(&mut self, window_id: WindowId, x: i32, y: i32) -> DispatchOutcome {
        self.dispatch(DesktopAction::RepositionWindow {
            window_id,
            x,
            y,
            viewport: self.viewport,
        })
    }

    pub fn resize_window(&mut self, window_id: WindowId, width: i32, height: i32) -> DispatchOutcome {
        self.dispatch(DesktopAction::ResizeWindow {
            window_id,
            width,
            height,
            viewport: self.viewport,
        })
    }

    pub fn toggle_taskbar_window(&mut self, window_id: WindowId) -> DispatchOutcome {
        self.dispatch(DesktopAction::ToggleTaskbarWindow { window_id })
    }

    pub fn set_initialized(&mut self) -> DispatchOutcome {
        self.dispatch(DesktopAction::SetInitialized)
    }

    /// Adopts a new effective viewport and re-fits every window into it.
    pub fn viewport_changed(&mut self, viewport: Viewport) -> DispatchOutcome {
        self.viewport = viewport;
        self.dispatch(DesktopAction::ViewportChanged { viewport })
    }

    /// Commits the final geometry of a finished pointer gesture.
    ///
    /// A resize is applied as shrink, move, then grow so that moving the origin is never blocked
    /// by the window's pre-gesture size.
    pub fn commit_gesture(&mut self, commit: GestureCommit) -> DispatchOutcome {
        let viewport = self.viewport;
        match commit {
            GestureCommit::Move { window_id, x, y } => self.dispatch(DesktopAction::RepositionWindow {
                window_id,
                x,
                y,
                viewport,
            }),
            GestureCommit::Resize { window_id, rect } => {
                let Some(current) = self.state.window(window_id).map(|w| w.rect) else {
                    return self.dispatch(DesktopAction::ResizeWindow {
                        window_id,
                        width: rect.w,
                        height: rect.h,
                        viewport,
                    });
                };
                self.dispatch_all([
                    DesktopAction::ResizeWindow {
                        window_id,
                        width: current.w.min(rect.w),
                        height: current.h.min(rect.h),
                        viewport,
                    },
                    DesktopAction::RepositionWindow {
                        window_id,
                        x: rect.x,
                        y: rect.y,
                        viewport,
                    },
                    DesktopAction::ResizeWindow {
                        window_id,
                        width: rect.w,
                        height: rect.h,
                        viewport,
                    },
                ])
            }
        }
    }

    /// Appends a capture of the current layout to the history.
    pub fn capture_snapshot(&mut self, now_ms: u64) -> DispatchOutcome {
        let before = self.observe();
        self.history.push(capture(&self.state, now_ms));
        DispatchOutcome {
            effects: vec![RuntimeEffect::PersistLayout],
            notifications: self.collect_notifications(before),
        }
    }

    /// Restores the capture at `index` (0 = oldest). Out-of-range indices are a no-op.
    ///
    /// Usage stats and the history itself are left as they are.
    pub fn restore_snapshot(&mut self, index: usize) -> DispatchOutcome {
        let Some(snapshot) = self.history.get(index).cloned() else {
            warn!("window store ignored restore of missing snapshot {index}");
            return DispatchOutcome::default();
        };
        self.dispatch(DesktopAction::RestoreSnapshot {
            snapshot,
            viewport: self.viewport,
        })
    }

    /// Replaces state and history with a persisted document and re-fits it to the viewport.
    pub fn hydrate(&mut self, document: PersistedDesktop) -> DispatchOutcome {
        let before = self.observe();
        let history_before = self.history.clone();
        self.history = SnapshotHistory::from_entries(self.history.capacity(), document.snapshots);

        let mut outcome = self.dispatch_all([
            DesktopAction::Hydrate {
                state: document.state,
            },
            DesktopAction::ViewportChanged {
                viewport: self.viewport,
            },
        ]);
        // History changes are invisible to `dispatch_all`; recompute against the pre-hydrate values.
        outcome.notifications = self.collect_notifications(before);
        if outcome.effects.is_empty() && self.history != history_before {
            outcome.effects.push(RuntimeEffect::PersistLayout);
        }
        outcome
    }

    /// Document to write to durable storage.
    pub fn persisted(&self) -> PersistedDesktop {
        PersistedDesktop::new(self.state.clone(), self.history.entries())
    }

    /// Runs one action through the reducer.
    pub fn dispatch(&mut self, action: DesktopAction) -> DispatchOutcome {
        self.dispatch_all([action])
    }

    /// Runs several actions as one transition: observers are notified once at the end and
    /// rejected actions are skipped individually.
    fn dispatch_all(&mut self, actions: impl IntoIterator<Item = DesktopAction>) -> DispatchOutcome {
        let before = self.observe();
        let mut next = self.state.clone();
        let mut effects = Vec::new();

        for action in actions {
            let mut scratch = next.clone();
            match reduce_desktop(&mut scratch, &self.config, action) {
                Ok(new_effects) => {
                    if scratch != next {
                        next = scratch;
                        for effect in new_effects {
                            if !effects.contains(&effect) {
                                effects.push(effect);
                            }
                        }
                    }
                }
                Err(err) => warn!("window store ignored action: {err}"),
            }
        }

        if next == self.state {
            return DispatchOutcome::default();
        }
        self.state = next;
        DispatchOutcome {
            effects,
            notifications: self.collect_notifications(before),
        }
    }

    fn observe(&self) -> Vec<ProjectionValue> {
        self.observers
            .iter()
            .map(|observer| self.project(observer.projection))
            .collect()
    }

    fn collect_notifications(&self, before: Vec<ProjectionValue>) -> Notifications {
        Notifications(
            self.observers
                .iter()
                .zip(before)
                .filter_map(|(observer, previous)| {
                    let current = self.project(observer.projection);
                    (current != previous).then(|| (observer.callback.clone(), current))
                })
                .collect(),
        )
    }
}
