//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`WindowStore`], the runtime effect queue, and host bootstrap
//! wiring. Components read store projections through the `use_*` hooks, which keep a signal in
//! sync with a store subscription for as long as the component lives. UI composition stays in
//! [`crate::components`].

use std::{cell::RefCell, rc::Rc};

use leptos::*;

use crate::{
    config::WindowManagerConfig,
    effect_executor,
    host::DesktopHostContext,
    model::{WindowId, WindowRecord},
    reducer::RuntimeEffect,
    store::{DispatchOutcome, Projection, ProjectionValue, SubscriptionId, WindowStore},
};

#[derive(Clone, Copy)]
/// Leptos context for reading the window store and running its transitions.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// The window store shared by every component under the provider.
    pub store: StoredValue<Rc<RefCell<WindowStore>>>,
    /// Queue of runtime effects emitted by store transitions and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
}

impl DesktopRuntimeContext {
    /// Reads the store.
    pub fn with_store<R>(&self, read: impl FnOnce(&WindowStore) -> R) -> R {
        let store = self.store.get_value();
        let store = store.borrow();
        read(&store)
    }

    /// Runs a store transition, then delivers its notifications and queues its effects.
    ///
    /// Notifications are delivered after the store borrow is released so observers may read it.
    pub fn transition(&self, apply: impl FnOnce(&mut WindowStore) -> DispatchOutcome) {
        let outcome = {
            let store = self.store.get_value();
            let mut store = store.borrow_mut();
            apply(&mut store)
        };
        let effects = outcome.deliver();
        if !effects.is_empty() {
            self.effects.update(|queue| queue.extend(effects));
        }
    }

    /// Subscribes to a store projection.
    pub fn subscribe(
        &self,
        projection: Projection,
        callback: impl Fn(&ProjectionValue) + 'static,
    ) -> SubscriptionId {
        self.store
            .get_value()
            .borrow_mut()
            .subscribe(projection, callback)
    }

    /// Removes a store subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.get_value().borrow_mut().unsubscribe(id);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Window manager limits; defaults to the shipped desktop values.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let host = DesktopHostContext::default();
    let viewport = host.desktop_viewport(&config);
    logging::log!(
        "desktop runtime starting on {} host ({}x{})",
        host.host_strategy_name(),
        viewport.width,
        viewport.height
    );

    let runtime = DesktopRuntimeContext {
        host: store_value(host),
        store: store_value(Rc::new(RefCell::new(WindowStore::new(config, viewport)))),
        effects: create_rw_signal(Vec::<RuntimeEffect>::new()),
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    runtime.host.get_value().install_boot_hydration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

fn use_projection<T: Clone + Default + 'static>(
    projection: Projection,
    extract: fn(&ProjectionValue) -> Option<T>,
) -> ReadSignal<T> {
    let runtime = use_desktop_runtime();
    let initial = runtime.with_store(|store| extract(&store.project(projection)));
    let signal = create_rw_signal(initial.unwrap_or_default());
    let subscription = runtime.subscribe(projection, move |value| {
        if let Some(next) = extract(value) {
            signal.set(next);
        }
    });
    on_cleanup(move || runtime.unsubscribe(subscription));
    signal.read_only()
}

/// Tracks one window's record; `None` once it closes.
pub fn use_window_record(window_id: WindowId) -> ReadSignal<Option<WindowRecord>> {
    use_projection(Projection::Window(window_id), |value| match value {
        ProjectionValue::Window(record) => Some(record.clone()),
        _ => None,
    })
}

/// Tracks the active window id.
pub fn use_active_window() -> ReadSignal<Option<WindowId>> {
    use_projection(Projection::ActiveWindow, |value| match value {
        ProjectionValue::ActiveWindow(id) => Some(*id),
        _ => None,
    })
}

/// Tracks window ids in open order.
pub fn use_window_order() -> ReadSignal<Vec<WindowId>> {
    use_projection(Projection::WindowOrder, |value| match value {
        ProjectionValue::WindowOrder(order) => Some(order.clone()),
        _ => None,
    })
}

/// Tracks every window record (taskbar).
pub fn use_windows() -> ReadSignal<Vec<WindowRecord>> {
    use_projection(Projection::Windows, |value| match value {
        ProjectionValue::Windows(windows) => Some(windows.clone()),
        _ => None,
    })
}

/// Tracks snapshot capture timestamps, oldest first.
pub fn use_history() -> ReadSignal<Vec<u64>> {
    use_projection(Projection::History, |value| match value {
        ProjectionValue::History(timestamps) => Some(timestamps.clone()),
        _ => None,
    })
}
