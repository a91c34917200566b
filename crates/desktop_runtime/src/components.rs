//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod time_machine;
mod window;

use std::time::Duration;

use leptos::*;
use platform_host::unix_time_ms_now;

use self::{taskbar::Taskbar, time_machine::TimeMachinePanel, window::DesktopWindow};
use crate::{
    apps,
    model::{AppKind, PointerPosition, ResizeEdge, WindowId},
    runtime_context::{use_active_window, use_history, use_window_order, use_window_record, use_windows},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn open_app(runtime: DesktopRuntimeContext, app_kind: AppKind) {
    runtime.transition(move |store| store.open_window(app_kind, unix_time_ms_now()));
}

#[component]
/// Full desktop: launcher strip, window canvas, and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_order = use_window_order();
    let config = runtime.with_store(|store| store.config().clone());
    let snapshot_interval = Duration::from_millis(config.snapshot_interval_ms);

    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.get_value().desktop_viewport(&config);
        runtime.transition(|store| store.viewport_changed(viewport));
    });
    on_cleanup(move || resize_listener.remove());

    if let Ok(interval) = set_interval_with_handle(
        move || runtime.transition(|store| store.capture_snapshot(unix_time_ms_now())),
        snapshot_interval,
    ) {
        on_cleanup(move || interval.clear());
    }

    let launcher_buttons = apps::app_registry()
        .iter()
        .map(|entry| {
            let app_kind = entry.app_kind.clone();
            view! {
                <button
                    type="button"
                    class="launch-button"
                    title=entry.title.clone()
                    on:click=move |_| open_app(runtime, app_kind.clone())
                >
                    <span class="app-label">{entry.title.clone()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="desktop-shell">
            <header class="desktop-launcher" aria-label="Application launcher">
                {launcher_buttons}
            </header>
            <main class="desktop-canvas" aria-label="Desktop canvas">
                <For
                    each=move || window_order.get()
                    key=|window_id| *window_id
                    children=move |window_id| view! { <DesktopWindow window_id=window_id /> }
                />
            </main>
            <Taskbar />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "n",
        ResizeEdge::South => "s",
        ResizeEdge::East => "e",
        ResizeEdge::West => "w",
        ResizeEdge::NorthEast => "ne",
        ResizeEdge::NorthWest => "nw",
        ResizeEdge::SouthEast => "se",
        ResizeEdge::SouthWest => "sw",
    }
}

fn taskbar_button_dom_id(window_id: WindowId) -> String {
    format!("taskbar-window-button-{}", window_id.0)
}
