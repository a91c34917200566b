use super::*;
use crate::{
    config::WindowManagerConfig,
    interaction::{FrameCoalescer, PointerPress, VisualUpdate, WindowGestures, PRIMARY_BUTTON},
    model::{WindowRecord, WindowState},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[cfg(target_arch = "wasm32")]
fn try_release_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            if element.has_pointer_capture(ev.pointer_id()) {
                let _ = element.release_pointer_capture(ev.pointer_id());
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_release_pointer_capture(_: &web_sys::PointerEvent) {}

fn frame_style(record: &WindowRecord) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        record.rect.x, record.rect.y, record.rect.w, record.rect.h, record.z_index
    )
}

#[cfg(target_arch = "wasm32")]
fn apply_visual(section: NodeRef<html::Section>, update: VisualUpdate) {
    let Some(section) = section.get_untracked() else {
        return;
    };
    let element: &web_sys::HtmlElement = &section;
    let style = element.style();
    match update {
        VisualUpdate::Translate { dx, dy } => {
            let _ = element.class_list().add_1("is-dragging");
            let _ = style.set_property("transform", &format!("translate3d({dx}px, {dy}px, 0)"));
        }
        VisualUpdate::Frame(rect) => {
            let _ = element.class_list().add_1("is-resizing");
            let _ = style.set_property("left", &format!("{}px", rect.x));
            let _ = style.set_property("top", &format!("{}px", rect.y));
            let _ = style.set_property("width", &format!("{}px", rect.w));
            let _ = style.set_property("height", &format!("{}px", rect.h));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_visual(_: NodeRef<html::Section>, _: VisualUpdate) {}

/// Drops gesture-only styling and re-syncs the element with the stored frame.
#[cfg(target_arch = "wasm32")]
fn reset_visual(section: NodeRef<html::Section>, record: Option<WindowRecord>) {
    let Some(section) = section.get_untracked() else {
        return;
    };
    let element: &web_sys::HtmlElement = &section;
    let _ = element.class_list().remove_2("is-dragging", "is-resizing");
    match record {
        Some(record) => {
            let _ = element.set_attribute("style", &frame_style(&record));
        }
        None => {
            let _ = element.style().remove_property("transform");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reset_visual(_: NodeRef<html::Section>, _: Option<WindowRecord>) {}

/// Pointer plumbing shared by the title bar and the resize handles of one window.
#[derive(Clone, Copy)]
struct WindowGestureKit {
    window_id: WindowId,
    runtime: DesktopRuntimeContext,
    window: ReadSignal<Option<WindowRecord>>,
    gestures: StoredValue<WindowGestures>,
    coalescer: StoredValue<FrameCoalescer>,
    config: StoredValue<WindowManagerConfig>,
    section: NodeRef<html::Section>,
}

impl WindowGestureKit {
    fn press(ev: &web_sys::PointerEvent) -> PointerPress {
        PointerPress {
            pointer_id: ev.pointer_id(),
            button: ev.button(),
            position: pointer_from_pointer_event(ev),
        }
    }

    fn focus(self) {
        let window_id = self.window_id;
        self.runtime
            .transition(move |store| store.focus_window(window_id));
    }

    fn begin_drag(self, ev: web_sys::PointerEvent) {
        if ev.button() != PRIMARY_BUTTON {
            return;
        }
        ev.stop_propagation();
        self.focus();
        let Some(record) = self.window.get_untracked() else {
            return;
        };
        let press = Self::press(&ev);
        let started = self
            .gestures
            .try_update_value(|gestures| gestures.begin_drag(press, &record))
            .unwrap_or(false);
        if started {
            try_set_pointer_capture(&ev);
        }
    }

    fn begin_resize(self, edge: ResizeEdge, ev: web_sys::PointerEvent) {
        if ev.button() != PRIMARY_BUTTON {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        self.focus();
        let Some(record) = self.window.get_untracked() else {
            return;
        };
        let press = Self::press(&ev);
        let started = self
            .gestures
            .try_update_value(|gestures| gestures.begin_resize(press, edge, &record))
            .unwrap_or(false);
        if started {
            try_set_pointer_capture(&ev);
        }
    }

    fn track(self, ev: web_sys::PointerEvent) {
        let pointer_id = ev.pointer_id();
        let position = pointer_from_pointer_event(&ev);
        let viewport = self.runtime.with_store(|store| store.viewport());
        let config = self.config.get_value();
        let update = self
            .gestures
            .try_update_value(|gestures| {
                if gestures.is_dragging() {
                    gestures.drag_to(pointer_id, position, viewport, &config)
                } else if gestures.is_resizing() {
                    gestures.resize_to(pointer_id, position, viewport, &config)
                } else {
                    None
                }
            })
            .flatten();
        let Some(update) = update else {
            return;
        };
        ev.stop_propagation();
        let section = self.section;
        self.coalescer
            .with_value(|coalescer| coalescer.schedule(move || apply_visual(section, update)));
    }

    /// Pointer up and pointer cancel both commit.
    fn finish(self, ev: web_sys::PointerEvent) {
        let pointer_id = ev.pointer_id();
        let commit = self
            .gestures
            .try_update_value(|gestures| {
                gestures
                    .finish_drag(pointer_id)
                    .or_else(|| gestures.finish_resize(pointer_id))
            })
            .flatten();
        let Some(commit) = commit else {
            return;
        };
        try_release_pointer_capture(&ev);
        self.coalescer.with_value(FrameCoalescer::cancel);
        self.runtime.transition(move |store| store.commit_gesture(commit));
        reset_visual(self.section, self.window.get_untracked());
    }

    fn lost_capture(self, ev: web_sys::PointerEvent) {
        let pointer_id = ev.pointer_id();
        let abandoned = self
            .gestures
            .try_update_value(|gestures| gestures.abandon(pointer_id))
            .unwrap_or(false);
        if abandoned {
            self.coalescer.with_value(FrameCoalescer::cancel);
            reset_visual(self.section, self.window.get_untracked());
        }
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window = use_window_record(window_id);
    let active_window = use_active_window();
    let section = create_node_ref::<html::Section>();

    let kit = WindowGestureKit {
        window_id,
        runtime,
        window,
        gestures: store_value(WindowGestures::new(window_id)),
        coalescer: store_value(FrameCoalescer::new(
            runtime.host.get_value().frame_scheduler(),
        )),
        config: store_value(runtime.with_store(|store| store.config().clone())),
        section,
    };
    on_cleanup(move || {
        let _ = kit.coalescer.try_with_value(FrameCoalescer::cancel);
    });

    let (title, app_kind) = window
        .get_untracked()
        .map(|record| (record.title, record.app_kind))
        .unwrap_or_else(|| (String::new(), AppKind::new("")));

    let visible = move || window.with(|record| record.as_ref().is_some_and(WindowRecord::is_visible));
    let window_state = move || window.with(|record| record.as_ref().map(WindowRecord::state));
    let maximized = move || window_state() == Some(WindowState::Maximized);
    let window_class = move || {
        let active_class = if active_window.get() == Some(window_id) {
            " active"
        } else {
            ""
        };
        let maximized_class = if maximized() { " maximized" } else { "" };
        format!("desktop-window{active_class}{maximized_class}")
    };
    let window_style = move || window.with(|record| record.as_ref().map(frame_style).unwrap_or_default());

    let minimize = move |_: web_sys::MouseEvent| runtime.transition(move |store| store.minimize_window(window_id));
    let toggle_maximize = move |_: web_sys::MouseEvent| runtime.transition(move |store| store.toggle_maximize(window_id));
    let close = move |_: web_sys::MouseEvent| runtime.transition(move |store| store.close_window(window_id));

    view! {
        <Show when=visible fallback=|| ()>
            <section
                node_ref=section
                class=window_class
                style=window_style
                role="dialog"
                aria-label=title.clone()
                on:pointerdown=move |_| kit.focus()
            >
                <header
                    class="titlebar"
                    on:pointerdown=move |ev| kit.begin_drag(ev)
                    on:pointermove=move |ev| kit.track(ev)
                    on:pointerup=move |ev| kit.finish(ev)
                    on:pointercancel=move |ev| kit.finish(ev)
                    on:lostpointercapture=move |ev| kit.lost_capture(ev)
                    on:dblclick=move |ev: web_sys::MouseEvent| {
                        stop_mouse_event(&ev);
                        toggle_maximize(ev);
                    }
                >
                    <span class="titlebar-title">{title.clone()}</span>
                    <div class="titlebar-controls">
                        <button
                            type="button"
                            class="window-control"
                            aria-label="Minimize window"
                            title="Minimize"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=minimize
                        >
                            "-"
                        </button>
                        <button
                            type="button"
                            class="window-control"
                            aria-label=move || { if maximized() { "Restore window" } else { "Maximize window" } }
                            title="Maximize"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=toggle_maximize
                        >
                            "[ ]"
                        </button>
                        <button
                            type="button"
                            class="window-control close"
                            aria-label="Close window"
                            title="Close"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=close
                        >
                            "x"
                        </button>
                    </div>
                </header>
                <div class="window-content">{apps::app_content(&app_kind)}</div>
                <Show when=move || !maximized() fallback=|| ()>
                    {ResizeEdge::ALL
                        .into_iter()
                        .map(|edge| view! { <WindowResizeHandle kit=kit edge=edge /> })
                        .collect_view()}
                </Show>
            </section>
        </Show>
    }
}

#[component]
fn WindowResizeHandle(kit: WindowGestureKit, edge: ResizeEdge) -> impl IntoView {
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=move |ev| kit.begin_resize(edge, ev)
            on:pointermove=move |ev| kit.track(ev)
            on:pointerup=move |ev| kit.finish(ev)
            on:pointercancel=move |ev| kit.finish(ev)
            on:lostpointercapture=move |ev| kit.lost_capture(ev)
        />
    }
}
