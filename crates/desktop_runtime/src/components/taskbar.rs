use super::*;
use platform_host::format_clock_hh_mm;

use crate::model::WindowState;

const CLOCK_REFRESH: Duration = Duration::from_secs(15);

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let windows = use_windows();
    let active_window = use_active_window();
    let clock_now = create_rw_signal(unix_time_ms_now());

    if let Ok(interval) =
        set_interval_with_handle(move || clock_now.set(unix_time_ms_now()), CLOCK_REFRESH)
    {
        on_cleanup(move || interval.clear());
    }

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <div class="taskbar-running-region" role="group" aria-label="Running windows">
                <For
                    each=move || windows.get()
                    key=|record| record.id
                    children=move |record| {
                        let window_id = record.id;
                        let is_active = move || active_window.get() == Some(window_id);
                        let is_minimized = move || {
                            windows.with(|all| {
                                all.iter().any(|win| {
                                    win.id == window_id && win.state() == WindowState::Minimized
                                })
                            })
                        };
                        view! {
                            <button
                                type="button"
                                id=taskbar_button_dom_id(window_id)
                                class=move || {
                                    let mut class_name = String::from("taskbar-app");
                                    if is_active() && !is_minimized() {
                                        class_name.push_str(" focused");
                                    }
                                    if is_minimized() {
                                        class_name.push_str(" minimized");
                                    }
                                    class_name
                                }
                                aria-pressed=move || is_active() && !is_minimized()
                                title=record.title.clone()
                                on:click=move |_| {
                                    runtime.transition(move |store| store.toggle_taskbar_window(window_id));
                                }
                            >
                                <span class="taskbar-app-label">{record.title.clone()}</span>
                            </button>
                        }
                    }
                />
            </div>
            <div class="taskbar-right">
                <TimeMachinePanel />
                <span class="taskbar-clock" aria-live="off">
                    {move || format_clock_hh_mm(clock_now.get())}
                </span>
            </div>
        </footer>
    }
}
