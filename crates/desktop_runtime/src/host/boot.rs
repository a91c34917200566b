use leptos::{create_effect, logging, spawn_local};
use platform_host::unix_time_ms_now;

use crate::{
    host::DesktopHostContext, model::AppKind, persistence,
    runtime_context::DesktopRuntimeContext,
};

/// Apps opened on a desktop that has never been initialized.
const FIRST_BOOT_APPS: [&str; 2] = ["browser", "notes"];

pub(super) fn install_boot_hydration(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let durable = host.durable_store();
            match persistence::load_persisted_desktop(durable.as_ref()).await {
                Ok(Some(document)) => {
                    let windows = document.state.windows().len();
                    runtime.transition(|store| store.hydrate(document));
                    logging::log!("window store hydrated ({windows} windows)");
                }
                Ok(None) => {}
                Err(err) => logging::warn!("window store hydration failed: {err}"),
            }

            if !runtime.with_store(|store| store.state().is_initialized()) {
                run_first_boot(runtime);
            }
        });
    });
}

fn run_first_boot(runtime: DesktopRuntimeContext) {
    for app in FIRST_BOOT_APPS {
        runtime.transition(|store| store.open_window(AppKind::from(app), unix_time_ms_now()));
    }
    runtime.transition(|store| store.set_initialized());
    runtime.transition(|store| store.capture_snapshot(unix_time_ms_now()));
}
