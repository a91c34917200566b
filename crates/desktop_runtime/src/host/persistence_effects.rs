use leptos::{logging, spawn_local};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_layout(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let document = runtime.with_store(|store| store.persisted());
    spawn_local(async move {
        let durable = host.durable_store();
        if let Err(err) = persistence::save_persisted_desktop(durable.as_ref(), &document).await {
            logging::warn!("persist window store failed: {err}");
        }
    });
}
