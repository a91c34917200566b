//! Static content panels shown inside app windows.

use leptos::*;

use super::AppDescriptor;
use crate::model::AppKind;

pub(super) fn registered_app_panel(entry: &AppDescriptor) -> View {
    let class = format!("app-panel app-panel-{}", entry.app_kind);
    view! {
        <section class=class>
            <h3>{entry.title.clone()}</h3>
            <p>{entry.summary.clone()}</p>
        </section>
    }
    .into_view()
}

pub(super) fn unknown_app_panel(app_kind: &AppKind) -> View {
    view! {
        <section class="app-panel">
            <h3>{app_kind.to_string()}</h3>
            <p>"Window initialized successfully."</p>
        </section>
    }
    .into_view()
}
