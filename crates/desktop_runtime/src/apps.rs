//! Launcher registry, window titles, and per-app content providers.
//!
//! The registry is generated at build time from `apps.toml`. Windows may host any app kind; kinds
//! missing from the registry get a humanized title and a generic content panel.

mod placeholders;

use std::sync::OnceLock;

use leptos::*;
use serde::Deserialize;

use crate::model::AppKind;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    pub app_kind: AppKind,
    pub title: String,
    pub summary: String,
}

/// Launcher entries in display order.
pub fn app_registry() -> &'static [AppDescriptor] {
    static CATALOG: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(APP_CATALOG_JSON).expect("generated app catalog should parse")
    })
}

pub fn app_descriptor(app_kind: &AppKind) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| &entry.app_kind == app_kind)
}

/// Registry title, or the humanized kind for unregistered apps.
pub fn app_title(app_kind: &AppKind) -> String {
    app_descriptor(app_kind)
        .map(|entry| entry.title.clone())
        .unwrap_or_else(|| humanize_app_kind(app_kind.as_str()))
}

/// `"my-cool_app"` -> `"My Cool App"`.
pub fn humanize_app_kind(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_separator = false;
    for ch in raw.chars() {
        if ch == '-' || ch == '_' {
            if !in_separator {
                out.push(' ');
                in_separator = true;
            }
        } else {
            in_separator = false;
            out.push(ch);
        }
    }

    let mut titled = String::with_capacity(out.len());
    let mut at_word_start = true;
    for ch in out.chars() {
        if at_word_start && ch.is_alphanumeric() {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    titled
}

/// Renders the body of a window hosting `app_kind`.
pub fn app_content(app_kind: &AppKind) -> View {
    match app_descriptor(app_kind) {
        Some(entry) => placeholders::registered_app_panel(entry),
        None => placeholders::unknown_app_panel(app_kind),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_is_ordered_like_the_launcher() {
        let kinds: Vec<&str> = app_registry()
            .iter()
            .map(|entry| entry.app_kind.as_str())
            .collect();
        assert_eq!(
            kinds,
            vec!["browser", "files", "notes", "calculator", "settings", "terminal"]
        );
    }

    #[test]
    fn registered_titles_come_from_catalog() {
        assert_eq!(app_title(&AppKind::from("browser")), "Web Browser");
        assert_eq!(app_title(&AppKind::from("files")), "File Explorer");
    }

    #[test]
    fn unregistered_titles_are_humanized() {
        assert_eq!(app_title(&AppKind::from("photo-booth")), "Photo Booth");
        assert_eq!(humanize_app_kind("task__manager-pro"), "Task Manager Pro");
        assert_eq!(humanize_app_kind("x2_y"), "X2 Y");
        assert_eq!(humanize_app_kind("already Fine"), "Already Fine");
    }
}
