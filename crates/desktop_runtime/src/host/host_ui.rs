use crate::{config::WindowManagerConfig, model::Viewport};

/// Page size used when no browser window is available (native builds, tests).
const FALLBACK_PAGE_WIDTH: i32 = 1280;
const FALLBACK_PAGE_HEIGHT: i32 = 720;

pub(super) fn desktop_viewport(config: &WindowManagerConfig) -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_PAGE_WIDTH);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_PAGE_HEIGHT);

            return Viewport::from_page_size(width, height, config);
        }
    }

    Viewport::from_page_size(FALLBACK_PAGE_WIDTH, FALLBACK_PAGE_HEIGHT, config)
}
