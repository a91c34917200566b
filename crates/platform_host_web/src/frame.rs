//! `requestAnimationFrame`-backed frame scheduler.

use platform_host::{FrameCallback, FrameScheduler, FrameToken};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser frame scheduler backed by `window.requestAnimationFrame`.
pub struct WebFrameScheduler;

impl FrameScheduler for WebFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameToken> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window()?;
            let callback = Closure::once_into_js(move || callback());
            window
                .request_animation_frame(callback.unchecked_ref())
                .ok()
                .map(FrameToken)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(callback);
            None
        }
    }

    fn cancel_frame(&self, token: FrameToken) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(token.0);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = token;
        }
    }
}
