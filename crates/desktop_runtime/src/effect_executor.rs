//! Explicit runtime effect-queue executor for store-emitted side effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that drains store-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the queue before running effects so transitions triggered by an effect start a fresh
    // batch instead of being dropped by this drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        // Several transitions in one turn each ask for a save; the last write wins anyway.
        let mut seen = Vec::with_capacity(queued.len());
        for effect in queued {
            if seen.contains(&effect) {
                continue;
            }
            seen.push(effect.clone());
            runtime.host.get_value().run_runtime_effect(runtime, effect);
        }
    });
}
