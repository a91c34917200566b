//! Host-side runtime helpers for executing store effects and querying browser environment state.
//!
//! Effect execution and viewport queries sit behind [`DesktopHostContext`] so the store itself
//! never touches the DOM or storage directly.

mod boot;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use platform_host::{DurableStore, FrameScheduler};
use platform_host_web::{durable_store, frame_scheduler, host_strategy_name};

use crate::{
    config::WindowManagerConfig, model::Viewport, reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for window store side effects.
pub struct DesktopHostContext {
    durable: Rc<dyn DurableStore>,
    frames: Rc<dyn FrameScheduler>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(durable_store()), Rc::new(frame_scheduler()))
    }
}

impl DesktopHostContext {
    /// Builds a host context from explicit services.
    pub fn new(durable: Rc<dyn DurableStore>, frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            durable,
            frames,
            host_strategy_name: host_strategy_name(),
        }
    }

    /// Returns the durable slot store used for window store persistence.
    pub fn durable_store(&self) -> Rc<dyn DurableStore> {
        self.durable.clone()
    }

    /// Returns the display-refresh scheduler used by gesture controllers.
    pub fn frame_scheduler(&self) -> Rc<dyn FrameScheduler> {
        self.frames.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Returns the effective desktop viewport (page minus taskbar strip).
    pub fn desktop_viewport(&self, config: &WindowManagerConfig) -> Viewport {
        host_ui::desktop_viewport(config)
    }

    /// Installs boot hydration and the first-boot layout for the desktop provider.
    ///
    /// 1. load the persisted window store, if any, and hydrate it
    /// 2. on first boot, open the default windows and capture an initial snapshot
    pub fn install_boot_hydration(&self, runtime: DesktopRuntimeContext) {
        boot::install_boot_hydration(self.clone(), runtime);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the store.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistLayout => {
                persistence_effects::persist_layout(self.clone(), runtime)
            }
        }
    }
}
