use platform_host::{
    DurableStore, DurableStoreFuture, FrameCallback, FrameScheduler, FrameToken,
    ManualFrameScheduler, NoopDurableStore,
};

use crate::{WebDurableStore, WebFrameScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, `requestAnimationFrame`).
    Browser,
    /// Adapters that keep nothing durable and flush frames manually, for headless runs.
    Headless,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Headless => "headless",
    }
}

#[derive(Debug, Clone)]
/// Durable store adapter selected by [`durable_store`].
pub enum DurableStoreAdapter {
    /// `localStorage` slots.
    Browser(WebDurableStore),
    /// Nothing survives a reload.
    Headless(NoopDurableStore),
}

impl DurableStore for DurableStoreAdapter {
    fn read_slot<'a>(
        &'a self,
        key: &'a str,
    ) -> DurableStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.read_slot(key),
            Self::Headless(store) => store.read_slot(key),
        }
    }

    fn write_slot<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> DurableStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.write_slot(key, raw_json),
            Self::Headless(store) => store.write_slot(key, raw_json),
        }
    }

    fn clear_slot<'a>(&'a self, key: &'a str) -> DurableStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.clear_slot(key),
            Self::Headless(store) => store.clear_slot(key),
        }
    }
}

#[derive(Debug, Clone)]
/// Frame scheduler adapter selected by [`frame_scheduler`].
pub enum FrameSchedulerAdapter {
    /// `requestAnimationFrame`.
    Browser(WebFrameScheduler),
    /// Frames run only when flushed explicitly.
    Headless(ManualFrameScheduler),
}

impl FrameScheduler for FrameSchedulerAdapter {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameToken> {
        match self {
            Self::Browser(scheduler) => scheduler.request_frame(callback),
            Self::Headless(scheduler) => scheduler.request_frame(callback),
        }
    }

    fn cancel_frame(&self, token: FrameToken) {
        match self {
            Self::Browser(scheduler) => scheduler.cancel_frame(token),
            Self::Headless(scheduler) => scheduler.cancel_frame(token),
        }
    }
}

/// Builds the durable store adapter for the compile-time selected host strategy.
pub fn durable_store() -> DurableStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DurableStoreAdapter::Browser(WebDurableStore),
        HostStrategy::Headless => DurableStoreAdapter::Headless(NoopDurableStore),
    }
}

/// Builds the frame scheduler adapter for the compile-time selected host strategy.
pub fn frame_scheduler() -> FrameSchedulerAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => FrameSchedulerAdapter::Browser(WebFrameScheduler),
        HostStrategy::Headless => FrameSchedulerAdapter::Headless(ManualFrameScheduler::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_name_matches_selected_strategy() {
        let expected = if cfg!(feature = "headless-host") {
            "headless"
        } else {
            "browser"
        };
        assert_eq!(host_strategy_name(), expected);
    }
}
