//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! - `storage::local_storage` persists durable slots in `window.localStorage`.
//! - `frame` schedules visual updates with `window.requestAnimationFrame`.
//! - `adapters` picks browser or headless implementations at compile time.
//!
//! Non-wasm builds compile to inert fallbacks so the runtime can be unit tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod frame;
pub mod storage;

pub use adapters::{
    durable_store, frame_scheduler, host_strategy_name, selected_host_strategy,
    DurableStoreAdapter, FrameSchedulerAdapter, HostStrategy,
};
pub use frame::WebFrameScheduler;
pub use storage::local_storage::WebDurableStore;
