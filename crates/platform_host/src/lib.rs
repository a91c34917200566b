//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services the window manager depends on:
//! durable key/value slots for layout persistence, display-refresh scheduling for pointer-driven
//! visual updates, and wall-clock helpers. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod frame;
pub mod storage;
pub mod time;

pub use frame::{FrameCallback, FrameScheduler, FrameToken, ManualFrameScheduler};
pub use storage::durable::{
    write_slot_with, DurableStore, DurableStoreFuture, MemoryDurableStore, NoopDurableStore,
};
pub use time::{format_clock_hh_mm, unix_time_ms_now};
