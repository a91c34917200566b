//! Durable storage contracts.

pub mod durable;
