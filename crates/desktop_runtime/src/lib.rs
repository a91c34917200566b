pub mod apps;
pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod store;
pub mod time_machine;
pub mod usage;
pub mod window_manager;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::WindowManagerConfig;
pub use interaction::{FrameCoalescer, GestureCommit, VisualUpdate, WindowGestures};
pub use model::*;
pub use persistence::{load_persisted_desktop, save_persisted_desktop, PersistedDesktop};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use store::{DispatchOutcome, Projection, ProjectionValue, SubscriptionId, WindowStore};
pub use time_machine::SnapshotHistory;
