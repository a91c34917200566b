use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{config::WindowManagerConfig, usage::UsageStats};

/// Version of the serialized [`DesktopState`] layout.
pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Identifier of the app a window hosts (`"notes"`, `"browser"`, or any unregistered string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppKind(String);

impl AppKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

/// Area available to windows: the page minus the taskbar strip, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Builds the effective viewport from the raw page size.
    pub fn from_page_size(page_width: i32, page_height: i32, config: &WindowManagerConfig) -> Self {
        Self {
            width: page_width.max(config.min_viewport_width),
            height: (page_height - config.taskbar_height).max(config.min_viewport_height),
        }
    }

    pub fn rect(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.width,
            h: self.height,
        }
    }
}

/// Mutually exclusive presentation state derived from a window's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_kind: AppKind,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    /// Pre-maximize bounds; present only while maximized.
    pub saved_rect: Option<WindowRect>,
}

impl WindowRecord {
    /// A minimized window that was maximized reports `Minimized` until it is shown again.
    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else if self.maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.minimized
    }
}

/// The window store's durable state. Mutated only by [`crate::reducer::reduce_desktop`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub(crate) next_window_id: u64,
    /// Open windows in open order.
    pub(crate) windows: Vec<WindowRecord>,
    pub(crate) active_window_id: Option<WindowId>,
    /// Last z-order value handed out. Never decreases.
    pub(crate) z_counter: u64,
    pub(crate) initialized: bool,
    pub(crate) usage: UsageStats,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            active_window_id: None,
            z_counter: 1,
            initialized: false,
            usage: UsageStats::default(),
        }
    }
}

impl DesktopState {
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window_id
    }

    pub fn z_counter(&self) -> u64 {
        self.z_counter
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn usage_stats(&self) -> &UsageStats {
        &self.usage
    }

    /// Ids in open order.
    pub fn window_order(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id).collect()
    }

    /// Highest-z non-minimized window, if any.
    pub fn top_visible_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| (w.z_index, w.id))
            .map(|w| w.id)
    }
}

/// Immutable capture of the window layout used by the time machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp_ms: u64,
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}
