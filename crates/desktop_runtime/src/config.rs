//! Tunable window-manager constants.

use serde::{Deserialize, Serialize};

/// Geometry, heuristic, and history limits used by every store transition.
///
/// `Default` carries the shipped desktop values. Hosts may deserialize a partial override; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Smallest width any window may have.
    pub min_window_width: i32,
    /// Smallest height any window may have.
    pub min_window_height: i32,
    /// Width of a freshly cascaded window (capped to the viewport).
    pub default_window_width: i32,
    /// Height of a freshly cascaded window (capped to the viewport).
    pub default_window_height: i32,
    /// Cascade base origin, x.
    pub cascade_origin_x: i32,
    /// Cascade base origin, y.
    pub cascade_origin_y: i32,
    /// Offset added per already-open window.
    pub cascade_step: i32,
    /// Cascade offsets wrap modulo this value.
    pub cascade_wrap: i32,
    /// Distance from a viewport edge at which a dragged window snaps onto it.
    pub snap_threshold: i32,
    /// Trailing window in which two opens count as a co-open pair.
    pub pair_window_ms: u64,
    /// Pair count at which the partner app is auto-tiled.
    pub pair_threshold: u32,
    /// Share of the viewport width given to the existing partner window when tiling.
    pub tile_primary_ratio: f64,
    /// Height reserved at the bottom of the page for the taskbar.
    pub taskbar_height: i32,
    /// Floor for the effective viewport width.
    pub min_viewport_width: i32,
    /// Floor for the effective viewport height (after the taskbar strip).
    pub min_viewport_height: i32,
    /// Maximum number of retained layout snapshots.
    pub snapshot_capacity: usize,
    /// Period of the background snapshot timer.
    pub snapshot_interval_ms: u64,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_window_width: 260,
            min_window_height: 160,
            default_window_width: 520,
            default_window_height: 340,
            cascade_origin_x: 70,
            cascade_origin_y: 50,
            cascade_step: 24,
            cascade_wrap: 220,
            snap_threshold: 20,
            pair_window_ms: 5_000,
            pair_threshold: 3,
            tile_primary_ratio: 0.7,
            taskbar_height: 44,
            min_viewport_width: 320,
            min_viewport_height: 220,
            snapshot_capacity: 12,
            snapshot_interval_ms: 5 * 60 * 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: WindowManagerConfig =
            serde_json::from_str(r#"{"snapshot_capacity": 4, "snap_threshold": 8}"#)
                .expect("parse override");

        assert_eq!(config.snapshot_capacity, 4);
        assert_eq!(config.snap_threshold, 8);
        assert_eq!(config.min_window_width, 260);
        assert_eq!(config.pair_window_ms, 5_000);
    }
}
