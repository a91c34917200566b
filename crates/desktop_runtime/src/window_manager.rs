//! Geometry helpers shared by the reducer and the pointer gesture controllers.
//!
//! Every function here is pure: inputs are a rect, the current [`Viewport`], and the
//! [`WindowManagerConfig`] limits. Nothing in this module can fail; invalid requests are clamped to
//! the nearest valid geometry.

use crate::{
    config::WindowManagerConfig,
    model::{ResizeEdge, Viewport, WindowRect},
};

/// Constrains `value` to `[min, max]`, flooring `max` to `min` first so inverted bounds (a
/// viewport smaller than the minimum window) still yield `min`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max.max(min))
}

/// Keeps a window of size `w`×`h` fully inside the viewport, preferring the top-left edge when it
/// cannot fit.
pub fn clamp_position(x: i32, y: i32, w: i32, h: i32, viewport: Viewport) -> (i32, i32) {
    (
        clamp(x, 0, viewport.width - w),
        clamp(y, 0, viewport.height - h),
    )
}

/// Clamps a requested size against the minimums and the space remaining to the right of and below
/// the window's origin.
pub fn clamp_size(
    origin_x: i32,
    origin_y: i32,
    w: i32,
    h: i32,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> (i32, i32) {
    (
        clamp(w, config.min_window_width, viewport.width - origin_x),
        clamp(h, config.min_window_height, viewport.height - origin_y),
    )
}

/// Drag placement: clamp into the viewport, then pull onto any edge within the snap threshold.
pub fn snap_drag_position(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> (i32, i32) {
    let max_x = (viewport.width - w).max(0);
    let max_y = (viewport.height - h).max(0);
    let threshold = config.snap_threshold;

    // Applied in order: a position pulled to 0 still snaps to `max` if 0 is inside the far zone.
    let snap = |value: i32, max: i32| {
        let mut value = clamp(value, 0, max);
        if value < threshold {
            value = 0;
        }
        if value > max - threshold {
            value = max;
        }
        value
    };

    (snap(x, max_x), snap(y, max_y))
}

/// Applies a pointer delta to `start` for the given handle.
///
/// West and north handles move the origin with the pointer. When that shrinks the window past
/// the minimum, the origin is pushed back by the shortfall so the opposite edge stays put.
pub fn resize_from_edge(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    config: &WindowManagerConfig,
) -> WindowRect {
    let min_w = config.min_window_width;
    let min_h = config.min_window_height;
    let mut next = start;

    if edge.moves_east() {
        next.w = start.w + dx;
    }
    if edge.moves_south() {
        next.h = start.h + dy;
    }
    if edge.moves_west() {
        next.w = start.w - dx;
        next.x = start.x + dx;
        if next.w < min_w {
            next.x -= min_w - next.w;
            next.w = min_w;
        }
    }
    if edge.moves_north() {
        next.h = start.h - dy;
        next.y = start.y + dy;
        if next.h < min_h {
            next.y -= min_h - next.h;
            next.h = min_h;
        }
    }

    next.w = next.w.max(min_w);
    next.h = next.h.max(min_h);
    next
}

/// [`resize_from_edge`] kept inside the viewport.
///
/// A west or north origin that would leave the viewport stops at 0 and gives up the overshoot
/// from its size, so the opposite edge stays where it was. East and south growth stops at the
/// viewport edge. The result is what [`clamp_size`] and [`clamp_position`] would commit.
pub fn resize_within_viewport(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> WindowRect {
    let mut next = resize_from_edge(start, edge, dx, dy, config);

    if edge.moves_west() && next.x < 0 {
        next.w = (next.w + next.x).max(config.min_window_width);
        next.x = 0;
    }
    if edge.moves_north() && next.y < 0 {
        next.h = (next.h + next.y).max(config.min_window_height);
        next.y = 0;
    }
    if edge.moves_east() {
        next.w = clamp(next.w, config.min_window_width, viewport.width - next.x);
    }
    if edge.moves_south() {
        next.h = clamp(next.h, config.min_window_height, viewport.height - next.y);
    }
    next
}

/// Default size capped to the viewport.
pub fn default_size(viewport: Viewport, config: &WindowManagerConfig) -> (i32, i32) {
    (
        config.default_window_width.min(viewport.width),
        config.default_window_height.min(viewport.height),
    )
}

/// Cascade slot for a window opened while `open_count` windows already exist.
pub fn cascade_rect(open_count: usize, viewport: Viewport, config: &WindowManagerConfig) -> WindowRect {
    let step = i64::from(config.cascade_step);
    let wrap = i64::from(config.cascade_wrap.max(1));
    let offset = ((open_count as i64 * step) % wrap) as i32;
    let (w, h) = default_size(viewport, config);
    let (x, y) = clamp_position(
        config.cascade_origin_x + offset,
        config.cascade_origin_y + offset,
        w,
        h,
        viewport,
    );
    WindowRect { x, y, w, h }
}

/// Geometry used when a maximized window has no saved bounds to restore.
pub fn default_rect(viewport: Viewport, config: &WindowManagerConfig) -> WindowRect {
    cascade_rect(0, viewport, config)
}

/// Full-height side-by-side split: `(partner_left, new_right)`.
///
/// The partner receives the floored primary share of the width, the new window the remainder.
/// Both keep the minimum width; the new window is anchored to the right edge and the partner
/// gives up width so neither leaves the viewport. Below two minimum widths they overlap.
pub fn tile_split(viewport: Viewport, config: &WindowManagerConfig) -> (WindowRect, WindowRect) {
    let primary_w = (f64::from(viewport.width) * config.tile_primary_ratio).floor() as i32;
    let right_w = clamp(viewport.width - primary_w, config.min_window_width, viewport.width);
    let left_w = clamp(viewport.width - right_w, config.min_window_width, viewport.width);
    let h = viewport.height.max(config.min_window_height);

    let left = WindowRect {
        x: 0,
        y: 0,
        w: left_w,
        h,
    };
    let right = WindowRect {
        x: (viewport.width - right_w).max(0),
        y: 0,
        w: right_w,
        h,
    };
    (left, right)
}

/// Re-clamps a normal window into a (possibly shrunken) viewport: size first, then origin.
pub fn fit_to_viewport(rect: WindowRect, viewport: Viewport, config: &WindowManagerConfig) -> WindowRect {
    let w = clamp(rect.w, config.min_window_width, viewport.width);
    let h = clamp(rect.h, config.min_window_height, viewport.height);
    let (x, y) = clamp_position(rect.x, rect.y, w, h, viewport);
    WindowRect { x, y, w, h }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 1280,
            height: 676,
        }
    }

    #[test]
    fn clamp_floors_inverted_upper_bound() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(30, 0, 10), 10);
        assert_eq!(clamp(50, 260, 100), 260);
    }

    #[test]
    fn drag_snaps_to_edges_within_threshold() {
        let config = WindowManagerConfig::default();
        let vp = viewport();

        assert_eq!(snap_drag_position(19, 300, 520, 340, vp, &config), (0, 300));
        assert_eq!(snap_drag_position(20, 300, 520, 340, vp, &config), (20, 300));
        assert_eq!(snap_drag_position(745, 320, 520, 340, vp, &config), (760, 336));
        assert_eq!(snap_drag_position(-400, 9000, 520, 340, vp, &config), (0, 336));
    }

    #[test]
    fn north_west_resize_past_minimum_keeps_south_east_corner() {
        let config = WindowManagerConfig::default();
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 400,
            h: 300,
        };

        let next = resize_from_edge(start, ResizeEdge::NorthWest, 500, 500, &config);

        assert_eq!(
            next,
            WindowRect {
                x: 240,
                y: 240,
                w: 260,
                h: 160
            }
        );
        assert_eq!(next.right(), start.right());
        assert_eq!(next.bottom(), start.bottom());
    }

    #[test]
    fn west_resize_past_viewport_edge_keeps_east_edge() {
        let config = WindowManagerConfig::default();
        let start = WindowRect {
            x: 100,
            y: 50,
            w: 400,
            h: 300,
        };

        let next = resize_within_viewport(start, ResizeEdge::West, -150, 0, viewport(), &config);

        assert_eq!(
            next,
            WindowRect {
                x: 0,
                y: 50,
                w: 500,
                h: 300
            }
        );
        assert_eq!(next.right(), start.right());
    }

    #[test]
    fn north_east_resize_stops_at_top_and_right_edges() {
        let config = WindowManagerConfig::default();
        let start = WindowRect {
            x: 900,
            y: 40,
            w: 300,
            h: 200,
        };

        let next =
            resize_within_viewport(start, ResizeEdge::NorthEast, 500, -100, viewport(), &config);

        assert_eq!(
            next,
            WindowRect {
                x: 900,
                y: 0,
                w: 380,
                h: 240
            }
        );
        assert_eq!(next.bottom(), start.bottom());
    }

    #[test]
    fn east_and_south_resize_only_grow_size() {
        let config = WindowManagerConfig::default();
        let start = WindowRect {
            x: 10,
            y: 20,
            w: 300,
            h: 200,
        };

        assert_eq!(
            resize_from_edge(start, ResizeEdge::SouthEast, 40, -100, &config),
            WindowRect {
                x: 10,
                y: 20,
                w: 340,
                h: 160
            }
        );
        assert_eq!(
            resize_from_edge(start, ResizeEdge::North, 999, -30, &config),
            WindowRect {
                x: 10,
                y: -10,
                w: 300,
                h: 230
            }
        );
    }

    #[test]
    fn cascade_steps_and_wraps() {
        let config = WindowManagerConfig::default();
        let vp = viewport();

        assert_eq!(
            cascade_rect(0, vp, &config),
            WindowRect {
                x: 70,
                y: 50,
                w: 520,
                h: 340
            }
        );
        assert_eq!(cascade_rect(2, vp, &config).x, 118);
        // 10 * 24 = 240, wraps to 20.
        assert_eq!(cascade_rect(10, vp, &config).x, 90);
    }

    #[test]
    fn cascade_caps_default_size_to_small_viewport() {
        let config = WindowManagerConfig::default();
        let vp = Viewport {
            width: 400,
            height: 220,
        };

        assert_eq!(
            cascade_rect(1, vp, &config),
            WindowRect {
                x: 0,
                y: 0,
                w: 400,
                h: 220
            }
        );
    }

    #[test]
    fn tile_split_matches_seventy_thirty() {
        let config = WindowManagerConfig::default();
        let (left, right) = tile_split(viewport(), &config);

        assert_eq!(
            left,
            WindowRect {
                x: 0,
                y: 0,
                w: 896,
                h: 676
            }
        );
        assert_eq!(
            right,
            WindowRect {
                x: 896,
                y: 0,
                w: 384,
                h: 676
            }
        );
    }

    #[test]
    fn tile_split_on_narrow_viewport_stays_inside() {
        let config = WindowManagerConfig::default();
        let vp = Viewport {
            width: 800,
            height: 600,
        };

        let (left, right) = tile_split(vp, &config);

        assert_eq!(
            right,
            WindowRect {
                x: 540,
                y: 0,
                w: 260,
                h: 600
            }
        );
        assert_eq!(left.w, 540);
        assert_eq!(left.right(), right.x);
        assert_eq!(right.right(), vp.width);
    }

    #[test]
    fn near_edge_snap_runs_before_far_edge_snap() {
        let config = WindowManagerConfig::default();
        let narrow = |width| Viewport {
            width,
            height: 676,
        };

        // max_x = 10: 0 lies inside the far zone too, so the far edge wins.
        assert_eq!(snap_drag_position(5, 300, 520, 340, narrow(530), &config).0, 10);
        // max_x = 20: the far zone starts above 0.
        assert_eq!(snap_drag_position(5, 300, 520, 340, narrow(540), &config).0, 0);
    }

    #[test]
    fn fit_to_viewport_shrinks_before_moving() {
        let config = WindowManagerConfig::default();
        let rect = WindowRect {
            x: 900,
            y: 400,
            w: 700,
            h: 500,
        };
        let small = Viewport {
            width: 640,
            height: 420,
        };

        assert_eq!(
            fit_to_viewport(rect, small, &config),
            WindowRect {
                x: 0,
                y: 0,
                w: 640,
                h: 420
            }
        );
    }
}
