//! Screen geometry for painting the ring.
//!
//! The models work in a y-up frame; Floem paints y-down. Everything here
//! takes model angles and returns screen-space kurbo shapes.

use floem::kurbo::{Arc, BezPath, Line, Point, Shape, Vec2};

use crate::config::RingStyle;
use crate::constants;

/// Flip a Floem position into the ring's y-up local frame.
pub(crate) fn to_local(pos: Point, height: f64) -> Point {
    Point::new(pos.x, height - pos.y)
}

/// Screen point at `radius` from `center` along the model angle `angle`.
pub(crate) fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}

/// Radius of the track for a widget whose shorter side is `side`.
pub(crate) fn track_radius(side: f64, style: &RingStyle) -> f64 {
    side / 2.0 - style.track_inset()
}

/// Arc from model angle `start` to `end`, following the signed sweep.
pub(crate) fn arc_path(center: Point, radius: f64, start: f64, end: f64) -> BezPath {
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: -start,
        sweep_angle: start - end,
        x_rotation: 0.0,
    }
    .to_path(constants::ARC_TOLERANCE)
}

/// A radial tick of length `length + ring_width / 2` ending at the widget edge.
pub(crate) fn pointer_line(
    center: Point,
    outer: f64,
    length: f64,
    ring_width: f64,
    angle: f64,
) -> Line {
    let inner = outer - length - ring_width / 2.0;
    Line::new(point_at(center, inner, angle), point_at(center, outer, angle))
}
