//! Angle ↔ value math for the knob ring.
//!
//! Angles are radians in a y-up frame: 0 points right, π/2 points up. The
//! views flip Floem's y-down coordinates before calling in here.

use std::f64::consts::{PI, TAU};

use floem::kurbo::Point;

use crate::error::{Result, RingError};

/// Saturating affine remap from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Computed in f64. The result is clamped to the output range, so inputs
/// outside the input range never extrapolate. Integer types truncate the
/// result toward zero.
pub trait MapRange: Copy {
    fn map_range(self, in_min: Self, in_max: Self, out_min: Self, out_max: Self) -> Self;
}

fn map_f64(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let out = out_min + (out_max - out_min) * ((x - in_min) / (in_max - in_min));
    let lo = out_min.min(out_max);
    let hi = out_min.max(out_max);
    if out < lo {
        lo
    } else if out > hi {
        hi
    } else {
        out
    }
}

macro_rules! impl_map_range {
    ($($t:ty),*) => {
        $(
            impl MapRange for $t {
                fn map_range(self, in_min: Self, in_max: Self, out_min: Self, out_max: Self) -> Self {
                    map_f64(
                        self as f64,
                        in_min as f64,
                        in_max as f64,
                        out_min as f64,
                        out_max as f64,
                    ) as $t
                }
            }
        )*
    };
}

impl_map_range!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Free-function form of [`MapRange::map_range`].
pub fn map_range<T: MapRange>(x: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    x.map_range(in_min, in_max, out_min, out_max)
}

/// Angle of `point` around `center`, in `(-π, π]`.
pub fn pointer_angle(point: Point, center: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x)
}

/// Shortest signed difference from `a1` to `a2`, in `(-π, π]`.
pub fn normalized_angular_distance(a1: f64, a2: f64) -> f64 {
    let d = (a2 - a1).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// What a drag does when the pointer sits in the gap below the arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// The drag update is dropped.
    #[default]
    Ignore,
    /// The value snaps to whichever end of the sweep borders the gap closer.
    SnapToNearestEnd,
}

/// Converts between a value range and the angular sweep of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleValueMapper {
    min: f64,
    max: f64,
    start: f64,
    end: f64,
}

impl AngleValueMapper {
    /// Build from a value range and a sweep given in degrees.
    pub fn new(min: f64, max: f64, start_degrees: f64, end_degrees: f64) -> Result<Self> {
        Self::from_radians(min, max, start_degrees.to_radians(), end_degrees.to_radians())
    }

    pub fn from_radians(min: f64, max: f64, start: f64, end: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RingError::NonFinite("value range"));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(RingError::NonFinite("sweep"));
        }
        if min >= max {
            return Err(RingError::DegenerateRange { min, max });
        }
        if start == end {
            return Err(RingError::DegenerateSweep(start.to_degrees()));
        }
        Ok(Self {
            min,
            max,
            start,
            end,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Start of the sweep in radians.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End of the sweep in radians.
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp `value` into range and return it with its angle on the sweep.
    pub fn value_to_angle(&self, value: f64) -> (f64, f64) {
        let value = self.clamp(value);
        let angle_range = self.end - self.start;
        let value_range = self.max - self.min;
        let angle = (value - self.min) / value_range * angle_range + self.start;
        (value, angle)
    }

    /// Inverse of [`value_to_angle`](Self::value_to_angle); saturates at the
    /// ends of the sweep.
    pub fn angle_to_value(&self, angle: f64) -> f64 {
        map_range(angle, self.start, self.end, self.min, self.max)
    }

    /// Length of the draggable sweep, measured clockwise from the start.
    ///
    /// Assumes the gap is centered on the bottom of the circle.
    pub fn drag_span(&self) -> f64 {
        PI + 2.0 * (self.start - PI)
    }

    /// Turn the raw angle of a dragging pointer into a value.
    ///
    /// The raw angle is first folded into the clockwise distance from the
    /// start of the sweep. Angles inside the gap are resolved by `policy`.
    pub fn drag_angle_to_value(&self, raw: f64, policy: GapPolicy) -> Option<f64> {
        let start = self.start;
        let gap_low = -(TAU - start);
        let gap_high = -(start - PI);

        let folded = if raw > 0.0 {
            (raw - PI).abs() + (start - PI)
        } else if raw < gap_low {
            -raw - (TAU - start)
        } else if raw > gap_high {
            -raw + (PI + (start - PI))
        } else {
            return match policy {
                GapPolicy::Ignore => None,
                GapPolicy::SnapToNearestEnd => {
                    if raw - gap_low <= gap_high - raw {
                        Some(self.min)
                    } else {
                        Some(self.max)
                    }
                }
            };
        };

        Some(map_range(folded, 0.0, self.drag_span(), self.min, self.max))
    }
}

impl Default for AngleValueMapper {
    fn default() -> Self {
        Self {
            min: crate::constants::DEFAULT_MIN,
            max: crate::constants::DEFAULT_MAX,
            start: crate::constants::DEFAULT_START_ANGLE.to_radians(),
            end: crate::constants::DEFAULT_END_ANGLE.to_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn mapper() -> AngleValueMapper {
        AngleValueMapper::default()
    }

    #[test]
    fn default_sweep_matches_constants() {
        let m = mapper();
        assert_relative_eq!(m.start(), PI * 11.0 / 8.0, epsilon = 1e-12);
        assert_relative_eq!(m.end(), -PI * 3.0 / 8.0, epsilon = 1e-12);
        assert_relative_eq!(m.drag_span(), PI * 7.0 / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn ends_of_range_land_on_ends_of_sweep() {
        let m = mapper();
        assert_relative_eq!(m.value_to_angle(0.0).1, m.start(), epsilon = 1e-12);
        assert_relative_eq!(m.value_to_angle(127.0).1, m.end(), epsilon = 1e-12);
    }

    #[test]
    fn midpoint_of_range_is_halfway_along_sweep() {
        let m = mapper();
        let halfway = m.start() + 0.5 * (m.end() - m.start());
        assert_relative_eq!(m.value_to_angle(63.5).1, halfway, epsilon = 1e-12);

        // 64 sits just past halfway (clockwise, so a smaller angle)
        let (v, angle) = m.value_to_angle(64.0);
        assert_eq!(v, 64.0);
        assert!(angle < halfway);
        assert_abs_diff_eq!(angle, halfway, epsilon = 0.03);
    }

    #[test]
    fn out_of_range_values_clamp_to_nearest_end() {
        let m = mapper();
        assert_eq!(m.value_to_angle(-40.0).0, 0.0);
        assert_eq!(m.value_to_angle(1000.0).0, 127.0);
        assert_relative_eq!(m.value_to_angle(1000.0).1, m.end(), epsilon = 1e-12);
    }

    #[test]
    fn angle_round_trip() {
        let m = AngleValueMapper::new(-12.0, 40.0, 200.0, -20.0).unwrap();
        for i in 0..=52 {
            let value = -12.0 + i as f64;
            let (_, angle) = m.value_to_angle(value);
            assert_relative_eq!(m.angle_to_value(angle), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn degenerate_configurations_are_rejected() {
        assert_eq!(
            AngleValueMapper::new(5.0, 5.0, 247.5, -67.5),
            Err(RingError::DegenerateRange { min: 5.0, max: 5.0 })
        );
        assert!(matches!(
            AngleValueMapper::new(0.0, 1.0, 90.0, 90.0),
            Err(RingError::DegenerateSweep(_))
        ));
        assert_eq!(
            AngleValueMapper::new(f64::NAN, 1.0, 0.0, 90.0),
            Err(RingError::NonFinite("value range"))
        );
    }

    #[test]
    fn map_range_saturates() {
        assert_eq!(map_range(10.0, 0.0, 10.0, 0.0, 100.0), 100.0);
        assert_eq!(map_range(50.0, 0.0, 10.0, 0.0, 100.0), 100.0);
        assert_eq!(map_range(-50.0, 0.0, 10.0, 0.0, 100.0), 0.0);
        // Reversed output range clamps to the same interval
        assert_eq!(map_range(-50.0, 0.0, 10.0, 100.0, 0.0), 100.0);
        assert_eq!(map_range(2.5, 0.0, 10.0, 100.0, 0.0), 75.0);
    }

    #[test]
    fn map_range_is_idempotent() {
        for x in [-30.0, 0.0, 3.3, 9.9, 44.0] {
            let once = map_range(x, 0.0, 10.0, 0.0, 10.0);
            assert_eq!(map_range(once, 0.0, 10.0, 0.0, 10.0), once);
        }
    }

    #[test]
    fn map_range_on_integers_truncates() {
        assert_eq!(map_range(10_i64, 20, 100, 0, 127), 0);
        assert_eq!(map_range(60_i64, 20, 100, 0, 127), 63);
        assert_eq!(map_range(100_i32, 20, 100, 0, 127), 127);
        assert_eq!(map_range(200_u8, 0, 100, 0, 10), 10);
    }

    #[test]
    fn pointer_angle_uses_y_up_frame() {
        let c = Point::new(50.0, 50.0);
        assert_relative_eq!(pointer_angle(Point::new(100.0, 50.0), c), 0.0);
        assert_relative_eq!(pointer_angle(Point::new(50.0, 100.0), c), PI / 2.0);
        assert_relative_eq!(pointer_angle(Point::new(0.0, 50.0), c), PI);
        assert_relative_eq!(pointer_angle(Point::new(50.0, 0.0), c), -PI / 2.0);
    }

    #[test]
    fn angular_distance_properties() {
        let samples = [-3.0, -1.2, 0.0, 0.4, 2.9, 7.5, -9.1];
        for &a in &samples {
            assert_eq!(normalized_angular_distance(a, a), 0.0);
            for &b in &samples {
                let d = normalized_angular_distance(a, b);
                assert!(d > -PI && d <= PI, "{d} out of range");
                assert_abs_diff_eq!(d, -normalized_angular_distance(b, a), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn angular_distance_takes_the_short_way_round() {
        let d = normalized_angular_distance(PI - 0.05, -PI + 0.05);
        assert_abs_diff_eq!(d, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(normalized_angular_distance(0.0, -0.1), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn drag_top_of_circle_is_the_middle() {
        let m = mapper();
        let v = m.drag_angle_to_value(PI / 2.0, GapPolicy::Ignore).unwrap();
        assert_relative_eq!(v, 63.5, epsilon = 1e-9);
    }

    #[test]
    fn drag_matches_value_to_angle_around_the_sweep() {
        let m = mapper();
        for value in [1.0, 20.0, 50.0, 63.5, 90.0, 120.0] {
            let (_, angle) = m.value_to_angle(value);
            // Fold the sweep angle back into atan2's (-π, π]
            let raw = normalized_angular_distance(0.0, angle);
            let dragged = m.drag_angle_to_value(raw, GapPolicy::Ignore).unwrap();
            assert_relative_eq!(dragged, value, epsilon = 1e-9);
        }
    }

    #[test]
    fn drag_inside_gap_is_ignored_or_snapped() {
        let m = mapper();
        // Straight down is the middle of the gap
        assert_eq!(m.drag_angle_to_value(-PI / 2.0, GapPolicy::Ignore), None);

        let near_start = -PI / 2.0 - 0.3;
        let near_end = -PI / 2.0 + 0.3;
        assert_eq!(
            m.drag_angle_to_value(near_start, GapPolicy::SnapToNearestEnd),
            Some(0.0)
        );
        assert_eq!(
            m.drag_angle_to_value(near_end, GapPolicy::SnapToNearestEnd),
            Some(127.0)
        );
    }
}
