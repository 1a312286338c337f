//! Default ranges, angles, sizing, and colors for the knob widgets.

use crate::color::RingColor;

/// Default lower end of the value range
pub const DEFAULT_MIN: f64 = 0.0;

/// Default upper end of the value range
pub const DEFAULT_MAX: f64 = 127.0;

/// Default start of the sweep, 11/8 π, in degrees
pub const DEFAULT_START_ANGLE: f64 = 247.5;

/// Default end of the sweep, -3/8 π, in degrees
pub const DEFAULT_END_ANGLE: f64 = -67.5;

/// Angular distance (radians) within which a press grabs a bound handle
pub const HANDLE_HIT_RADIANS: f64 = 0.12;

/// Track stroke width
pub const RING_WIDTH: f64 = 5.0;

/// The value arc is always this much wider than the track
pub const VALUE_ARC_EXTRA_WIDTH: f64 = 2.0;

/// Value pointer stroke width
pub const POINTER_WIDTH: f64 = 6.0;

/// Bound pointer stroke width
pub const BOUND_POINTER_WIDTH: f64 = 4.0;

/// Tolerance used when flattening arcs into paths
pub const ARC_TOLERANCE: f64 = 0.1;

/// Side length the panel asks for when nothing else constrains it
pub const PANEL_SIZE: f32 = 100.0;

/// Minimum side length of a standalone ring
pub const RING_MIN_SIZE: f32 = 48.0;

/// Gap between panel elements
pub const GAP: f32 = 4.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Output value font size
pub const VALUE_FONT: f32 = 13.0;

/// Indicator ("G" / "R") font size
pub const INDICATOR_FONT: f32 = 11.0;

pub const RING_COLOR: RingColor = RingColor::rgb8(64, 64, 64);
pub const TINT_COLOR: RingColor = RingColor::rgb8(255, 128, 0);
pub const POINTER_COLOR: RingColor = RingColor::rgb8(255, 0, 0);
pub const BOUND_POINTER_COLOR: RingColor = RingColor::rgb8(255, 255, 255);
pub const TRACK_FILL: RingColor = RingColor::rgba8(0, 0, 0, 51);

/// Value arc tone for out-of-range values on a gated unipolar ring
pub const GATED_OUT_COLOR: RingColor = RingColor::rgb8(128, 128, 128);

/// Out-of-range tone on bipolar rings
pub const BIPOLAR_OUT_COLOR: RingColor = RingColor::rgb8(255, 0, 77);

pub const DISABLED_COLOR: RingColor = RingColor::rgb8(110, 110, 110);

/// Indicator text when its mode is off
pub const INDICATOR_DIM: RingColor = RingColor::rgb8(70, 70, 70);

/// Gate indicator when gated
pub const INDICATOR_GATED: RingColor = RingColor::rgb8(255, 0, 0);

/// Reverse indicator when reversed
pub const INDICATOR_REVERSED: RingColor = RingColor::rgb8(255, 128, 0);
