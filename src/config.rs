//! Host-facing configuration: value range, sweep, bounds, modes and style.
//!
//! Both structs deserialize with per-field defaults, so a host can keep a
//! partial JSON/TOML table and let the rest fall back to the stock knob.

use serde::{Deserialize, Serialize};

use crate::color::RingColor;
use crate::constants;
use crate::error::{Result, RingError};
use crate::mapper::AngleValueMapper;

/// Value range, sweep (in degrees), gate bounds and mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfiguration {
    pub min: f64,
    pub max: f64,
    /// Degrees
    pub start_angle: f64,
    /// Degrees
    pub end_angle: f64,
    /// `None` means `min`
    pub lower_bound: Option<f64>,
    /// `None` means `max`
    pub upper_bound: Option<f64>,
    /// Clamp the value pointer to the bounds instead of the full range.
    pub hardclip_value_pointer: bool,
    pub is_gated: bool,
    pub is_reversed: bool,
    /// Remap the panel output from the bounds to the full range.
    pub value_needs_remap: bool,
    /// Color the regions outside the bounds (bipolar-bounds rings only).
    pub bipolar_bounds: bool,
    pub enabled: bool,
}

impl Default for RingConfiguration {
    fn default() -> Self {
        Self {
            min: constants::DEFAULT_MIN,
            max: constants::DEFAULT_MAX,
            start_angle: constants::DEFAULT_START_ANGLE,
            end_angle: constants::DEFAULT_END_ANGLE,
            lower_bound: None,
            upper_bound: None,
            hardclip_value_pointer: true,
            is_gated: false,
            is_reversed: false,
            value_needs_remap: true,
            bipolar_bounds: true,
            enabled: true,
        }
    }
}

impl RingConfiguration {
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound.unwrap_or(self.min)
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound.unwrap_or(self.max)
    }

    /// Check the configuration and build its mapper.
    pub fn validate(&self) -> Result<AngleValueMapper> {
        let mapper = AngleValueMapper::new(self.min, self.max, self.start_angle, self.end_angle)?;
        let (lower, upper) = (self.lower_bound(), self.upper_bound());
        for value in [lower, upper] {
            if !value.is_finite() {
                return Err(RingError::NonFinite("bounds"));
            }
            if value < self.min || value > self.max {
                return Err(RingError::BoundOutOfRange {
                    value,
                    min: self.min,
                    max: self.max,
                });
            }
        }
        if lower > upper {
            return Err(RingError::BoundsCrossed { lower, upper });
        }
        Ok(mapper)
    }
}

/// Stroke widths and colors of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingStyle {
    /// Track width; the value arc is drawn slightly wider.
    pub ring_width: f64,
    pub pointer_width: f64,
    pub bound_pointer_width: f64,
    pub ring_color: RingColor,
    pub tint_color: RingColor,
    pub pointer_color: RingColor,
    pub bound_pointer_color: RingColor,
    pub track_fill: RingColor,
    pub show_bound_pointers: bool,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            ring_width: constants::RING_WIDTH,
            pointer_width: constants::POINTER_WIDTH,
            bound_pointer_width: constants::BOUND_POINTER_WIDTH,
            ring_color: constants::RING_COLOR,
            tint_color: constants::TINT_COLOR,
            pointer_color: constants::POINTER_COLOR,
            bound_pointer_color: constants::BOUND_POINTER_COLOR,
            track_fill: constants::TRACK_FILL,
            show_bound_pointers: true,
        }
    }
}

impl RingStyle {
    pub fn value_arc_width(&self) -> f64 {
        self.ring_width + constants::VALUE_ARC_EXTRA_WIDTH
    }

    /// How far the track sits inside the widget edge.
    pub fn track_inset(&self) -> f64 {
        self.bound_pointer_width.max(self.ring_width / 2.0)
    }
}
