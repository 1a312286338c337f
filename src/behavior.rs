//! Ring variants and the value arcs each one draws.

use crate::color::RingColor;
use crate::constants;
use crate::mapper::GapPolicy;

/// Which flavor of ring a control is. Fixed when the control is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingBehavior {
    /// One value arc from the lower bound up to the value.
    #[default]
    Unipolar,
    /// The regions outside the gate are drawn as two arcs sharing one tone,
    /// flagged when the value leaves the gate.
    Bipolar,
    /// The regions below the lower bound and above the upper bound are drawn
    /// as two arcs, each lit when the value falls inside it.
    BipolarBounds,
}

/// Coloring of one value arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Tint,
    OutOfRange,
    Disabled,
}

/// A stretch of the value arc, expressed in value units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub from: f64,
    pub to: f64,
    pub tone: Tone,
}

impl ArcSegment {
    fn new(from: f64, to: f64, tone: Tone) -> Self {
        Self { from, to, tone }
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }
}

/// Everything the value arcs depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcInputs {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    pub min: f64,
    pub max: f64,
    pub gated: bool,
    pub bipolar_bounds: bool,
    pub enabled: bool,
}

impl ArcInputs {
    pub fn out_of_range(&self) -> bool {
        self.value < self.lower || self.value > self.upper
    }
}

impl RingBehavior {
    /// How drags that land in the gap under the arc are treated.
    pub fn gap_policy(self) -> GapPolicy {
        match self {
            RingBehavior::BipolarBounds => GapPolicy::SnapToNearestEnd,
            RingBehavior::Unipolar | RingBehavior::Bipolar => GapPolicy::Ignore,
        }
    }

    /// Whether the panel offers the mode context menu.
    pub fn has_mode_menu(self) -> bool {
        self == RingBehavior::BipolarBounds
    }

    pub fn out_of_range_color(self) -> RingColor {
        match self {
            RingBehavior::Unipolar => constants::GATED_OUT_COLOR,
            RingBehavior::Bipolar | RingBehavior::BipolarBounds => constants::BIPOLAR_OUT_COLOR,
        }
    }

    /// Whether an out-of-range value is flagged at all.
    fn flags_out_of_range(self, inputs: &ArcInputs) -> bool {
        match self {
            RingBehavior::Unipolar => inputs.gated,
            RingBehavior::Bipolar | RingBehavior::BipolarBounds => true,
        }
    }

    /// Tone of the whole value arc for the current inputs.
    pub fn tone(self, inputs: &ArcInputs) -> Tone {
        if !inputs.enabled {
            Tone::Disabled
        } else if self.flags_out_of_range(inputs) && inputs.out_of_range() {
            Tone::OutOfRange
        } else {
            Tone::Tint
        }
    }

    /// The non-empty value arcs to draw, in value units.
    pub fn value_segments(self, inputs: &ArcInputs) -> Vec<ArcSegment> {
        let tone = self.tone(inputs);
        let segments = match self {
            RingBehavior::BipolarBounds if inputs.bipolar_bounds => {
                let tone_for = |lit: bool| {
                    if !inputs.enabled {
                        Tone::Disabled
                    } else if lit {
                        Tone::OutOfRange
                    } else {
                        Tone::Tint
                    }
                };
                vec![
                    ArcSegment::new(inputs.min, inputs.lower, tone_for(inputs.value < inputs.lower)),
                    ArcSegment::new(inputs.upper, inputs.max, tone_for(inputs.value > inputs.upper)),
                ]
            }
            // Both outer regions, one shared tone
            RingBehavior::Bipolar => vec![
                ArcSegment::new(inputs.min, inputs.lower, tone),
                ArcSegment::new(inputs.upper, inputs.max, tone),
            ],
            RingBehavior::Unipolar | RingBehavior::BipolarBounds => {
                if inputs.value < inputs.lower {
                    Vec::new()
                } else {
                    vec![ArcSegment::new(inputs.lower, inputs.value.min(inputs.upper), tone)]
                }
            }
        };
        segments.into_iter().filter(|s| !s.is_empty()).collect()
    }
}
