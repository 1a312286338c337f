//! State model of the knob control.
//!
//! Holds the value, the gate bounds and the drag session, and derives every
//! angle the view paints. Setters validate, recompute dependent state and
//! queue notifications in one step; the owner drains the queue with
//! [`KnobRing::drain_events`] once the mutation is done.

use log::{debug, trace};

use crate::behavior::{ArcInputs, ArcSegment, RingBehavior, Tone};
use crate::config::{RingConfiguration, RingStyle};
use crate::constants;
use crate::delegate::{RingEvent, RingPointer};
use crate::error::{Result, RingError};
use crate::mapper::{normalized_angular_distance, pointer_angle, AngleValueMapper};

/// Which bound handle, if any, the current gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragHandle {
    #[default]
    Idle,
    Lower,
    Upper,
}

#[derive(Debug, Clone)]
pub struct KnobRing {
    behavior: RingBehavior,
    mapper: AngleValueMapper,
    style: RingStyle,
    lower: f64,
    upper: f64,
    display_value: f64,
    lower_angle: f64,
    upper_angle: f64,
    value_angle: f64,
    hardclip: bool,
    gated: bool,
    reversed: bool,
    bipolar_bounds: bool,
    enabled: bool,
    drag: DragHandle,
    events: Vec<RingEvent>,
}

impl Default for KnobRing {
    fn default() -> Self {
        let mapper = AngleValueMapper::default();
        let mut ring = Self {
            behavior: RingBehavior::Unipolar,
            mapper,
            style: RingStyle::default(),
            lower: mapper.min(),
            upper: mapper.max(),
            display_value: mapper.min(),
            lower_angle: 0.0,
            upper_angle: 0.0,
            value_angle: 0.0,
            hardclip: true,
            gated: false,
            reversed: false,
            bipolar_bounds: true,
            enabled: true,
            drag: DragHandle::Idle,
            events: Vec::new(),
        };
        ring.refresh_angles();
        ring
    }
}

impl KnobRing {
    /// Build a ring from a validated configuration. The value starts at the
    /// lower end of the range and nothing is queued yet.
    pub fn new(behavior: RingBehavior, config: RingConfiguration, style: RingStyle) -> Result<Self> {
        let mapper = config.validate()?;
        let mut ring = Self {
            behavior,
            mapper,
            style,
            lower: config.lower_bound(),
            upper: config.upper_bound(),
            display_value: mapper.min(),
            hardclip: config.hardclip_value_pointer && !config.is_gated,
            gated: config.is_gated,
            reversed: config.is_reversed,
            bipolar_bounds: config.bipolar_bounds,
            enabled: config.enabled,
            ..Self::default()
        };
        ring.refresh_angles();
        Ok(ring)
    }

    pub fn behavior(&self) -> RingBehavior {
        self.behavior
    }

    pub fn mapper(&self) -> &AngleValueMapper {
        &self.mapper
    }

    pub fn style(&self) -> &RingStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: RingStyle) {
        self.style = style;
    }

    pub fn hide_bound_pointers(&mut self) {
        self.style.show_bound_pointers = false;
    }

    pub fn min(&self) -> f64 {
        self.mapper.min()
    }

    pub fn max(&self) -> f64 {
        self.mapper.max()
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// Bounds rounded to the nearest integer.
    pub fn bounds(&self) -> (i64, i64) {
        (self.lower.round() as i64, self.upper.round() as i64)
    }

    /// The value last set, clamped to `[min, max]`.
    pub fn display_value(&self) -> f64 {
        self.display_value
    }

    /// Angle of the value pointer in radians.
    pub fn value_angle(&self) -> f64 {
        self.value_angle
    }

    pub fn lower_angle(&self) -> f64 {
        self.lower_angle
    }

    pub fn upper_angle(&self) -> f64 {
        self.upper_angle
    }

    pub fn start_angle(&self) -> f64 {
        self.mapper.start().to_degrees()
    }

    pub fn end_angle(&self) -> f64 {
        self.mapper.end().to_degrees()
    }

    pub fn hardclip_value_pointer(&self) -> bool {
        self.hardclip
    }

    pub fn is_gated(&self) -> bool {
        self.gated
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn bipolar_bounds(&self) -> bool {
        self.bipolar_bounds
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn drag_handle(&self) -> DragHandle {
        self.drag
    }

    /// The value pointer is hidden while disabled.
    pub fn pointer_visible(&self) -> bool {
        self.enabled
    }

    pub fn bound_pointers_visible(&self) -> bool {
        self.style.show_bound_pointers
    }

    /// Take every notification queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, RingEvent> {
        self.events.drain(..)
    }

    fn arc_inputs(&self) -> ArcInputs {
        ArcInputs {
            value: self.display_value,
            lower: self.lower,
            upper: self.upper,
            min: self.min(),
            max: self.max(),
            gated: self.gated,
            bipolar_bounds: self.bipolar_bounds,
            enabled: self.enabled,
        }
    }

    pub fn value_tone(&self) -> Tone {
        self.behavior.tone(&self.arc_inputs())
    }

    /// Value arcs to paint, as `(start_angle, end_angle, tone)` in radians.
    pub fn value_arcs(&self) -> Vec<(f64, f64, Tone)> {
        self.behavior
            .value_segments(&self.arc_inputs())
            .into_iter()
            .map(|ArcSegment { from, to, tone }| {
                (
                    self.mapper.value_to_angle(from).1,
                    self.mapper.value_to_angle(to).1,
                    tone,
                )
            })
            .collect()
    }

    /// Set the value shown by the pointer and report it.
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            debug!("ignoring NaN ring value");
            return;
        }
        let (clamped, _) = self.mapper.value_to_angle(value);
        self.value_angle = self.pointer_angle_for(value);
        self.display_value = clamped;
        self.events.push(RingEvent::ValueUpdated(clamped as i64));
    }

    fn pointer_angle_for(&self, value: f64) -> f64 {
        let value = if self.hardclip {
            value.clamp(self.lower, self.upper)
        } else {
            value
        };
        self.mapper.value_to_angle(value).1
    }

    fn refresh_angles(&mut self) {
        self.lower_angle = self.mapper.value_to_angle(self.lower).1;
        self.upper_angle = self.mapper.value_to_angle(self.upper).1;
        self.value_angle = self.pointer_angle_for(self.display_value);
    }

    pub fn set_lower_bound(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(RingError::NonFinite("lower bound"));
        }
        let value = self.mapper.clamp(value);
        if value > self.upper {
            return Err(RingError::BoundsCrossed {
                lower: value,
                upper: self.upper,
            });
        }
        self.lower = value;
        self.refresh_angles();
        Ok(())
    }

    pub fn set_upper_bound(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(RingError::NonFinite("upper bound"));
        }
        let value = self.mapper.clamp(value);
        if value < self.lower {
            return Err(RingError::BoundsCrossed {
                lower: self.lower,
                upper: value,
            });
        }
        self.upper = value;
        self.refresh_angles();
        Ok(())
    }

    /// Move the bottom of the range, pulling the bounds and the value along.
    pub fn set_min(&mut self, min: f64) -> Result<()> {
        self.mapper =
            AngleValueMapper::from_radians(min, self.max(), self.mapper.start(), self.mapper.end())?;
        debug!("ring range now [{min}, {}]", self.max());
        self.lower = self.lower.max(min);
        self.upper = self.upper.max(min);
        self.refresh_angles();
        self.set_value(self.display_value.max(min));
        Ok(())
    }

    /// Move the top of the range, pulling the bounds and the value along.
    pub fn set_max(&mut self, max: f64) -> Result<()> {
        self.mapper =
            AngleValueMapper::from_radians(self.min(), max, self.mapper.start(), self.mapper.end())?;
        debug!("ring range now [{}, {max}]", self.min());
        self.lower = self.lower.min(max);
        self.upper = self.upper.min(max);
        self.refresh_angles();
        self.set_value(self.display_value.min(max));
        Ok(())
    }

    /// Start of the sweep, in degrees.
    pub fn set_start_angle(&mut self, degrees: f64) -> Result<()> {
        self.mapper = AngleValueMapper::from_radians(
            self.min(),
            self.max(),
            degrees.to_radians(),
            self.mapper.end(),
        )?;
        self.refresh_angles();
        Ok(())
    }

    /// End of the sweep, in degrees.
    pub fn set_end_angle(&mut self, degrees: f64) -> Result<()> {
        self.mapper = AngleValueMapper::from_radians(
            self.min(),
            self.max(),
            self.mapper.start(),
            degrees.to_radians(),
        )?;
        self.refresh_angles();
        Ok(())
    }

    pub fn set_hardclip_value_pointer(&mut self, on: bool) {
        self.hardclip = on;
        self.refresh_angles();
    }

    /// Gating turns pointer hard-clipping off, and back on when ungated.
    pub fn set_gated(&mut self, gated: bool) {
        self.gated = gated;
        self.set_hardclip_value_pointer(!gated);
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    pub fn set_bipolar_bounds(&mut self, on: bool) {
        self.bipolar_bounds = on;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = DragHandle::Idle;
        }
    }

    /// Bounds back to the full range and the value to `min`.
    pub fn reset(&mut self) {
        debug!("resetting ring");
        self.lower = self.min();
        self.upper = self.max();
        self.refresh_angles();
        self.events.push(RingEvent::BoundsUpdated {
            lower: self.lower,
            upper: self.upper,
        });
        self.set_value(self.min());
    }

    fn push_bounds(&mut self) {
        self.events.push(RingEvent::BoundsUpdated {
            lower: self.lower,
            upper: self.upper,
        });
    }

    /// Start a gesture: reset on the chord, otherwise grab the bound handle
    /// under the pointer, if any.
    pub fn pointer_down(&mut self, pointer: RingPointer) {
        self.events.push(RingEvent::PointerDown(pointer));
        if !self.enabled {
            return;
        }
        if pointer.reset_chord {
            self.reset();
            return;
        }

        let click = pointer_angle(pointer.position, pointer.center);
        let near = |handle: f64| {
            normalized_angular_distance(click, handle).abs() < constants::HANDLE_HIT_RADIANS
        };
        self.drag = if near(self.lower_angle) {
            DragHandle::Lower
        } else if near(self.upper_angle) {
            DragHandle::Upper
        } else {
            DragHandle::Idle
        };
        trace!("pointer down at {click:.3} rad grabs {:?}", self.drag);
        self.push_bounds();
    }

    /// Move the grabbed bound. Returns whether anything changed.
    pub fn pointer_dragged(&mut self, pointer: RingPointer) -> bool {
        if !self.enabled || self.drag == DragHandle::Idle {
            return false;
        }
        let raw = pointer_angle(pointer.position, pointer.center);
        let Some(value) = self
            .mapper
            .drag_angle_to_value(raw, self.behavior.gap_policy())
        else {
            trace!("drag at {raw:.3} rad is inside the gap");
            return false;
        };

        match self.drag {
            DragHandle::Lower if value < self.upper => self.lower = value,
            DragHandle::Upper if value > self.lower => self.upper = value,
            handle => {
                trace!("rejected {handle:?} drag to {value:.2}");
                return false;
            }
        }
        self.refresh_angles();
        self.set_value(self.display_value);
        self.push_bounds();
        true
    }

    /// End the gesture.
    pub fn pointer_up(&mut self, pointer: RingPointer) {
        self.events.push(RingEvent::PointerUp(pointer));
        if !self.enabled {
            return;
        }
        self.drag = DragHandle::Idle;
        self.events.push(RingEvent::BoundsDragEnded);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use floem::kurbo::Point;

    use super::*;

    const CENTER: Point = Point::new(50.0, 50.0);

    fn at_angle(angle: f64) -> RingPointer {
        let position = Point::new(
            CENTER.x + 40.0 * angle.cos(),
            CENTER.y + 40.0 * angle.sin(),
        );
        RingPointer::new(position, CENTER)
    }

    fn ring_with_bounds(lower: f64, upper: f64) -> KnobRing {
        let config = RingConfiguration {
            lower_bound: Some(lower),
            upper_bound: Some(upper),
            ..Default::default()
        };
        KnobRing::new(RingBehavior::Unipolar, config, RingStyle::default()).unwrap()
    }

    fn events(ring: &mut KnobRing) -> Vec<RingEvent> {
        ring.drain_events().collect()
    }

    #[test]
    fn new_ring_starts_quiet_at_min() {
        let mut ring = KnobRing::default();
        assert_eq!(ring.display_value(), 0.0);
        assert_eq!(ring.bounds(), (0, 127));
        assert_relative_eq!(ring.lower_angle(), PI * 11.0 / 8.0, epsilon = 1e-12);
        assert_relative_eq!(ring.upper_angle(), -PI * 3.0 / 8.0, epsilon = 1e-12);
        assert!(events(&mut ring).is_empty());
    }

    #[test]
    fn set_value_clamps_and_reports_truncated_value() {
        let mut ring = KnobRing::default();
        ring.set_value(300.0);
        assert_eq!(ring.display_value(), 127.0);
        ring.set_value(41.9);
        assert_eq!(
            events(&mut ring),
            vec![RingEvent::ValueUpdated(127), RingEvent::ValueUpdated(41)]
        );
    }

    #[test]
    fn hardclip_pins_pointer_to_bounds() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.set_value(110.0);
        assert_eq!(ring.display_value(), 110.0);
        assert_relative_eq!(ring.value_angle(), ring.upper_angle(), epsilon = 1e-12);

        ring.set_hardclip_value_pointer(false);
        let (_, free) = ring.mapper().value_to_angle(110.0);
        assert_relative_eq!(ring.value_angle(), free, epsilon = 1e-12);
    }

    #[test]
    fn gated_value_below_lower_bound_is_out_of_range() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.set_gated(true);
        assert!(!ring.hardclip_value_pointer());
        ring.set_value(10.0);
        assert_eq!(ring.value_tone(), Tone::OutOfRange);
        assert_eq!(events(&mut ring), vec![RingEvent::ValueUpdated(10)]);

        ring.set_gated(false);
        assert_eq!(ring.value_tone(), Tone::Tint);
    }

    #[test]
    fn programmatic_bounds_cannot_cross() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        assert_eq!(
            ring.set_lower_bound(110.0),
            Err(RingError::BoundsCrossed {
                lower: 110.0,
                upper: 100.0
            })
        );
        assert!(ring.set_upper_bound(10.0).is_err());
        assert_eq!(ring.bounds(), (20, 100));

        // Out-of-range bounds clamp to the range
        ring.set_upper_bound(500.0).unwrap();
        assert_eq!(ring.upper_bound(), 127.0);
    }

    #[test]
    fn degenerate_range_change_is_a_no_op() {
        let mut ring = KnobRing::default();
        assert!(ring.set_min(127.0).is_err());
        assert!(ring.set_max(-1.0).is_err());
        assert_eq!((ring.min(), ring.max()), (0.0, 127.0));
        assert!(ring.set_start_angle(-67.5).is_err());
    }

    #[test]
    fn raising_min_drags_bounds_and_value_along() {
        let mut ring = ring_with_bounds(10.0, 30.0);
        ring.set_value(5.0);
        ring.drain_events().for_each(drop);

        ring.set_min(40.0).unwrap();
        assert_eq!(ring.lower_bound(), 40.0);
        assert_eq!(ring.upper_bound(), 40.0);
        assert_eq!(ring.display_value(), 40.0);
        assert_eq!(events(&mut ring), vec![RingEvent::ValueUpdated(40)]);
    }

    #[test]
    fn lowering_max_drags_upper_bound_along() {
        let mut ring = KnobRing::default();
        ring.set_value(120.0);
        ring.set_max(100.0).unwrap();
        assert_eq!(ring.upper_bound(), 100.0);
        assert_eq!(ring.display_value(), 100.0);
        assert_relative_eq!(ring.upper_angle(), ring.mapper().end(), epsilon = 1e-12);
    }

    #[test]
    fn press_near_lower_handle_starts_lower_drag() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        let grab = ring.lower_angle() + 0.05;
        ring.pointer_down(at_angle(grab));
        assert_eq!(ring.drag_handle(), DragHandle::Lower);

        let evs = events(&mut ring);
        assert!(matches!(evs[0], RingEvent::PointerDown(_)));
        assert_eq!(
            evs[1],
            RingEvent::BoundsUpdated {
                lower: 20.0,
                upper: 100.0
            }
        );
    }

    #[test]
    fn press_near_upper_handle_across_the_wrap_starts_upper_drag() {
        let mut ring = KnobRing::default();
        // Upper handle sits at -67.5°, press just on the other side
        ring.pointer_down(at_angle(ring.upper_angle() - 0.1));
        assert_eq!(ring.drag_handle(), DragHandle::Upper);
    }

    #[test]
    fn press_away_from_handles_starts_nothing() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(PI / 2.0));
        assert_eq!(ring.drag_handle(), DragHandle::Idle);
        assert!(!ring.pointer_dragged(at_angle(PI / 2.0 + 0.2)));
    }

    #[test]
    fn lower_drag_moves_bound_and_reports() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(ring.lower_angle()));
        ring.drain_events().for_each(drop);

        // Top of the circle is the middle of the range
        assert!(ring.pointer_dragged(at_angle(PI / 2.0)));
        assert_relative_eq!(ring.lower_bound(), 63.5, epsilon = 1e-9);
        let evs = events(&mut ring);
        assert_eq!(evs.len(), 2);
        assert!(matches!(evs[0], RingEvent::ValueUpdated(_)));
        assert!(matches!(evs[1], RingEvent::BoundsUpdated { lower, .. } if (lower - 63.5).abs() < 1e-9));
    }

    #[test]
    fn lower_drag_past_upper_bound_is_rejected() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(ring.lower_angle()));
        ring.drain_events().for_each(drop);

        let (_, beyond_upper) = ring.mapper().value_to_angle(115.0);
        assert!(!ring.pointer_dragged(at_angle(beyond_upper)));
        assert_eq!(ring.lower_bound(), 20.0);
        assert!(events(&mut ring).is_empty());
        assert_eq!(ring.drag_handle(), DragHandle::Lower);
    }

    /// The value a drag to `pointer` would land on.
    fn landing_value(ring: &KnobRing, pointer: RingPointer) -> f64 {
        let raw = pointer_angle(pointer.position, pointer.center);
        ring.mapper()
            .drag_angle_to_value(raw, ring.behavior().gap_policy())
            .unwrap()
    }

    #[test]
    fn lower_drag_onto_upper_bound_is_rejected() {
        let target = at_angle(PI / 2.0);
        let upper = landing_value(&KnobRing::default(), target);
        let mut ring = ring_with_bounds(20.0, upper);
        ring.pointer_down(at_angle(ring.lower_angle()));
        assert_eq!(ring.drag_handle(), DragHandle::Lower);
        ring.drain_events().for_each(drop);

        assert!(!ring.pointer_dragged(target));
        assert_eq!(ring.lower_bound(), 20.0);
        assert!(events(&mut ring).is_empty());
    }

    #[test]
    fn upper_drag_onto_lower_bound_is_rejected() {
        let target = at_angle(PI / 2.0);
        let lower = landing_value(&KnobRing::default(), target);
        let mut ring = ring_with_bounds(lower, 100.0);
        ring.pointer_down(at_angle(ring.upper_angle()));
        assert_eq!(ring.drag_handle(), DragHandle::Upper);

        assert!(!ring.pointer_dragged(target));
        assert_eq!(ring.upper_bound(), 100.0);
    }

    #[test]
    fn upper_drag_below_lower_bound_is_rejected() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(ring.upper_angle()));
        assert_eq!(ring.drag_handle(), DragHandle::Upper);

        let (_, below_lower) = ring.mapper().value_to_angle(10.0);
        assert!(!ring.pointer_dragged(at_angle(below_lower)));
        assert_eq!(ring.upper_bound(), 100.0);
    }

    #[test]
    fn drag_into_gap_is_ignored_on_unipolar_ring() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(ring.upper_angle()));
        assert!(!ring.pointer_dragged(at_angle(-PI / 2.0)));
        assert_eq!(ring.upper_bound(), 100.0);
    }

    #[test]
    fn drag_into_gap_snaps_on_bipolar_bounds_ring() {
        let config = RingConfiguration {
            lower_bound: Some(20.0),
            upper_bound: Some(100.0),
            ..Default::default()
        };
        let mut ring =
            KnobRing::new(RingBehavior::BipolarBounds, config, RingStyle::default()).unwrap();
        ring.pointer_down(at_angle(ring.upper_angle()));
        assert!(ring.pointer_dragged(at_angle(-PI / 2.0 + 0.2)));
        assert_eq!(ring.upper_bound(), 127.0);
    }

    #[test]
    fn release_ends_drag_and_reports() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.pointer_down(at_angle(ring.lower_angle()));
        ring.drain_events().for_each(drop);
        ring.pointer_up(at_angle(0.0));
        assert_eq!(ring.drag_handle(), DragHandle::Idle);
        let evs = events(&mut ring);
        assert!(matches!(evs[0], RingEvent::PointerUp(_)));
        assert_eq!(evs[1], RingEvent::BoundsDragEnded);
    }

    #[test]
    fn reset_chord_restores_full_range_and_min_value() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.set_value(64.0);
        ring.drain_events().for_each(drop);

        ring.pointer_down(at_angle(ring.lower_angle()).with_reset_chord(true));
        assert_eq!(ring.drag_handle(), DragHandle::Idle);
        assert_eq!(ring.bounds(), (0, 127));
        assert_eq!(ring.display_value(), 0.0);
        let evs = events(&mut ring);
        assert_eq!(
            &evs[1..],
            &[
                RingEvent::BoundsUpdated {
                    lower: 0.0,
                    upper: 127.0
                },
                RingEvent::ValueUpdated(0)
            ]
        );
    }

    #[test]
    fn disabled_ring_passes_pointer_through_but_stays_put() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.set_enabled(false);
        assert!(!ring.pointer_visible());
        ring.pointer_down(at_angle(ring.lower_angle()));
        assert_eq!(ring.drag_handle(), DragHandle::Idle);
        ring.pointer_up(at_angle(0.0));
        let evs = events(&mut ring);
        assert_eq!(evs.len(), 2);
        assert!(matches!(evs[0], RingEvent::PointerDown(_)));
        assert!(matches!(evs[1], RingEvent::PointerUp(_)));
    }

    #[test]
    fn value_arcs_follow_the_mapper() {
        let mut ring = ring_with_bounds(20.0, 100.0);
        ring.set_value(60.0);
        let arcs = ring.value_arcs();
        assert_eq!(arcs.len(), 1);
        let (start, end, tone) = arcs[0];
        assert_relative_eq!(start, ring.lower_angle(), epsilon = 1e-12);
        assert_relative_eq!(end, ring.mapper().value_to_angle(60.0).1, epsilon = 1e-12);
        assert_eq!(tone, Tone::Tint);
    }
}
