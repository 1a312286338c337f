//! Notifications a ring or panel sends to its host.

use floem::kurbo::Point;

/// A pointer press or release as the ring saw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPointer {
    /// Position in the ring's y-up local frame.
    pub position: Point,
    /// Center of the ring in the same frame.
    pub center: Point,
    /// The reset chord (Cmd / Meta) was held.
    pub reset_chord: bool,
}

impl RingPointer {
    pub fn new(position: Point, center: Point) -> Self {
        Self {
            position,
            center,
            reset_chord: false,
        }
    }

    pub fn with_reset_chord(mut self, held: bool) -> Self {
        self.reset_chord = held;
        self
    }
}

/// Queued notification, drained by whoever owns the model.
#[derive(Debug, Clone, PartialEq)]
pub enum RingEvent {
    ValueUpdated(i64),
    BoundsUpdated { lower: f64, upper: f64 },
    BoundsDragEnded,
    GateModeChanged(bool),
    ReversedModeChanged(bool),
    BipolarModeChanged(bool),
    RemapModeChanged(bool),
    PointerDown(RingPointer),
    PointerUp(RingPointer),
}

impl RingEvent {
    pub fn dispatch(&self, delegate: &mut dyn KnobDelegate) {
        match self {
            RingEvent::ValueUpdated(value) => delegate.value_updated(*value),
            RingEvent::BoundsUpdated { lower, upper } => delegate.bounds_updated(*lower, *upper),
            RingEvent::BoundsDragEnded => delegate.bounds_drag_ended(),
            RingEvent::GateModeChanged(on) => delegate.gate_mode_changed(*on),
            RingEvent::ReversedModeChanged(on) => delegate.reversed_mode_changed(*on),
            RingEvent::BipolarModeChanged(on) => delegate.bipolar_mode_changed(*on),
            RingEvent::RemapModeChanged(on) => delegate.remap_mode_changed(*on),
            RingEvent::PointerDown(pointer) => delegate.pointer_down(pointer),
            RingEvent::PointerUp(pointer) => delegate.pointer_up(pointer),
        }
    }
}

/// Receives ring and panel notifications. Every method defaults to doing
/// nothing, so hosts implement only what they care about.
pub trait KnobDelegate {
    /// The displayed value changed. Panels report the remapped output.
    fn value_updated(&mut self, _value: i64) {}
    fn bounds_updated(&mut self, _lower: f64, _upper: f64) {}
    /// A bound drag finished (sent on every pointer release).
    fn bounds_drag_ended(&mut self) {}
    fn gate_mode_changed(&mut self, _gated: bool) {}
    fn reversed_mode_changed(&mut self, _reversed: bool) {}
    fn bipolar_mode_changed(&mut self, _bipolar: bool) {}
    fn remap_mode_changed(&mut self, _remap: bool) {}
    fn pointer_down(&mut self, _pointer: &RingPointer) {}
    fn pointer_up(&mut self, _pointer: &RingPointer) {}
}

/// A delegate that ignores everything.
impl KnobDelegate for () {}

/// Forwards every notification to the closure as a [`RingEvent`].
pub struct EventFn<F>(pub F);

impl<F: FnMut(RingEvent)> KnobDelegate for EventFn<F> {
    fn value_updated(&mut self, value: i64) {
        (self.0)(RingEvent::ValueUpdated(value))
    }
    fn bounds_updated(&mut self, lower: f64, upper: f64) {
        (self.0)(RingEvent::BoundsUpdated { lower, upper })
    }
    fn bounds_drag_ended(&mut self) {
        (self.0)(RingEvent::BoundsDragEnded)
    }
    fn gate_mode_changed(&mut self, gated: bool) {
        (self.0)(RingEvent::GateModeChanged(gated))
    }
    fn reversed_mode_changed(&mut self, reversed: bool) {
        (self.0)(RingEvent::ReversedModeChanged(reversed))
    }
    fn bipolar_mode_changed(&mut self, bipolar: bool) {
        (self.0)(RingEvent::BipolarModeChanged(bipolar))
    }
    fn remap_mode_changed(&mut self, remap: bool) {
        (self.0)(RingEvent::RemapModeChanged(remap))
    }
    fn pointer_down(&mut self, pointer: &RingPointer) {
        (self.0)(RingEvent::PointerDown(*pointer))
    }
    fn pointer_up(&mut self, pointer: &RingPointer) {
        (self.0)(RingEvent::PointerUp(*pointer))
    }
}
