//! The seam between the ring view and whatever owns the ring model.

use crate::delegate::{KnobDelegate, RingPointer};
use crate::ring::KnobRing;

/// Something the ring view can paint from and feed pointer input to.
///
/// Implementors forward input to their [`KnobRing`] and drain its
/// notifications before returning.
pub trait RingHost {
    fn ring(&self) -> &KnobRing;
    /// Push an externally driven value into the ring.
    fn apply_value(&mut self, value: f64);
    fn pointer_down(&mut self, pointer: RingPointer);
    /// Returns whether the ring changed.
    fn pointer_dragged(&mut self, pointer: RingPointer) -> bool;
    fn pointer_up(&mut self, pointer: RingPointer);
}

/// A bare ring wired straight to a delegate.
pub struct RingController {
    ring: KnobRing,
    delegate: Box<dyn KnobDelegate>,
}

impl RingController {
    pub fn new(ring: KnobRing, delegate: impl KnobDelegate + 'static) -> Self {
        Self {
            ring,
            delegate: Box::new(delegate),
        }
    }

    /// Mutate the ring, then deliver whatever it queued.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut KnobRing) -> R) -> R {
        let out = f(&mut self.ring);
        self.flush();
        out
    }

    fn flush(&mut self) {
        for event in self.ring.drain_events() {
            event.dispatch(self.delegate.as_mut());
        }
    }
}

impl RingHost for RingController {
    fn ring(&self) -> &KnobRing {
        &self.ring
    }

    fn apply_value(&mut self, value: f64) {
        self.update(|ring| ring.set_value(value));
    }

    fn pointer_down(&mut self, pointer: RingPointer) {
        self.update(|ring| ring.pointer_down(pointer));
    }

    fn pointer_dragged(&mut self, pointer: RingPointer) -> bool {
        self.update(|ring| ring.pointer_dragged(pointer))
    }

    fn pointer_up(&mut self, pointer: RingPointer) {
        self.update(|ring| ring.pointer_up(pointer));
    }
}
