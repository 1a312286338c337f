//! The knob ring widget.
//!
//! Paints a [`RingHost`]'s ring (track, value arcs, bound and value
//! pointers) and feeds it pointer input in the ring's y-up frame.

use std::cell::RefCell;
use std::rc::Rc;

use floem::kurbo::{Cap, Point, Rect, Stroke};
use floem::peniko::Color;
use floem::reactive::{RwSignal, SignalGet, create_effect};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;
use log::warn;

use crate::behavior::Tone;
use crate::constants;
use crate::delegate::{KnobDelegate, RingPointer};
use crate::geometry;
use crate::host::{RingController, RingHost};
use crate::ring::KnobRing;

pub(crate) enum RingUpdate {
    Value(f64),
    Repaint,
}

pub struct KnobRingView {
    id: ViewId,
    held: bool,
    host: Rc<RefCell<dyn RingHost>>,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn()>>,
}

/// Creates a standalone knob ring driven by `value`.
///
/// Bound gestures and value changes are reported to `delegate`.
pub fn knob_ring(
    value: RwSignal<f64>,
    ring: KnobRing,
    delegate: impl KnobDelegate + 'static,
) -> KnobRingView {
    let host = Rc::new(RefCell::new(RingController::new(ring, delegate)));
    let view = KnobRingView::new(host);
    let id = view.id;

    create_effect(move |_| {
        let v = value.get();
        id.update_state(RingUpdate::Value(v));
    });

    view
}

impl KnobRingView {
    /// Wraps an existing host; the caller keeps its own handle to the host.
    pub fn new(host: Rc<RefCell<dyn RingHost>>) -> Self {
        KnobRingView {
            id: ViewId::new(),
            held: false,
            host,
            size: Default::default(),
            on_change: None,
        }
        .style(|s| {
            s.flex_grow(1.0)
                .aspect_ratio(1.0)
                .min_height(constants::RING_MIN_SIZE)
                .cursor(floem::style::CursorStyle::Default)
        })
    }

    /// Called after every pointer or value change the host accepted.
    pub fn on_change(mut self, f: impl Fn() + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    fn side(&self) -> f64 {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        w.min(h)
    }

    fn center(&self) -> Point {
        Point::new(self.size.width as f64 / 2.0, self.size.height as f64 / 2.0)
    }

    fn ring_pointer(&self, pos: Point) -> RingPointer {
        let local = geometry::to_local(pos, self.size.height as f64);
        RingPointer::new(local, self.center())
    }

    /// Runs `f` against the host, skipping it if the host is already borrowed.
    fn with_host<R>(&self, f: impl FnOnce(&mut dyn RingHost) -> R) -> Option<R> {
        match self.host.try_borrow_mut() {
            Ok(mut host) => Some(f(&mut *host)),
            Err(_) => {
                warn!("knob ring host busy, dropping input");
                None
            }
        }
    }

    fn changed(&self) {
        if let Some(cb) = &self.on_change {
            cb();
        }
        self.id.request_paint();
    }
}

fn tone_color(ring: &KnobRing, tone: Tone) -> Color {
    match tone {
        Tone::Tint => ring.style().tint_color.into(),
        Tone::OutOfRange => ring.behavior().out_of_range_color().into(),
        Tone::Disabled => constants::DISABLED_COLOR.into(),
    }
}

impl View for KnobRingView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<RingUpdate>() {
            match *update {
                RingUpdate::Value(v) => {
                    if self.with_host(|host| host.apply_value(v)).is_some() {
                        self.changed();
                    }
                }
                RingUpdate::Repaint => self.id.request_paint(),
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                if !e.button.is_primary() {
                    return EventPropagation::Continue;
                }
                cx.update_active(self.id());
                self.held = true;
                let pointer = self.ring_pointer(e.pos).with_reset_chord(e.modifiers.meta());
                if self.with_host(|host| host.pointer_down(pointer)).is_some() {
                    self.changed();
                }
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    let pointer = self.ring_pointer(e.pos);
                    if self.with_host(|host| host.pointer_dragged(pointer)) == Some(true) {
                        self.changed();
                    }
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                if self.held {
                    self.held = false;
                    let pointer = self.ring_pointer(e.pos);
                    if self.with_host(|host| host.pointer_up(pointer)).is_some() {
                        self.changed();
                    }
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let Ok(host) = self.host.try_borrow() else {
            return;
        };
        let ring = host.ring();
        let style = ring.style();
        let center = self.center();
        let outer = self.side() / 2.0;
        let radius = geometry::track_radius(self.side(), style);
        if radius <= 0.0 {
            return;
        }
        let (start, end) = (ring.mapper().start(), ring.mapper().end());

        let track = geometry::arc_path(center, radius, start, end);
        cx.fill(&track, Color::from(style.track_fill), 0.0);
        cx.stroke(
            &track,
            Color::from(style.ring_color),
            &Stroke::new(style.ring_width),
        );

        let arc_stroke = Stroke::new(style.value_arc_width()).with_caps(Cap::Round);
        for (from, to, tone) in ring.value_arcs() {
            let arc = geometry::arc_path(center, radius, from, to);
            cx.stroke(&arc, tone_color(ring, tone), &arc_stroke);
        }

        if ring.bound_pointers_visible() {
            let bound_stroke = Stroke::new(style.bound_pointer_width);
            for angle in [ring.lower_angle(), ring.upper_angle()] {
                let line = geometry::pointer_line(
                    center,
                    outer,
                    style.bound_pointer_width,
                    style.ring_width,
                    angle,
                );
                cx.stroke(&line, Color::from(style.bound_pointer_color), &bound_stroke);
            }
        }

        if ring.pointer_visible() {
            let line = geometry::pointer_line(
                center,
                outer,
                style.pointer_width,
                style.ring_width,
                ring.value_angle(),
            );
            cx.stroke(
                &line,
                Color::from(style.pointer_color),
                &Stroke::new(style.pointer_width),
            );
        }
    }
}
