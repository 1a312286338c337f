//! Standalone demo: a unipolar panel, a bipolar-bounds panel and a bare ring.
//!
//! Run with `RUST_LOG=debug` to see delegate traffic.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_knob::{
    KnobDelegate, KnobRing, MultiSlider, RingBehavior, RingConfiguration, RingStyle, knob_ring,
    multi_slider,
};

struct LogDelegate(&'static str);

impl KnobDelegate for LogDelegate {
    fn value_updated(&mut self, value: i64) {
        log::info!("{}: value {value}", self.0);
    }

    fn bounds_updated(&mut self, lower: f64, upper: f64) {
        log::debug!("{}: bounds {lower:.0}..{upper:.0}", self.0);
    }

    fn bounds_drag_ended(&mut self) {
        log::debug!("{}: drag ended", self.0);
    }

    fn gate_mode_changed(&mut self, gated: bool) {
        log::info!("{}: gated {gated}", self.0);
    }

    fn bipolar_mode_changed(&mut self, bipolar: bool) {
        log::info!("{}: bipolar {bipolar}", self.0);
    }
}

fn main() {
    env_logger::init();

    let value = RwSignal::new(64_i64);
    let ring_value = RwSignal::new(32.0_f64);

    let unipolar = MultiSlider::new(RingConfiguration {
        lower_bound: Some(20.0),
        upper_bound: Some(100.0),
        ..RingConfiguration::default()
    })
    .unwrap()
    .with_names("Velocity", "Cutoff")
    .with_delegate(LogDelegate("unipolar"));

    let bipolar = MultiSlider::bipolar_bounds(RingConfiguration::default())
        .unwrap()
        .with_names("LFO", "Pan")
        .with_delegate(LogDelegate("bipolar"));

    let ring = KnobRing::new(
        RingBehavior::Bipolar,
        RingConfiguration::default(),
        RingStyle::default(),
    )
    .unwrap();

    let view = move || {
        v_stack((
            h_stack((multi_slider(value, unipolar), multi_slider(value, bipolar)))
                .style(|s| s.gap(16.0)),
            knob_ring(ring_value, ring, LogDelegate("ring")).style(|s| s.width(80.0)),
        ))
        .style(|s| {
            s.gap(12.0)
                .padding(16.0)
                .items_center()
                .size_full()
                .background(Color::rgb8(40, 40, 40))
        })
    };

    floem::Application::new()
        .window(
            move |_| {
                view().on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((320.0, 420.0))
                    .title("floem-knob"),
            ),
        )
        .run();
}
