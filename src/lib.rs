//! # floem-knob
//!
//! A knob ring widget for [Floem](https://github.com/lapce/floem).
//!
//! The ring draws an arc track with a value pointer and two draggable bound
//! handles that gate (or remap) the value. A panel wraps the ring with
//! source/target labels, the output value and gate/reverse indicators.
//!
//! The state models ([`KnobRing`], [`MultiSlider`]) are plain Rust and can be
//! driven without a window; [`knob_ring`] and [`multi_slider`] put them on
//! screen.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_knob::{multi_slider, MultiSlider, RingConfiguration};
//!
//! let value = RwSignal::new(64_i64);
//! let panel = MultiSlider::new(RingConfiguration::default())
//!     .unwrap()
//!     .with_names("Velocity", "Cutoff");
//! // Use `multi_slider(value, panel)` in your Floem view tree.
//! ```

mod behavior;
mod color;
mod config;
mod constants;
mod delegate;
mod error;
mod geometry;
mod host;
mod mapper;
mod panel;
mod ring;
mod ring_view;
mod slider_view;

pub use behavior::{ArcInputs, ArcSegment, RingBehavior, Tone};
pub use color::RingColor;
pub use config::{RingConfiguration, RingStyle};
pub use delegate::{EventFn, KnobDelegate, RingEvent, RingPointer};
pub use error::{Result, RingError};
pub use host::{RingController, RingHost};
pub use mapper::{
    AngleValueMapper, GapPolicy, MapRange, map_range, normalized_angular_distance, pointer_angle,
};
pub use panel::{IndicatorState, ModeMenuEntry, ModeToggle, MultiSlider};
pub use ring::{DragHandle, KnobRing};
pub use ring_view::{KnobRingView, knob_ring};
pub use slider_view::multi_slider;
