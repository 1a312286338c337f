//! The panel model: a ring plus its labels, output value, mode indicators
//! and mode menu.
//!
//! The panel owns its [`KnobRing`], turns ring notifications into panel
//! state (label text, remapped output) and forwards them to the host's
//! delegate.

use log::debug;

use crate::behavior::RingBehavior;
use crate::config::{RingConfiguration, RingStyle};
use crate::delegate::{KnobDelegate, RingEvent, RingPointer};
use crate::error::Result;
use crate::host::RingHost;
use crate::mapper::map_range;
use crate::ring::KnobRing;

/// A mode the panel can flip from its context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeToggle {
    Bipolar,
    Remap,
    Gated,
    Reversed,
}

impl ModeToggle {
    pub const ALL: [ModeToggle; 4] = [
        ModeToggle::Bipolar,
        ModeToggle::Remap,
        ModeToggle::Gated,
        ModeToggle::Reversed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModeToggle::Bipolar => "Bipolar",
            ModeToggle::Remap => "Remap",
            ModeToggle::Gated => "Gated",
            ModeToggle::Reversed => "Reversed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeMenuEntry {
    pub toggle: ModeToggle,
    pub checked: bool,
}

/// How a "G" / "R" indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Lit,
    Dim,
    Disabled,
    Hidden,
}

pub struct MultiSlider {
    ring: KnobRing,
    source_name: String,
    target_name: String,
    source_text: String,
    target_text: String,
    output: i64,
    value_needs_remap: bool,
    gate_indicator_visible: bool,
    delegate: Box<dyn KnobDelegate>,
}

impl MultiSlider {
    /// A unipolar panel.
    pub fn new(config: RingConfiguration) -> Result<Self> {
        Self::with_behavior(RingBehavior::Unipolar, config, RingStyle::default())
    }

    /// A bipolar panel: ungated, not remapped, pointer not hard-clipped, and
    /// no gate indicator.
    pub fn bipolar(config: RingConfiguration) -> Result<Self> {
        let config = RingConfiguration {
            is_gated: false,
            value_needs_remap: false,
            hardclip_value_pointer: false,
            ..config
        };
        let mut panel = Self::with_behavior(RingBehavior::Bipolar, config, RingStyle::default())?;
        panel.gate_indicator_visible = false;
        Ok(panel)
    }

    /// A bipolar-bounds panel, with the mode context menu.
    pub fn bipolar_bounds(config: RingConfiguration) -> Result<Self> {
        Self::with_behavior(RingBehavior::BipolarBounds, config, RingStyle::default())
    }

    pub fn with_behavior(
        behavior: RingBehavior,
        config: RingConfiguration,
        style: RingStyle,
    ) -> Result<Self> {
        let ring = KnobRing::new(behavior, config, style)?;
        let source_name = "Source".to_string();
        let target_name = "Target".to_string();
        let mut panel = Self {
            ring,
            source_text: source_name.clone(),
            target_text: target_name.clone(),
            source_name,
            target_name,
            output: 0,
            value_needs_remap: config.value_needs_remap && !config.is_gated,
            gate_indicator_visible: true,
            delegate: Box::new(()),
        };
        panel.output = panel.remap(panel.ring.display_value() as i64);
        Ok(panel)
    }

    pub fn with_delegate(mut self, delegate: impl KnobDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    pub fn with_names(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.set_source_name(source);
        self.set_target_name(target);
        self
    }

    pub fn set_delegate(&mut self, delegate: impl KnobDelegate + 'static) {
        self.delegate = Box::new(delegate);
    }

    pub fn set_style(&mut self, style: RingStyle) {
        self.ring.set_style(style);
    }

    /// Text shown above the ring.
    pub fn set_source_name(&mut self, name: impl Into<String>) {
        self.source_name = name.into();
        self.source_text = self.source_name.clone();
    }

    /// Text shown below the ring.
    pub fn set_target_name(&mut self, name: impl Into<String>) {
        self.target_name = name.into();
        self.target_text = self.target_name.clone();
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    /// The last reported output value.
    pub fn output(&self) -> i64 {
        self.output
    }

    pub fn output_text(&self) -> String {
        self.output.to_string()
    }

    pub fn is_gated(&self) -> bool {
        self.ring.is_gated()
    }

    pub fn is_reversed(&self) -> bool {
        self.ring.is_reversed()
    }

    pub fn value_needs_remap(&self) -> bool {
        self.value_needs_remap
    }

    pub fn is_enabled(&self) -> bool {
        self.ring.is_enabled()
    }

    pub fn set_value(&mut self, value: i64) {
        self.ring.set_value(value as f64);
        self.flush();
    }

    pub fn set_lower_bound_value(&mut self, value: i64) -> Result<()> {
        self.ring.set_lower_bound(value as f64)?;
        self.refresh_output();
        Ok(())
    }

    pub fn set_upper_bound_value(&mut self, value: i64) -> Result<()> {
        self.ring.set_upper_bound(value as f64)?;
        self.refresh_output();
        Ok(())
    }

    pub fn lower_bound_value(&self) -> i64 {
        self.ring.lower_bound() as i64
    }

    pub fn upper_bound_value(&self) -> i64 {
        self.ring.upper_bound() as i64
    }

    pub fn set_min(&mut self, min: f64) -> Result<()> {
        self.ring.set_min(min)?;
        self.flush();
        Ok(())
    }

    pub fn set_max(&mut self, max: f64) -> Result<()> {
        self.ring.set_max(max)?;
        self.flush();
        Ok(())
    }

    pub fn set_hardclip_value_pointer(&mut self, on: bool) {
        self.ring.set_hardclip_value_pointer(on);
    }

    /// Gating also switches output remapping off (and back on).
    pub fn set_gated(&mut self, gated: bool) {
        self.ring.set_gated(gated);
        self.value_needs_remap = !gated;
        self.refresh_output();
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.ring.set_reversed(reversed);
    }

    pub fn set_value_needs_remap(&mut self, on: bool) {
        self.value_needs_remap = on;
        self.refresh_output();
    }

    pub fn set_bipolar_bounds(&mut self, on: bool) {
        self.ring.set_bipolar_bounds(on);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.ring.set_enabled(enabled);
    }

    /// Full range and value back to `min`. The labels keep showing the
    /// names, since no gesture is in progress.
    pub fn reset(&mut self) {
        self.ring.reset();
        self.flush();
        self.restore_names();
    }

    fn restore_names(&mut self) {
        self.source_text = self.source_name.clone();
        self.target_text = self.target_name.clone();
    }

    /// Click on the "G" indicator.
    pub fn toggle_gate(&mut self) -> bool {
        self.toggle_mode(ModeToggle::Gated)
    }

    /// Click on the "R" indicator.
    pub fn toggle_reversed(&mut self) -> bool {
        self.toggle_mode(ModeToggle::Reversed)
    }

    /// Flip a mode and tell the delegate. Ignored while disabled.
    pub fn toggle_mode(&mut self, toggle: ModeToggle) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let on = !self.mode(toggle);
        debug!("{} mode {}", toggle.label(), if on { "on" } else { "off" });
        let event = match toggle {
            ModeToggle::Bipolar => {
                self.set_bipolar_bounds(on);
                RingEvent::BipolarModeChanged(on)
            }
            ModeToggle::Remap => {
                self.set_value_needs_remap(on);
                RingEvent::RemapModeChanged(on)
            }
            ModeToggle::Gated => {
                self.set_gated(on);
                RingEvent::GateModeChanged(on)
            }
            ModeToggle::Reversed => {
                self.set_reversed(on);
                RingEvent::ReversedModeChanged(on)
            }
        };
        event.dispatch(self.delegate.as_mut());
        true
    }

    pub fn mode(&self, toggle: ModeToggle) -> bool {
        match toggle {
            ModeToggle::Bipolar => self.ring.bipolar_bounds(),
            ModeToggle::Remap => self.value_needs_remap,
            ModeToggle::Gated => self.ring.is_gated(),
            ModeToggle::Reversed => self.ring.is_reversed(),
        }
    }

    /// Entries of the context menu; empty when the ring has no mode menu.
    pub fn mode_menu(&self) -> Vec<ModeMenuEntry> {
        if !self.ring.behavior().has_mode_menu() {
            return Vec::new();
        }
        ModeToggle::ALL
            .into_iter()
            .map(|toggle| ModeMenuEntry {
                toggle,
                checked: self.mode(toggle),
            })
            .collect()
    }

    pub fn gate_indicator(&self) -> IndicatorState {
        if !self.gate_indicator_visible {
            IndicatorState::Hidden
        } else {
            self.indicator(self.ring.is_gated())
        }
    }

    pub fn reverse_indicator(&self) -> IndicatorState {
        self.indicator(self.ring.is_reversed())
    }

    fn indicator(&self, lit: bool) -> IndicatorState {
        if !self.is_enabled() {
            IndicatorState::Disabled
        } else if lit {
            IndicatorState::Lit
        } else {
            IndicatorState::Dim
        }
    }

    /// Remap a ring value from the bounds onto the full range.
    fn remap(&self, value: i64) -> i64 {
        if !self.value_needs_remap {
            return value;
        }
        let lower = self.ring.lower_bound() as i64;
        let upper = self.ring.upper_bound() as i64;
        if lower == upper {
            return value;
        }
        map_range(value, lower, upper, self.ring.min() as i64, self.ring.max() as i64)
    }

    /// Recompute the output after a mode change, reporting it if it moved.
    fn refresh_output(&mut self) {
        let output = self.remap(self.ring.display_value() as i64);
        if output != self.output {
            self.output = output;
            self.delegate.value_updated(output);
        }
    }

    fn flush(&mut self) {
        let events: Vec<RingEvent> = self.ring.drain_events().collect();
        for event in events {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: RingEvent) {
        match event {
            RingEvent::ValueUpdated(value) => {
                self.output = self.remap(value);
                self.delegate.value_updated(self.output);
            }
            RingEvent::BoundsUpdated { lower, upper } => {
                self.source_text = format!("Min: {lower:.0}");
                self.target_text = format!("Max: {upper:.0}");
                self.delegate.bounds_updated(lower, upper);
            }
            RingEvent::BoundsDragEnded => {
                self.restore_names();
                self.delegate.bounds_drag_ended();
            }
            other => other.dispatch(self.delegate.as_mut()),
        }
    }
}

impl RingHost for MultiSlider {
    fn ring(&self) -> &KnobRing {
        &self.ring
    }

    fn apply_value(&mut self, value: f64) {
        self.set_value(value as i64);
    }

    fn pointer_down(&mut self, pointer: RingPointer) {
        self.ring.pointer_down(pointer);
        self.flush();
    }

    fn pointer_dragged(&mut self, pointer: RingPointer) -> bool {
        let changed = self.ring.pointer_dragged(pointer);
        self.flush();
        changed
    }

    fn pointer_up(&mut self, pointer: RingPointer) {
        self.ring.pointer_up(pointer);
        self.flush();
    }
}
