//! The panel widget: source label, ring, output value, mode indicators and
//! target label, stacked vertically.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, create_effect};
use floem::{View, ViewId};

use crate::color::RingColor;
use crate::constants;
use crate::host::RingHost;
use crate::panel::{IndicatorState, ModeToggle, MultiSlider};
use crate::ring_view::{KnobRingView, RingUpdate};

#[cfg(feature = "context-menu")]
use floem::menu::{Menu, MenuItem};

type SharedPanel = Rc<RefCell<MultiSlider>>;

fn bump(revision: RwSignal<u64>) {
    revision.update(|r| *r = r.wrapping_add(1));
}

/// Reads panel state for a label, tracking `revision`.
fn panel_text(
    panel: &SharedPanel,
    revision: RwSignal<u64>,
    read: fn(&MultiSlider) -> String,
) -> impl Fn() -> String + 'static {
    let panel = panel.clone();
    move || {
        revision.get();
        panel.try_borrow().map(|p| read(&p)).unwrap_or_default()
    }
}

fn caption(text: impl Fn() -> String + 'static) -> impl IntoView {
    label(text).style(|s| {
        s.font_size(constants::LABEL_FONT)
            .color(Color::rgb8(120, 120, 120))
            .justify_content(Some(floem::taffy::AlignContent::Center))
    })
}

fn indicator(
    text: &'static str,
    toggle: ModeToggle,
    lit: RingColor,
    read_state: fn(&MultiSlider) -> IndicatorState,
    panel: &SharedPanel,
    revision: RwSignal<u64>,
    ring_id: ViewId,
) -> impl IntoView {
    let read = panel.clone();
    let write = panel.clone();
    label(move || text)
        .on_event_stop(EventListener::PointerDown, move |_| {
            let flipped = write
                .try_borrow_mut()
                .map(|mut p| p.toggle_mode(toggle))
                .unwrap_or(false);
            if flipped {
                bump(revision);
                ring_id.update_state(RingUpdate::Repaint);
            }
        })
        .style(move |s| {
            revision.get();
            let state = read
                .try_borrow()
                .map(|p| read_state(&p))
                .unwrap_or(IndicatorState::Hidden);
            let color = match state {
                IndicatorState::Lit => lit,
                IndicatorState::Dim | IndicatorState::Hidden => constants::INDICATOR_DIM,
                IndicatorState::Disabled => constants::DISABLED_COLOR,
            };
            s.font_size(constants::INDICATOR_FONT)
                .color(Color::from(color))
                .cursor(floem::style::CursorStyle::Pointer)
                .apply_if(state == IndicatorState::Hidden, |s| s.hide())
        })
}

#[cfg(feature = "context-menu")]
fn mode_menu(panel: &SharedPanel, revision: RwSignal<u64>, ring_id: ViewId) -> Menu {
    let entries = panel.try_borrow().map(|p| p.mode_menu()).unwrap_or_default();
    entries.into_iter().fold(Menu::new(""), |menu, entry| {
        let title = if entry.checked {
            format!("✓ {}", entry.toggle.label())
        } else {
            entry.toggle.label().to_string()
        };
        let panel = panel.clone();
        menu.entry(MenuItem::new(title).action(move || {
            let flipped = panel
                .try_borrow_mut()
                .map(|mut p| p.toggle_mode(entry.toggle))
                .unwrap_or(false);
            if flipped {
                bump(revision);
                ring_id.update_state(RingUpdate::Repaint);
            }
        }))
    })
}

/// Creates a panel around `panel`, driven by `value`.
///
/// The panel's delegate receives the remapped output and every bound and
/// mode notification.
pub fn multi_slider(value: RwSignal<i64>, panel: MultiSlider) -> impl IntoView {
    let panel: SharedPanel = Rc::new(RefCell::new(panel));
    let revision = RwSignal::new(0_u64);

    let host: Rc<RefCell<dyn RingHost>> = panel.clone();
    let ring = KnobRingView::new(host).on_change(move || bump(revision));
    let ring_id = ring.id();

    create_effect(move |_| {
        let v = value.get();
        ring_id.update_state(RingUpdate::Value(v as f64));
    });

    let body = v_stack((
        caption(panel_text(&panel, revision, |p| p.source_text().to_string())),
        ring,
        label(panel_text(&panel, revision, MultiSlider::output_text)).style(|s| {
            s.font_size(constants::VALUE_FONT)
                .color(Color::rgb8(200, 200, 200))
                .font_family("monospace".to_string())
        }),
        h_stack((
            indicator(
                "G",
                ModeToggle::Gated,
                constants::INDICATOR_GATED,
                MultiSlider::gate_indicator,
                &panel,
                revision,
                ring_id,
            ),
            indicator(
                "R",
                ModeToggle::Reversed,
                constants::INDICATOR_REVERSED,
                MultiSlider::reverse_indicator,
                &panel,
                revision,
                ring_id,
            ),
        ))
        .style(|s| s.gap(constants::GAP).items_center().justify_center()),
        caption(panel_text(&panel, revision, |p| p.target_text().to_string())),
    ))
    .style(|s| {
        s.gap(constants::GAP / 2.0)
            .items_center()
            .min_width(constants::PANEL_SIZE)
            .padding(constants::GAP)
    });

    #[cfg(feature = "context-menu")]
    let body = {
        let has_menu = panel.try_borrow().map(|p| !p.mode_menu().is_empty()).unwrap_or(false);
        if has_menu {
            let menu_panel = panel.clone();
            body.context_menu(move || mode_menu(&menu_panel, revision, ring_id))
                .into_any()
        } else {
            body.into_any()
        }
    };

    body
}
