use eframe::egui::{Button, ComboBox, Ui};
use strum::IntoEnumIterator;

use crate::domain::{Selection, SupportedPair, Theme, Timeframe};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Pair(String),
    Timeframe(Timeframe),
    ToggleTheme,
    ShowCurrentPrice,
    ShowLastMinute,
}

/// Pair + timeframe selectors, theme toggle and the two snapshot actions.
pub struct SelectionPanel<'a> {
    selection: &'a Selection,
    pairs: &'a [SupportedPair],
    theme: Theme,
    /// Snapshot buttons are disabled while a snapshot fetch is running.
    snapshot_busy: bool,
}

impl<'a> SelectionPanel<'a> {
    pub fn new(
        selection: &'a Selection,
        pairs: &'a [SupportedPair],
        theme: Theme,
        snapshot_busy: bool,
    ) -> Self {
        Self {
            selection,
            pairs,
            theme,
            snapshot_busy,
        }
    }

    fn selected_pair_label(&self) -> String {
        self.pairs
            .iter()
            .find(|p| p.identifier == self.selection.pair)
            .map(|p| p.label())
            .unwrap_or_else(|| self.selection.pair.clone())
    }

    fn render_pair_selector(&mut self, ui: &mut Ui) -> Option<String> {
        let mut changed = None;
        ui.label_subheader(UI_TEXT.pair_selector_heading);
        ComboBox::from_id_salt("pair_selector")
            .width(UI_CONFIG.pair_combo_width)
            .selected_text(self.selected_pair_label())
            .show_ui(ui, |ui| {
                for pair in self.pairs {
                    let is_selected = pair.identifier == self.selection.pair;
                    if ui.selectable_label(is_selected, pair.label()).clicked() && !is_selected {
                        changed = Some(pair.identifier.clone());
                    }
                }
            });

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            if let Some(pair) = &changed {
                log::info!("A new pair was selected: {}", pair);
            }
        }
        changed
    }

    fn render_timeframe_selector(&mut self, ui: &mut Ui) -> Option<Timeframe> {
        let mut selected = self.selection.timeframe;
        ui.label_subheader(UI_TEXT.timeframe_selector_heading);
        ComboBox::from_id_salt("timeframe_selector")
            .width(UI_CONFIG.timeframe_combo_width)
            .selected_text(selected.to_string())
            .show_ui(ui, |ui| {
                for timeframe in Timeframe::iter() {
                    ui.selectable_value(&mut selected, timeframe, timeframe.to_string());
                }
            });
        (selected != self.selection.timeframe).then_some(selected)
    }
}

impl<'a> Panel for SelectionPanel<'a> {
    type Event = SelectionEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();

        if let Some(pair) = self.render_pair_selector(ui) {
            events.push(SelectionEvent::Pair(pair));
        }
        ui.separator();

        if let Some(timeframe) = self.render_timeframe_selector(ui) {
            events.push(SelectionEvent::Timeframe(timeframe));
        }
        ui.separator();

        let theme_label = if self.theme.is_dark() {
            UI_TEXT.theme_toggle_to_light
        } else {
            UI_TEXT.theme_toggle_to_dark
        };
        if ui.button(theme_label).clicked() {
            events.push(SelectionEvent::ToggleTheme);
        }
        ui.separator();

        let enabled = !self.snapshot_busy;
        if ui
            .add_enabled(enabled, Button::new(UI_TEXT.current_price_button))
            .on_hover_text(UI_TEXT.current_price_tooltip)
            .clicked()
        {
            events.push(SelectionEvent::ShowCurrentPrice);
        }
        if ui
            .add_enabled(enabled, Button::new(UI_TEXT.last_minute_button))
            .on_hover_text(UI_TEXT.last_minute_tooltip)
            .clicked()
        {
            events.push(SelectionEvent::ShowLastMinute);
        }

        events
    }
}
