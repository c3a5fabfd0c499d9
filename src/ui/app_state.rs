use serde::{Deserialize, Serialize};

use crate::data::SnapshotAction;
use crate::domain::{Selection, Theme};
use crate::ui::ui_panels::SelectionEvent;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// The part of the app that survives restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub selection: Selection,
    pub theme: Theme,
}

/// What the app has to do after a UI event was folded into the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    None,
    /// Pair or timeframe changed; the store picks it up on the next `get_series`.
    SelectionChanged,
    /// Charts need rebuilding with the new palette and egui visuals need resetting.
    ThemeChanged,
    /// Kick off a one-candle snapshot fetch for the current pair.
    Snapshot(SnapshotAction),
}

/// Fold one selection panel event into `state`.
pub fn apply_selection_event(state: &mut ViewState, event: SelectionEvent) -> ViewEffect {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_ui_interactions {
        log::info!("[ui] {:?}", event);
    }

    match event {
        SelectionEvent::Pair(pair) => {
            let next = state.selection.with_pair(pair);
            if next == state.selection {
                return ViewEffect::None;
            }
            state.selection = next;
            ViewEffect::SelectionChanged
        }
        SelectionEvent::Timeframe(timeframe) => {
            if timeframe == state.selection.timeframe {
                return ViewEffect::None;
            }
            state.selection = state.selection.with_timeframe(timeframe);
            ViewEffect::SelectionChanged
        }
        SelectionEvent::ToggleTheme => {
            state.theme = state.theme.toggled();
            ViewEffect::ThemeChanged
        }
        SelectionEvent::ShowCurrentPrice => ViewEffect::Snapshot(SnapshotAction::CurrentPrice),
        SelectionEvent::ShowLastMinute => ViewEffect::Snapshot(SnapshotAction::LastMinute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timeframe;

    #[test]
    fn same_pair_or_timeframe_is_a_no_op() {
        let mut state = ViewState::default();
        let pair = state.selection.pair.clone();
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::Pair(pair.to_lowercase())),
            ViewEffect::None
        );
        let timeframe = state.selection.timeframe;
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::Timeframe(timeframe)),
            ViewEffect::None
        );
    }

    #[test]
    fn pair_and_timeframe_changes_update_selection() {
        let mut state = ViewState::default();
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::Pair("ETHUSDT".into())),
            ViewEffect::SelectionChanged
        );
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::Timeframe(Timeframe::H4)),
            ViewEffect::SelectionChanged
        );
        assert_eq!(state.selection, Selection::new(Timeframe::H4, "ETHUSDT"));
    }

    #[test]
    fn theme_toggles_and_snapshots_leave_selection_alone() {
        let mut state = ViewState::default();
        let before = state.selection.clone();
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::ToggleTheme),
            ViewEffect::ThemeChanged
        );
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::ShowCurrentPrice),
            ViewEffect::Snapshot(SnapshotAction::CurrentPrice)
        );
        assert_eq!(
            apply_selection_event(&mut state, SelectionEvent::ShowLastMinute),
            ViewEffect::Snapshot(SnapshotAction::LastMinute)
        );
        assert_eq!(state.selection, before);
    }

    #[test]
    fn persisted_state_survives_json() {
        let state = ViewState {
            selection: Selection::new(Timeframe::D1, "SOLUSDT"),
            theme: Theme::Light,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"1d\""));
        assert_eq!(serde_json::from_str::<ViewState>(&json).unwrap(), state);
        // Older / partial state falls back to defaults
        assert_eq!(
            serde_json::from_str::<ViewState>("{}").unwrap(),
            ViewState::default()
        );
    }
}
