//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep noisy ones `false` by default so
//! debug builds stay readable. All of them are further gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit UI interaction logs (pair / timeframe switching, theme toggles, quick actions).
    pub print_ui_interactions: bool,
    /// Emit polling store events (fetch started, result applied, stale result dropped, timer restarts).
    pub print_poll_events: bool,
    /// Emit chart construction / destruction logs.
    pub print_chart_lifecycle: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_poll_events: true,
    print_chart_lifecycle: false,
    print_state_serde: false,
    print_shutdown: false,
};
