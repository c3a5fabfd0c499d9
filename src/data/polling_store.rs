//! The dashboard's single source of candle data.
//!
//! Keyed by the active [`Selection`]. Owns exactly one refresh timer and at most one
//! in-flight fetch; both belong to the selection that created them. Results that come back
//! for anything other than the current selection are dropped on the floor.

use poll_promise::Promise;
use std::sync::Arc;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::error::MarketDataError;
use crate::domain::{Selection, Series};
use crate::utils::app_time::{self, AppInstant};

pub type SeriesResult = Result<Series, MarketDataError>;

/// Where the store gets candles from. The live implementation wraps a market-data client;
/// tests hand-feed promises.
pub trait SeriesSource {
    fn fetch(&self, selection: &Selection) -> Promise<SeriesResult>;
}

/// The one active refresh timer. A new generation is issued every time the selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTimer {
    pub generation: u64,
    pub due_at: AppInstant,
}

struct InFlight {
    ticket: u64,
    selection: Selection,
    started_at: AppInstant,
    promise: Promise<SeriesResult>,
}

/// Last good series, plus where it came from.
#[derive(Debug, Clone)]
pub struct CachedSeries {
    /// Selection the candles were fetched (or set) for. May lag the active selection while
    /// a fetch for a new selection is in flight.
    pub selection: Selection,
    pub series: Arc<Series>,
    /// Bumped on every replacement; downstream views key their rebuilds on it.
    pub revision: u64,
    pub fetched_at: AppInstant,
    /// Set when the series came from `set_series` rather than a fetch.
    pub optimistic: bool,
}

/// What the view should render right now.
#[derive(Debug, Clone, Copy)]
pub enum SeriesState<'a> {
    /// Nothing to show yet.
    Pending,
    /// Last fetch failed. The last good series (if any) is still available via `cached()`.
    Error(&'a MarketDataError),
    Ready(&'a CachedSeries),
}

pub struct PollingStore<S: SeriesSource> {
    source: S,
    interval: Duration,
    selection: Option<Selection>,
    cached: Option<CachedSeries>,
    error: Option<MarketDataError>,
    in_flight: Option<InFlight>,
    timer: Option<RefreshTimer>,
    next_ticket: u64,
    timer_generation: u64,
    fetches_started: u64,
    revision: u64,
}

impl<S: SeriesSource> PollingStore<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            selection: None,
            cached: None,
            error: None,
            in_flight: None,
            timer: None,
            next_ticket: 0,
            timer_generation: 0,
            fetches_started: 0,
            revision: 0,
        }
    }

    /// Make `selection` the active one and return what should be displayed for it.
    ///
    /// A new selection cancels the previous timer and in-flight fetch, starts exactly one
    /// new timer, and kicks off a fetch. The previous series stays visible meanwhile.
    /// Calling again with the same selection only polls.
    pub fn get_series(&mut self, selection: &Selection, now: AppInstant) -> SeriesState<'_> {
        if self.selection.as_ref() != Some(selection) {
            self.switch_to(selection.clone(), now);
        }
        self.poll(now);
        self.state()
    }

    fn switch_to(&mut self, selection: Selection, now: AppInstant) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_poll_events {
            log::info!(
                "Selection {} -> {}",
                self.selection
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                selection
            );
        }

        // Dropping the promise abandons the old request; its result can never be applied.
        self.in_flight = None;
        self.error = None;
        self.selection = Some(selection);
        self.restart_timer(now);
        self.start_fetch(now);
    }

    fn restart_timer(&mut self, now: AppInstant) {
        self.timer_generation += 1;
        self.timer = Some(RefreshTimer {
            generation: self.timer_generation,
            due_at: now + self.interval,
        });
    }

    fn start_fetch(&mut self, now: AppInstant) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        self.next_ticket += 1;
        self.fetches_started += 1;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_poll_events {
            log::info!("Fetch #{} started for {}", self.next_ticket, selection);
        }

        let promise = self.source.fetch(&selection);
        self.in_flight = Some(InFlight {
            ticket: self.next_ticket,
            selection,
            started_at: now,
            promise,
        });
    }

    /// Drain a finished fetch and fire the timer if it is due. Call once per frame.
    pub fn poll(&mut self, now: AppInstant) {
        if let Some(in_flight) = self.in_flight.take() {
            let InFlight {
                ticket,
                selection,
                started_at,
                promise,
            } = in_flight;
            match promise.try_take() {
                Ok(result) => self.apply(ticket, selection, result, now),
                Err(promise) => {
                    self.in_flight = Some(InFlight {
                        ticket,
                        selection,
                        started_at,
                        promise,
                    })
                }
            }
        }

        if let Some(timer) = self.timer {
            if now >= timer.due_at {
                self.refresh(now);
            }
        }
    }

    /// `in_flight` always belongs to the active selection: `switch_to`, `set_series` and
    /// `stop` drop it, and a dropped promise never resolves here.
    fn apply(&mut self, ticket: u64, selection: Selection, result: SeriesResult, now: AppInstant) {
        debug_assert_eq!(self.selection.as_ref(), Some(&selection));

        match result {
            Ok(series) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_poll_events {
                    log::info!(
                        "Fetch #{} for {} applied ({} candles)",
                        ticket,
                        selection,
                        series.len()
                    );
                }
                self.replace(selection, series, false, now);
            }
            Err(e) => {
                log::warn!("Fetch #{} for {} failed: {}", ticket, selection, e);
                self.error = Some(e);
            }
        }
    }

    fn replace(&mut self, selection: Selection, series: Series, optimistic: bool, now: AppInstant) {
        self.revision += 1;
        self.error = None;
        self.cached = Some(CachedSeries {
            selection,
            series: Arc::new(series),
            revision: self.revision,
            fetched_at: now,
            optimistic,
        });
    }

    /// Re-fetch the active selection and reschedule the timer. Skips the fetch if one is
    /// already running, unless that one has been outstanding for longer than a whole
    /// interval, in which case it is abandoned and replaced.
    pub fn refresh(&mut self, now: AppInstant) {
        if self.selection.is_none() {
            return;
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.due_at = now + self.interval;
        }
        if let Some(in_flight) = &self.in_flight {
            let age = now.saturating_duration_since(in_flight.started_at);
            if age <= self.interval {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_poll_events {
                    log::info!("Refresh skipped: fetch #{} still in flight", in_flight.ticket);
                }
                return;
            }
            log::warn!(
                "Fetch #{} for {} hung for {:.0}s, abandoning",
                in_flight.ticket,
                in_flight.selection,
                age.as_secs_f64()
            );
            self.in_flight = None;
        }
        self.start_fetch(now);
    }

    /// Overwrite the active selection's series without touching the network.
    /// Any running fetch is abandoned so it cannot clobber the new value.
    /// With `revalidate` a fresh fetch is started straight away.
    /// Returns false if there is no active selection to write to.
    pub fn set_series(&mut self, series: Series, revalidate: bool, now: AppInstant) -> bool {
        let Some(selection) = self.selection.clone() else {
            log::warn!("set_series called with no active selection");
            return false;
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_poll_events {
            log::info!(
                "Optimistic update for {} ({} candles, revalidate={})",
                selection,
                series.len(),
                revalidate
            );
        }

        self.in_flight = None;
        self.replace(selection, series, true, now);
        if revalidate {
            self.start_fetch(now);
        }
        true
    }

    pub fn state(&self) -> SeriesState<'_> {
        if let Some(error) = &self.error {
            return SeriesState::Error(error);
        }
        match &self.cached {
            Some(cached) => SeriesState::Ready(cached),
            None => SeriesState::Pending,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn cached(&self) -> Option<&CachedSeries> {
        self.cached.as_ref()
    }

    pub fn last_error(&self) -> Option<&MarketDataError> {
        self.error.as_ref()
    }

    /// True while a fetch runs and something is already on screen.
    pub fn is_revalidating(&self) -> bool {
        self.in_flight.is_some() && self.cached.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn active_timer(&self) -> Option<RefreshTimer> {
        self.timer
    }

    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn time_until_refresh(&self, now: AppInstant) -> Option<Duration> {
        self.timer.map(|t| app_time::until(t.due_at, now))
    }

    /// Cancel the timer and abandon any fetch. The cached series is kept.
    pub fn stop(&mut self) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_poll_events {
            log::info!("Polling stopped");
        }
        self.timer = None;
        self.in_flight = None;
        self.selection = None;
    }
}
