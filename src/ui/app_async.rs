use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{SnapshotAction, fetch_snapshot_series, spawn_promise};
use crate::data::{MarketDataClient, SharedClient};
use crate::ui::app::{AppError, CandleScopeApp, PendingSnapshot};
use crate::utils::app_time::now;

impl CandleScopeApp {
    pub(super) fn start_pairs_fetch(&mut self, client: SharedClient) {
        self.pairs_promise = Some(spawn_promise(async move {
            client.list_supported_pairs().await
        }));
    }

    pub(super) fn poll_pairs(&mut self) {
        let Some(promise) = self.pairs_promise.take() else {
            return;
        };
        match promise.try_take() {
            Ok(Ok(pairs)) if !pairs.is_empty() => {
                log::info!("Pair catalog ready: {} pairs", pairs.len());
                self.pairs = pairs;
            }
            Ok(Ok(_)) => log::warn!("Pair catalog came back empty; keeping launch list"),
            Ok(Err(e)) => {
                log::warn!("Failed to load pair catalog: {}", e);
                self.last_error = Some(AppError::PairsUnavailable(e));
            }
            Err(promise) => self.pairs_promise = Some(promise),
        }
    }

    /// Start a one-candle snapshot for the current pair. Ignored while another is running.
    pub(super) fn start_snapshot(&mut self, action: SnapshotAction) {
        if self.snapshot.is_some() {
            return;
        }
        let Some(client) = self.client.as_ref().map(Arc::clone) else {
            log::warn!("Snapshot requested with no market data client");
            return;
        };

        let selection = self.view.selection.clone();
        let pair = selection.pair.clone();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Snapshot {:?} requested for {}", action, selection);
        }

        let promise = spawn_promise(fetch_snapshot_series(client, action, pair));
        self.snapshot = Some(PendingSnapshot { selection, promise });
    }

    pub(super) fn poll_snapshot(&mut self) {
        let Some(PendingSnapshot { selection, promise }) = self.snapshot.take() else {
            return;
        };
        let result = match promise.try_take() {
            Ok(result) => result,
            Err(promise) => {
                self.snapshot = Some(PendingSnapshot { selection, promise });
                return;
            }
        };

        if selection != self.view.selection {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_poll_events {
                log::info!("Snapshot for {} arrived after selection changed, discarded", selection);
            }
            return;
        }

        match result {
            Ok(series) => {
                if let Some(store) = self.store.as_mut() {
                    store.set_series(series, false, now());
                }
            }
            Err(e) => {
                // Previous series stays on screen untouched.
                log::warn!("Snapshot for {} failed: {}", selection, e);
                self.last_error = Some(AppError::SnapshotFailed(e));
            }
        }
    }

    /// Feed the active selection to the store; starts fetches and fires the refresh timer.
    pub(super) fn poll_store(&mut self) {
        if let Some(store) = self.store.as_mut() {
            store.get_series(&self.view.selection, now());
        }
    }
}
