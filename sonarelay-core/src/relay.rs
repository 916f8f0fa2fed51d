use std::sync::Arc;

use sonarelay_model::{EpisodeEvent, PendingSeason, SeasonKey};
use tracing::{error, info};

use crate::compose::compose;
use crate::dispatch::Dispatch;
use crate::error::FlushError;
use crate::payload::build_payload;
use crate::settings::RelaySettings;
use crate::store::AggregationStore;

/// Debounce engine.
///
/// Converts the first event of a burst into exactly one deferred flush after
/// the idle window, then routes the drained burst through compose → payload
/// → dispatch. Timers are fire-and-forget: nothing cancels them, and the
/// exactly-one-flush guarantee comes from [`AggregationStore::drain`] being
/// idempotent, not from timer bookkeeping.
pub struct Relay<D> {
    settings: Arc<RelaySettings>,
    store: Arc<AggregationStore>,
    dispatcher: Arc<D>,
}

impl<D> Clone for Relay<D> {
    fn clone(&self) -> Self {
        Relay {
            settings: Arc::clone(&self.settings),
            store: Arc::clone(&self.store),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<D> std::fmt::Debug for Relay<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("settings", &self.settings)
            .field("pending_keys", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl<D: Dispatch> Relay<D> {
    pub fn new(settings: Arc<RelaySettings>, dispatcher: Arc<D>) -> Self {
        Relay {
            settings,
            store: Arc::new(AggregationStore::new()),
            dispatcher,
        }
    }

    /// The shared accumulation store. Exposed for observability and tests.
    pub fn store(&self) -> &AggregationStore {
        &self.store
    }

    /// Entry point for one decoded webhook event.
    ///
    /// Always returns immediately: the event is recorded, and if it opened a
    /// new burst, a flush task is spawned for `idle_window` from now. Events
    /// landing on an existing burst ride the already-armed timer; they never
    /// extend it.
    pub fn handle_event(&self, event: EpisodeEvent) {
        let key = event.key();
        let first = self.store.upsert(&key, &event.series_name, event.episode());

        if first {
            info!(key = %key, "starting aggregation window");
            let relay = self.clone();
            tokio::spawn(async move {
                relay.flush_after_window(key).await;
            });
        }
    }

    /// One-shot flush timer for `key`.
    ///
    /// Sleeps outside any lock. A key that was already drained by the time
    /// the timer fires shows up as `None` and the task exits quietly; a new
    /// event for that key after the drain belongs to a fresh burst with its
    /// own timer.
    async fn flush_after_window(&self, key: SeasonKey) {
        tokio::time::sleep(self.settings.idle_window).await;

        let Some(pending) = self.store.drain(&key) else {
            return;
        };

        info!(
            key = %key,
            episodes = pending.episodes.len(),
            "flushing aggregated episodes"
        );

        if let Err(err) = self.flush(&key, pending).await {
            error!(key = %key, error = %err, "flush abandoned");
        }
    }

    async fn flush(&self, key: &SeasonKey, pending: PendingSeason) -> Result<(), FlushError> {
        let text = compose(
            &self.settings.text_content,
            &self.settings.episode_format,
            &pending.series_name,
            key.season,
            pending.episodes,
        )?;

        let body = build_payload(
            &self.settings.additional_params,
            &self.settings.text_key,
            &key.series,
            &text,
        )?;

        self.dispatcher.deliver(body).await?;
        Ok(())
    }
}
