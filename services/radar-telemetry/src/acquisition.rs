//! Acquisition loop: polls the reading source on two timers and owns all writes to telemetry state

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::{AcquisitionConfig, Config, SourceConfig};
use crate::reading::Reading;
use crate::source::ReadingSource;
use crate::state::{FetchOutcome, StateHandle};
use crate::synth::ReadingSynthesizer;

/// Results reported back to the loop by spawned fetch tasks
#[derive(Debug)]
enum Event {
    Fetched(FetchOutcome),
    Health(crate::Result<()>),
}

/// Drives data fetches and health checks, applying results in one place
pub struct AcquisitionLoop {
    source: Arc<dyn ReadingSource>,
    synthesizer: Box<dyn ReadingSynthesizer>,
    state: StateHandle,
    source_config: SourceConfig,
    timers: AcquisitionConfig,
    cancel: CancellationToken,
}

impl AcquisitionLoop {
    pub fn new(
        source: Arc<dyn ReadingSource>,
        synthesizer: Box<dyn ReadingSynthesizer>,
        config: &Config,
        state: StateHandle,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            synthesizer,
            state,
            source_config: config.source.clone(),
            timers: config.acquisition.clone(),
            cancel,
        }
    }

    /// Run until the cancellation token is triggered.
    ///
    /// Both timers fire immediately on start. A data tick is skipped while the
    /// previous fetch is still outstanding, and results still in flight at
    /// shutdown are dropped.
    pub async fn run(self) {
        let AcquisitionLoop {
            source,
            mut synthesizer,
            state,
            source_config,
            timers,
            cancel,
        } = self;

        let (tx, mut rx) = mpsc::channel::<Event>(16);
        let mut fetch_tasks = JoinSet::new();
        let mut health_tasks = JoinSet::new();

        let mut fetch_timer = tokio::time::interval(timers.fetch_interval());
        fetch_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut health_timer = tokio::time::interval(timers.health_check_interval());
        health_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut next_seq: u64 = 0;
        let mut fetch_in_flight = false;
        let mut health_in_flight = false;

        tracing::info!(
            "Acquisition started (fetch every {:?}, health check every {:?})",
            timers.fetch_interval(),
            timers.health_check_interval()
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Acquisition loop cancelled");
                    break;
                }
                _ = fetch_timer.tick() => {
                    if fetch_in_flight {
                        tracing::debug!("Previous fetch still in flight, skipping tick");
                        continue;
                    }
                    next_seq += 1;
                    fetch_in_flight = true;
                    let seq = next_seq;
                    let source = Arc::clone(&source);
                    let settings = source_config.clone();
                    let tx = tx.clone();
                    fetch_tasks.spawn(async move {
                        let outcome = fetch_cycle(source.as_ref(), seq, &settings).await;
                        let _ = tx.send(Event::Fetched(outcome)).await;
                    });
                }
                _ = health_timer.tick() => {
                    if health_in_flight {
                        continue;
                    }
                    health_in_flight = true;
                    let source = Arc::clone(&source);
                    let tx = tx.clone();
                    health_tasks.spawn(async move {
                        let result = source.health_check().await;
                        let _ = tx.send(Event::Health(result)).await;
                    });
                }
                Some(event) = rx.recv() => {
                    let now = current_epoch_secs();
                    let mut telemetry = state.write().await;
                    match event {
                        Event::Fetched(outcome) => {
                            fetch_in_flight = false;
                            telemetry.apply_fetch(outcome, synthesizer.as_mut(), now);
                        }
                        Event::Health(result) => {
                            health_in_flight = false;
                            telemetry.apply_health(&result);
                        }
                    }
                }
                Some(joined) = fetch_tasks.join_next(), if !fetch_tasks.is_empty() => {
                    if let Err(e) = joined {
                        tracing::warn!("Fetch task failed: {}", e);
                        fetch_in_flight = false;
                    }
                }
                Some(joined) = health_tasks.join_next(), if !health_tasks.is_empty() => {
                    if let Err(e) = joined {
                        tracing::warn!("Health check task failed: {}", e);
                        health_in_flight = false;
                    }
                }
            }
        }

        fetch_tasks.abort_all();
        health_tasks.abort_all();
        tracing::info!("Acquisition stopped");
    }
}

/// Fetch the latest reading and, when that succeeds, the trail window and full history.
///
/// Never fails: a failed latest fetch is carried in [`FetchOutcome::latest`],
/// a failed trail or history fetch leaves that part empty.
pub async fn fetch_cycle(
    source: &dyn ReadingSource,
    seq: u64,
    settings: &SourceConfig,
) -> FetchOutcome {
    let latest = source.fetch_latest().await;
    if let Err(e) = &latest {
        tracing::debug!("Fetch #{} failed: {}", seq, e);
        return FetchOutcome {
            seq,
            latest,
            recent: None,
            history: Vec::new(),
        };
    }

    let recent = match source.fetch_recent(settings.recent_count).await {
        Ok(recent) => Some(recent),
        Err(e) => {
            tracing::debug!("Fetch #{}: recent readings unavailable: {}", seq, e);
            None
        }
    };

    let history = collect_history(source, settings.history_page_size, settings.history_max_pages)
        .await
        .unwrap_or_else(|e| {
            tracing::debug!("Fetch #{}: history unavailable: {}", seq, e);
            Vec::new()
        });

    FetchOutcome {
        seq,
        latest,
        recent,
        history,
    }
}

/// Page through the full history and collect every distance.
///
/// Stops at the reported total, on an empty page, or after `max_pages`.
pub async fn collect_history(
    source: &dyn ReadingSource,
    page_size: u32,
    max_pages: u32,
) -> crate::Result<Vec<f64>> {
    let mut distances = Vec::new();
    let mut page = 1;
    loop {
        let batch = source.fetch_all(page, page_size).await?;
        let received = batch.items.len();
        distances.extend(batch.items.iter().map(Reading::distance));

        if received == 0 || distances.len() as u64 >= batch.total || page >= max_pages {
            break;
        }
        page += 1;
    }
    Ok(distances)
}

fn current_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64()
}
