//! Radar telemetry - acquisition and derivation engine for a half-plane sweep sensor
//!
//! Polls a reading source, falls back to simulated readings while it is
//! unreachable, filters repeats, keeps rolling statistics and serves the live
//! picture as JSON.

pub mod acquisition;
pub mod change;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http_source;
pub mod io;
pub mod mapper;
pub mod reading;
pub mod source;
pub mod state;
pub mod stats;
pub mod synth;
pub mod threat;

pub use config::{load_config, Config};
pub use error::{Result, TelemetryError};
pub use mapper::{CoordinateMapper, Position};
pub use reading::{ConnectionState, Reading};
pub use threat::{classify, ThreatAssessment, ThreatTier};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::acquisition::AcquisitionLoop;
use crate::http_source::HttpReadingSource;
use crate::io::ReqwestHttpClient;
use crate::source::ReadingSource;
use crate::synth::RandomSynthesizer;

/// Run the radar telemetry service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        config.source.request_timeout(),
    )?);
    let source: Arc<dyn ReadingSource> = Arc::new(HttpReadingSource::new(&config.source, http));
    let cancel = CancellationToken::new();

    let state = state::new_state_handle(config.change_detection.clone());
    let mapper = CoordinateMapper::new(config.display.distance_scale);

    let acquisition = AcquisitionLoop::new(
        source,
        Box::new(RandomSynthesizer::new()),
        &config,
        Arc::clone(&state),
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    if config.dashboard.enabled {
        let dashboard_port = config.dashboard.port;
        let dashboard_state = Arc::clone(&state);
        let cancel_for_dashboard = cancel.clone();

        tokio::spawn(async move {
            if let Err(e) =
                serve_dashboard(dashboard_state, mapper, dashboard_port, cancel_for_dashboard).await
            {
                tracing::error!("{}. Continuing without dashboard.", e);
            }
        });
    }

    // Runs until cancelled
    acquisition.run().await;

    tracing::info!("Radar telemetry stopped");
    Ok(())
}

async fn serve_dashboard(
    state: state::StateHandle,
    mapper: CoordinateMapper,
    port: u16,
    cancel: CancellationToken,
) -> Result<()> {
    let router = dashboard::build_router(state, mapper);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TelemetryError::Dashboard(format!("Failed to bind port {}: {}", port, e)))?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(|e| TelemetryError::Dashboard(e.to_string()))?;

    tracing::debug!("Dashboard stopped");
    Ok(())
}
