// Main entry point - Dependency injection and task startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;

use crate::application::connection_indicator::ConnectionStatus;
use crate::application::display_service::DisplayService;
use crate::application::event_log::EventLog;
use crate::application::sample_feed::{SampleFeed, SampleReader};
use crate::application::sample_provider::SampleProvider;
use crate::application::status_board::StatusBoard;
use crate::application::transport::Listener;
use crate::infrastructure::config::{load_board_config, RunMode, ServerSettings};
use crate::infrastructure::demo_samples::ReferenceSamples;
use crate::infrastructure::logging::init_tracing;
use crate::infrastructure::sample_file::TomlSampleFile;
use crate::infrastructure::tcp_transport::TcpTransport;
use crate::infrastructure::terminal::CrosstermScreen;
use crate::presentation::command_server::{bind_with_retry, CommandServer};
use crate::presentation::demo_report::render_report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_board_config().context("Failed to load board configuration")?;

    // Initialize tracing
    init_tracing(&config.logging)?;

    // Load the sample set (fixture data, not the core)
    let provider: Arc<dyn SampleProvider> = match &config.samples.path {
        Some(path) => Arc::new(TomlSampleFile::new(path)),
        None => Arc::new(ReferenceSamples),
    };
    let sample_set = provider
        .load_sample_set()
        .await
        .with_context(|| format!("Failed to load samples from {}", provider.describe()))?;
    tracing::info!(
        "Loaded {} snapshots of {} subjects from {}",
        sample_set.len(),
        sample_set.subject_ids().len(),
        provider.describe()
    );

    if config.mode == RunMode::Demo {
        print!("{}", render_report(&sample_set, &config.thresholds));
        return Ok(());
    }

    // Shared state: the feed is the single writer, readers poll it
    let (feed, reader) = SampleFeed::new(sample_set, config.display.ticks_per_sample);
    let board = StatusBoard::new(config.thresholds.clone(), feed.subject_ids());
    let (events, event_rx) = EventLog::channel();
    let status = ConnectionStatus::new();

    if config.server.enabled {
        tokio::spawn(run_command_server(
            config.server.clone(),
            reader,
            events.clone(),
            status.clone(),
        ));
    } else {
        tracing::info!("Command server disabled by configuration");
    }

    // The render task owns the terminal; it is restored when the screen drops
    let screen = CrosstermScreen::new().context("Failed to initialize terminal")?;
    let display = DisplayService::new(
        screen,
        board,
        feed,
        status,
        event_rx,
        config.display.tick_interval(),
        config.display.indicator_period_ticks,
    );
    let screen = display
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
    drop(screen);

    tracing::info!("Awareness board stopped");
    Ok(())
}

async fn run_command_server(
    settings: ServerSettings,
    reader: SampleReader,
    events: EventLog,
    status: ConnectionStatus,
) {
    let addr = settings.bind_addr();
    let bind_addr = addr.clone();
    let listener = bind_with_retry(
        move || {
            let addr = bind_addr.clone();
            async move { TcpTransport::bind(&addr).await }
        },
        &addr,
        settings.bind_retry_delay(),
        &events,
        &status,
    )
    .await;

    // The board keeps running without a server
    let Some(listener) = listener else {
        return;
    };
    tracing::info!("Command server bound to {}", listener.local_addr());

    let outcome = CommandServer::new(listener, reader, events, status).serve().await;
    tracing::info!("Command server on {} finished: {:?}", addr, outcome);
}
