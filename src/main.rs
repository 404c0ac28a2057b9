//! WiFi Scanner - Main Entry Point

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wifi_scan_coordinator::{
    ScanCoordinator, ScanExecutor, ScanOutcome, ScanState,
    backend::{MockScanBackend, ScanBackend, WifiCtrlBackend},
    config::{CliArgs, OutputFormat, Settings},
    indicator::BlinkingIndicator,
    report,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wifi_scan_coordinator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();
    info!(?args, "Starting WiFi scanner");
    let settings = Settings::from(args);

    print!("{}", report::banner());

    if settings.simulate {
        info!("Using simulated radio");
        run(Arc::new(MockScanBackend::with_sample_networks().await), settings).await
    } else {
        let backend = WifiCtrlBackend::new(settings.interface.clone()).await?;
        info!("WiFi backend initialized for interface: {}", settings.interface);
        run(Arc::new(backend), settings).await
    }
}

async fn run<B: ScanBackend>(
    backend: Arc<B>,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let executor = ScanExecutor::new(backend, BlinkingIndicator::new())
        .with_options(settings.scan_options.clone())
        .with_blink_interval(settings.blink_interval);
    let mut coordinator = ScanCoordinator::new(executor);

    if let Err(e) = coordinator.start_worker() {
        error!("Failed to start scan worker: {}", e);
        return Err(e.into());
    }

    println!("Scanning every {} seconds...", settings.scan_interval.as_secs());

    let mut outcome = ScanOutcome::new();
    loop {
        if coordinator.state() == ScanState::Idle {
            println!("--- Starting scan ---");
            if coordinator
                .request_scan(&mut outcome, settings.scan_timeout)
                .await
            {
                print_outcome(&outcome, settings.format)?;
            } else {
                println!("Scan timeout!\n");
            }
        } else {
            warn!("Previous scan still running, skipping this round");
        }

        if settings.once {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(settings.scan_interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                break;
            }
            res = shutdown_signal() => {
                res?;
                info!("Received SIGTERM, shutting down gracefully");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn print_outcome(outcome: &ScanOutcome, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", report::render_table(outcome)),
        OutputFormat::Json => println!("{}", report::render_json(outcome)?),
    }
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;

    sigterm.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    // On non-Unix platforms, just wait forever
    std::future::pending::<()>().await;
    Ok(())
}
