use clap::Parser;
use rsvpd::{Application, Config, config::Args, telemetry};
use tokio::signal;
use tracing::{info, warn};

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(e) => {
                warn!("Ctrl+C handler unavailable: {e}");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {e}");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    };
    info!("Received {received}, finishing in-flight requests");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Postgres connections with require_tls go through rustls
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let args = Args::parse();
    let config = Config::load(&args)?;

    if args.validate {
        println!(
            "Configuration in {} is valid (storage: {}).",
            args.config,
            config.database.describe()
        );
        return Ok(());
    }

    telemetry::init_telemetry(config.enable_otel_export)?;
    info!(
        config = %args.config,
        storage = %config.database.describe(),
        metrics = config.enable_metrics,
        "Starting rsvpd"
    );

    Application::new(config).await?.serve(shutdown_signal()).await
}
