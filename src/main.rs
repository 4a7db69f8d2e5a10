use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use route_host::config::{self, loader::apply_env_overrides, ConfigSource};
use route_host::lifecycle::{wait_for_signal, Shutdown};
use route_host::observability::{logging, metrics};
use route_host::HttpServer;

#[derive(Parser)]
#[command(name = "route-host")]
#[command(about = "HTTP front door dispatching paths to redirects and reverse-proxy upstreams")]
struct Args {
    /// Configuration file (JSON or TOML).
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (mut config, source) = config::load_or_default(&args.config)?;
    apply_env_overrides(&mut config)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("route-host v{} starting", env!("CARGO_PKG_VERSION"));
    if source == ConfigSource::Defaults {
        tracing::warn!(path = %args.config.display(), "Config file not found, using defaults");
    }
    if config.admin.uses_default_credentials() {
        tracing::warn!(
            "Admin panel is using the default admin/admin credential; set admin.username and admin.password"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        admin_prefix = %config.admin.prefix,
        routes_path = %config.storage.routes_path.display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        let _ = shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
