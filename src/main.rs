//! Endpoint registry server.
//!
//! Serves the services declared in a TOML config file (stub endpoints) plus
//! the built-in ping endpoint, or prints the compiled routing table.
//!
//! ```text
//! endpoint-registry --config config/registry.toml serve --port 8090
//! endpoint-registry --config config/registry.toml routes
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use endpoint_registry::config::{load_config, AppConfig};
use endpoint_registry::observability::{logging, metrics};
use endpoint_registry::routing::EndpointTarget;
use endpoint_registry::{HttpServer, Server, Shutdown};

#[derive(Parser)]
#[command(name = "endpoint-registry")]
#[command(about = "Declarative HTTP endpoint registry server", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the registry and serve it
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Compile the registry and print every endpoint
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Commands::Serve { port: Some(port) } = cli.command {
        config.server.port = port;
    }

    logging::init_logging(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "endpoint-registry starting"
    );

    let compiled = compile(config)?;

    match cli.command {
        Commands::Routes => print_routes(&compiled),
        Commands::Serve { .. } => serve(compiled).await?,
    }
    Ok(())
}

fn compile(config: AppConfig) -> Result<HttpServer, Box<dyn std::error::Error>> {
    let mut server = Server::new(config);
    server.register_configured()?;

    match server.compile() {
        Ok(compiled) => Ok(compiled),
        Err(e) => {
            tracing::error!(error = %e, "Endpoint registry failed to compile");
            Err(e.into())
        }
    }
}

async fn serve(compiled: HttpServer) -> Result<(), Box<dyn std::error::Error>> {
    let observability = compiled.config().observability.clone();
    if observability.metrics_enabled {
        match observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let addr = compiled.config().server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    compiled.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(compiled: &HttpServer) {
    for endpoint in compiled.registry().endpoints() {
        let target = match endpoint.target() {
            EndpointTarget::Handler(_) => format!("{}.{}", endpoint.service(), endpoint.field()),
            EndpointTarget::Stub(path) => format!("stub {}", path.display()),
        };
        println!("{:<8} {:<40} {}", endpoint.method().as_str(), endpoint.path(), target);
    }
}
