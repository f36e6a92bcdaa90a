//! Price gateway.
//!
//! Accepts price lookups from the browser front end and forwards them to the
//! price-lookup service.
//!
//! ```text
//!     Client                    ┌──────────────── GATEWAY ────────────────┐
//!     POST /getbestprice  ─────▶│ request id → validate → downstream client│─────▶ POST /bestprice
//!                               │                                          │       (price service)
//!     JSON / {"error"}    ◀─────│ passthrough or normalized error          │◀─────
//!                               └──────────────────────────────────────────┘
//!     GET /        → static index page
//!     GET /health  → {"status", "port"}
//! ```

use clap::Parser;
use std::path::PathBuf;

use price_gateway::config::{loader, ConfigOverrides};
use price_gateway::lifecycle::startup;
use price_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "price-gateway")]
#[command(about = "Forwards price lookups to the price-lookup service", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:3000.
    #[arg(long, env = "GATEWAY_BIND_ADDRESS")]
    bind: Option<String>,

    /// Base URL of the price-lookup service, e.g. http://localhost:5000.
    #[arg(long, env = "GATEWAY_DOWNSTREAM_URL")]
    downstream_url: Option<String>,

    /// Path on the price-lookup service, e.g. /bestprice.
    #[arg(long, env = "GATEWAY_DOWNSTREAM_PATH")]
    downstream_path: Option<String>,

    /// HTML file served at `/`.
    #[arg(long, env = "GATEWAY_STATIC_INDEX")]
    static_index: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "GATEWAY_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind.clone(),
            downstream_url: self.downstream_url.clone(),
            downstream_path: self.downstream_path.clone(),
            static_index: self.static_index.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = loader::resolve_config(cli.config.as_deref(), &cli.overrides())?;

    logging::init(&config.observability.log_level);
    tracing::info!("price-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
