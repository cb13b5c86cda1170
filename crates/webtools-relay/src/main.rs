//! WebTools relay binary

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webtools_core::WebToolsConfig;

#[derive(Parser, Debug)]
#[command(name = "webtools-relay", version, about = "Relay between WebTools and the agents backend")]
struct Args {
    /// Config file (defaults to $WEBTOOLS_CONFIG, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:3000
    #[arg(short, long)]
    bind: Option<String>,

    /// Agents backend base URL; overrides BACKEND_URL
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = WebToolsConfig::load(args.config.as_deref())?;
    if let Some(url) = args.backend_url {
        config = config.with_backend_url(url);
    }
    if let Some(bind) = args.bind {
        config = config.with_bind(bind);
    }
    config.validate()?;

    info!("WebTools relay v{} starting", env!("CARGO_PKG_VERSION"));
    webtools_relay::run(config).await
}
