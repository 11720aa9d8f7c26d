pub mod api;
pub mod config;
pub mod orchestrator;
pub mod saver;
pub mod shell;
pub mod ui;

#[cfg(test)]
mod test_support;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api::HttpApiClient;
use config::{Args, ClientConfig};
use orchestrator::Orchestrator;
use saver::FileSaver;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("video_downloader_lib={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn start(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_args(&args)?;
    info!("Using API {}", config.api_base);
    if let Some(proxy) = &config.proxy {
        info!("Proxy in use: {}", proxy);
    }

    let api = HttpApiClient::new(config.api_base.clone(), config.proxy.as_deref())?;
    let saver = FileSaver::new(api.http_client(), config.output_dir.clone());
    info!("Downloads go to {}", saver.output_dir().display());
    let mut flow = Orchestrator::new(api, saver);

    shell::run_shell(&mut flow, args.url).await?;
    Ok(())
}

pub fn run() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(start(args)) {
        error!("{}", e);
        std::process::exit(1);
    }
}
