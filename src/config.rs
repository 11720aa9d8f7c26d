// Client configuration: environment first, command-line flags on top

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

use crate::api::errors::ClientError;
use crate::api::utils::parse_api_base;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

/// Terminal client for the video download service
#[derive(Parser, Debug, Default)]
#[command(name = "video-downloader")]
#[command(version)]
pub struct Args {
    /// API origin, e.g. http://127.0.0.1:8080 (env: VIDEO_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Directory downloads are saved to (env: VIDEO_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// HTTP or SOCKS5 proxy for API traffic (env: VIDEO_PROXY)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Video URL to look up right away
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: Url,
    pub output_dir: PathBuf,
    pub proxy: Option<String>,
}

impl ClientConfig {
    /// Flags win over the environment, the environment over defaults.
    pub fn from_args(args: &Args) -> Result<Self, ClientError> {
        Self::from_sources(|key| std::env::var(key).ok(), args)
    }

    fn from_sources<F>(env: F, args: &Args) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = args
            .api_base
            .clone()
            .or_else(|| env("VIDEO_API_BASE"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let output_dir = args
            .output_dir
            .clone()
            .or_else(|| env("VIDEO_OUTPUT_DIR").map(PathBuf::from))
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let proxy = args
            .proxy
            .clone()
            .or_else(|| env("VIDEO_PROXY"))
            .filter(|p| !p.trim().is_empty());

        Ok(Self {
            api_base: parse_api_base(&api_base)?,
            output_dir,
            proxy,
        })
    }
}
