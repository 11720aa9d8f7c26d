// FileSaver - writes a prepared video from the stream endpoint to disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::api::errors::ClientError;
use crate::api::http::classify_response;
use crate::api::utils::sanitize_filename;
use crate::orchestrator::DownloadTrigger;

const SAVE_FALLBACK: &str = "Failed to download video";

pub struct FileSaver {
    client: Client,
    output_dir: PathBuf,
}

impl FileSaver {
    pub fn new(client: Client, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Local path a server-assigned filename is saved under.
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(sanitize_filename(filename))
    }
}

/// `<name>.part` next to the final file; renamed into place once complete.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

async fn write_body(response: &mut reqwest::Response, part: &Path) -> Result<u64, ClientError> {
    let mut file = tokio::fs::File::create(part).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

#[async_trait]
impl DownloadTrigger for FileSaver {
    async fn trigger(&self, href: &str, filename: &str) -> Result<(), ClientError> {
        let mut response = self.client.get(href).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return match classify_response::<serde_json::Value>(status, &body, SAVE_FALLBACK) {
                Err(e) => Err(e),
                Ok(_) => Err(ClientError::Api {
                    status: status.as_u16(),
                    message: SAVE_FALLBACK.to_string(),
                }),
            };
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.target_path(filename);
        let part = partial_path(&path);
        debug!("[Saver] Writing {} to {}", href, part.display());

        let written = match write_body(&mut response, &part).await {
            Ok(n) => n,
            Err(e) => {
                warn!("[Saver] ✗ Transfer of {} failed: {}", href, e);
                let _ = tokio::fs::remove_file(&part).await;
                return Err(e);
            }
        };
        if let Err(e) = tokio::fs::rename(&part, &path).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e.into());
        }

        info!("[Saver] ✓ Saved {} ({} bytes)", path.display(), written);
        Ok(())
    }
}
