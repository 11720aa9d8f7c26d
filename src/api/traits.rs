// Client trait for the remote video API

use async_trait::async_trait;

use super::errors::ClientError;
use super::models::{DownloadResult, SupportedSite, VideoInfo};

/// The remote operations the workflows depend on
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Name of the implementation (for logging)
    fn name(&self) -> &'static str;

    /// POST `/api/video/info`
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, ClientError>;

    /// POST `/api/video/download`, the server prepares the file and names it
    async fn request_download(
        &self,
        url: &str,
        format_id: &str,
    ) -> Result<DownloadResult, ClientError>;

    /// GET `/api/video/supported-sites`
    async fn list_supported_sites(&self) -> Result<Vec<SupportedSite>, ClientError>;

    /// Absolute URL of `/api/video/stream/{filename}`
    fn stream_url(&self, filename: &str) -> Result<String, ClientError>;

    /// Resolves a server-supplied link (often relative) against the API origin
    fn resolve_link(&self, link: &str) -> Result<String, ClientError>;
}
