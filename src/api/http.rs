// reqwest-backed implementation of VideoApi

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::errors::{
    ClientError, DEFAULT_RATE_LIMIT_MESSAGE, DEFAULT_RATE_LIMIT_SUGGESTION, INVALID_RESPONSE,
};
use super::models::{
    DownloadRequest, DownloadResult, ErrorBody, InfoRequest, SupportedSite,
    SupportedSitesResponse, VideoInfo,
};
use super::traits::VideoApi;
use super::utils::{api_url, resolve_against};

const INFO_FALLBACK: &str = "Failed to get video information";
const DOWNLOAD_FALLBACK: &str = "Failed to download video";
const SITES_FALLBACK: &str = "Failed to load supported sites";

pub struct HttpApiClient {
    client: Client,
    base: Url,
}

impl HttpApiClient {
    /// Builds a client for `base`, optionally routed through an HTTP/SOCKS5 proxy.
    pub fn new(base: Url, proxy: Option<&str>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ClientError::validation(format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build()?;
        Ok(Self { client, base })
    }

    /// Shared connection pool, reused by the file saver.
    pub fn http_client(&self) -> Client {
        self.client.clone()
    }

    fn endpoint(&self, name: &str) -> Result<Url, ClientError> {
        api_url(&self.base, &["api", "video", name])
    }
}

#[async_trait]
impl VideoApi for HttpApiClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, ClientError> {
        let endpoint = self.endpoint("info")?;
        debug!("[Api] POST {} url={}", endpoint, url);

        let response = self
            .client
            .post(endpoint)
            .json(&InfoRequest { url })
            .send()
            .await?;
        read_classified(response, INFO_FALLBACK).await
    }

    async fn request_download(
        &self,
        url: &str,
        format_id: &str,
    ) -> Result<DownloadResult, ClientError> {
        let endpoint = self.endpoint("download")?;
        debug!("[Api] POST {} url={} format_id={}", endpoint, url, format_id);

        let response = self
            .client
            .post(endpoint)
            .json(&DownloadRequest { url, format_id })
            .send()
            .await?;
        read_classified(response, DOWNLOAD_FALLBACK).await
    }

    async fn list_supported_sites(&self) -> Result<Vec<SupportedSite>, ClientError> {
        let endpoint = self.endpoint("supported-sites")?;
        debug!("[Api] GET {}", endpoint);

        let response = self.client.get(endpoint).send().await?;
        let body: SupportedSitesResponse = read_classified(response, SITES_FALLBACK).await?;
        Ok(body.supported_sites)
    }

    fn stream_url(&self, filename: &str) -> Result<String, ClientError> {
        Ok(api_url(&self.base, &["api", "video", "stream", filename])?.to_string())
    }

    fn resolve_link(&self, link: &str) -> Result<String, ClientError> {
        Ok(resolve_against(&self.base, link)?.to_string())
    }
}

/// Reads the body once and hands the bytes to `classify_response`.
async fn read_classified<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    classify_response(status, &body, fallback)
}

/// Turns a status code and a fully read body into a typed result.
///
/// The body is parsed as JSON before the status is looked at, so an HTML
/// error page from a proxy is reported as a protocol failure rather than
/// an API error.
pub fn classify_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    fallback: &str,
) -> Result<T, ClientError> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "[Api] Non-JSON response ({}): {} ({})",
                status,
                String::from_utf8_lossy(&body[..body.len().min(200)]),
                e
            );
            return Err(ClientError::Protocol(INVALID_RESPONSE.to_string()));
        }
    };

    if status.is_client_error() || status.is_server_error() {
        let err_body: ErrorBody = serde_json::from_value(value).unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited {
                message: err_body
                    .error
                    .unwrap_or_else(|| DEFAULT_RATE_LIMIT_MESSAGE.to_string()),
                suggestion: err_body
                    .suggestion
                    .unwrap_or_else(|| DEFAULT_RATE_LIMIT_SUGGESTION.to_string()),
            });
        }

        return Err(ClientError::Api {
            status: status.as_u16(),
            message: err_body.error.unwrap_or_else(|| fallback.to_string()),
        });
    }

    serde_json::from_value(value).map_err(|e| {
        warn!("[Api] Unexpected response shape: {}", e);
        ClientError::Protocol(INVALID_RESPONSE.to_string())
    })
}
