// API client module - typed access to the video download service

pub mod errors;
pub mod http;
pub mod models;
pub mod traits;
pub mod utils;

pub use errors::ClientError;
pub use http::HttpApiClient;
pub use models::{DownloadResult, Format, SupportedSite, VideoInfo};
pub use traits::VideoApi;
