// Flow orchestrator - sequences API calls and UI updates for each user action
//
// All workflows share one `Session`. Every response overwrites the session
// unconditionally: there is no request fencing, the last response to arrive wins.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::errors::ClientError;
use crate::api::models::{DownloadResult, VideoInfo};
use crate::api::traits::VideoApi;
use crate::api::utils::validate_video_url;
use crate::ui::format_selector::{FormatOption, FormatSelector, BEST_FORMAT_ID};
use crate::ui::state::{ErrorView, InfoPanel, UiState};

pub const DOWNLOAD_SUCCESS_MESSAGE: &str = "Video downloaded successfully!";

/// Saves or hands off a prepared file; the terminal counterpart of a
/// one-shot `<a download>` click.
#[async_trait]
pub trait DownloadTrigger: Send + Sync {
    async fn trigger(&self, href: &str, filename: &str) -> Result<(), ClientError>;
}

/// Sees the view-model each time a workflow enters its loading state, before
/// the network call is awaited.
pub type UiObserver = Box<dyn Fn(&UiState) + Send + Sync>;

/// Where a workflow ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Precondition not met, nothing happened
    Skipped,
    Success,
    Playing,
    Downloaded,
    Error,
}

/// A successful lookup together with the URL it was made for
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentVideo {
    pub source_url: String,
    pub info: VideoInfo,
}

#[derive(Debug, Default)]
pub struct Session {
    pub current: Option<CurrentVideo>,
    pub format_options: Vec<FormatOption>,
    pub selected_format: usize,
    pub current_download: Option<String>,
}

impl Session {
    /// `format_id` to send for the current selection, `best` when nothing else applies.
    pub fn selected_format_id(&self) -> &str {
        self.format_options
            .get(self.selected_format)
            .map(|o| o.value.as_str())
            .unwrap_or(BEST_FORMAT_ID)
    }

    fn clear_video(&mut self) {
        self.current = None;
        self.format_options.clear();
        self.selected_format = 0;
    }
}

pub struct Orchestrator<A: VideoApi, T: DownloadTrigger> {
    api: A,
    trigger: T,
    session: Session,
    ui: UiState,
    observer: Option<UiObserver>,
}

impl<A: VideoApi, T: DownloadTrigger> Orchestrator<A, T> {
    pub fn new(api: A, trigger: T) -> Self {
        Self {
            api,
            trigger,
            session: Session::default(),
            ui: UiState::new(),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: UiObserver) {
        self.observer = Some(observer);
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    /// Info-fetch workflow: validate, look up metadata, fill the info panel.
    pub async fn fetch_info(&mut self, input: &str) -> WorkflowState {
        if let Err(e) = validate_video_url(input) {
            debug!("[Flow] Rejected input {:?}: {}", input, e);
            self.ui.show_error(ErrorView::Plain(e.to_string()));
            return WorkflowState::Error;
        }
        let url = input.trim().to_string();

        self.ui.show_loading();
        self.ui.hide_error();
        self.ui.hide_info();
        self.ui.hide_player();
        self.session.clear_video();
        self.notify();

        info!("[Flow] Fetching info via {} for {}", self.api.name(), url);
        match self.api.fetch_info(&url).await {
            Ok(video) => {
                let options = FormatSelector::build_options(&video.formats);
                debug!(
                    "[Flow] {} formats received, {} selectable",
                    video.formats.len(),
                    options.len()
                );

                self.ui.show_info(InfoPanel::new(&video, options.clone()));
                self.session.format_options = options;
                self.session.selected_format = 0;
                self.session.current = Some(CurrentVideo {
                    source_url: url,
                    info: video,
                });
                self.ui.hide_loading();
                WorkflowState::Success
            }
            Err(e) => self.fail(e),
        }
    }

    /// Picks one of the rendered format options by position.
    pub fn select_format(&mut self, index: usize) -> WorkflowState {
        if self.session.current.is_none() {
            return WorkflowState::Skipped;
        }
        if index >= self.session.format_options.len() {
            return self.fail(ClientError::validation(format!(
                "No format #{} (choose 0-{})",
                index,
                self.session.format_options.len().saturating_sub(1)
            )));
        }

        self.session.selected_format = index;
        self.ui.select_format(index);
        WorkflowState::Success
    }

    /// Play workflow: have the server prepare the file, then stream it.
    pub async fn play(&mut self) -> WorkflowState {
        let result = match self.prepare().await {
            None => return WorkflowState::Skipped,
            Some(Ok(result)) => result,
            Some(Err(e)) => return self.fail(e),
        };

        match self.api.stream_url(&result.filename) {
            Ok(source) => {
                info!("[Flow] Playing {}", source);
                self.ui.show_player(source);
                self.ui.hide_loading();
                WorkflowState::Playing
            }
            Err(e) => self.fail(e),
        }
    }

    /// Download workflow: have the server prepare the file, then fire the trigger once.
    pub async fn download(&mut self) -> WorkflowState {
        let result = match self.prepare().await {
            None => return WorkflowState::Skipped,
            Some(Ok(result)) => result,
            Some(Err(e)) => return self.fail(e),
        };

        let href = match &result.download_url {
            Some(link) => self.api.resolve_link(link),
            None => self.api.stream_url(&result.filename),
        };
        let href = match href {
            Ok(href) => href,
            Err(e) => return self.fail(e),
        };

        match self.trigger.trigger(&href, &result.filename).await {
            Ok(()) => {
                info!("[Flow] Downloaded {} from {}", result.filename, href);
                self.ui.hide_loading();
                self.ui.flash_success(DOWNLOAD_SUCCESS_MESSAGE);
                WorkflowState::Downloaded
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn close_player(&mut self) {
        self.ui.hide_player();
    }

    /// Best effort: failures are logged and never shown.
    pub async fn show_supported_sites(&mut self) {
        match self.api.list_supported_sites().await {
            Ok(sites) => self.ui.show_sites(&sites),
            Err(e) => warn!("[Flow] Failed to load supported sites: {}", e),
        }
    }

    pub fn close_overlay(&mut self) {
        self.ui.hide_sites();
    }

    /// Shared first half of play and download. `None` when there is no current video.
    async fn prepare(&mut self) -> Option<Result<DownloadResult, ClientError>> {
        let (url, format_id) = match &self.session.current {
            Some(current) => (
                current.source_url.clone(),
                self.session.selected_format_id().to_string(),
            ),
            None => {
                debug!("[Flow] No video loaded, ignoring request");
                return None;
            }
        };

        self.ui.show_loading();
        self.ui.hide_error();
        self.notify();

        info!("[Flow] Requesting {} as format {}", url, format_id);
        let result = self.api.request_download(&url, &format_id).await;
        if let Ok(prepared) = &result {
            self.session.current_download = Some(prepared.filename.clone());
        }
        Some(result)
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.ui);
        }
    }

    fn fail(&mut self, err: ClientError) -> WorkflowState {
        match err.status() {
            Some(status) => warn!("[Flow] ✗ HTTP {}: {}", status, err),
            None => warn!("[Flow] ✗ {}", err),
        }
        if err.is_rate_limited() {
            info!("[Flow] Request flagged by bot detection, showing alternatives");
        }
        let view = match err {
            ClientError::RateLimited { message, suggestion } => {
                ErrorView::bot_detection(&message, &suggestion)
            }
            other => ErrorView::Plain(other.to_string()),
        };
        self.ui.show_error(view);
        self.ui.hide_loading();
        WorkflowState::Error
    }
}
