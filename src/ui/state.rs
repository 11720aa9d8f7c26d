// UI state controller - the view-model every workflow writes into
//
// Each region (loading, error, info, player) has idempotent show/hide
// operations. Rendering is done separately in `ui::render`.

use std::time::{Duration, Instant};

use crate::api::models::{SupportedSite, VideoInfo};
use crate::ui::format::{format_duration, format_views};
use crate::ui::format_selector::FormatOption;

/// How long a success notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Static hints shown with a bot-detection error
pub const ALTERNATIVE_HINTS: [&str; 3] = [
    "Try videos from Vimeo, Dailymotion, or TikTok",
    "Wait a few minutes and try again",
    "Try a different YouTube video",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorView {
    Plain(String),
    /// Rich view for rate-limited responses
    BotDetection {
        message: String,
        suggestion: String,
        hints: Vec<String>,
    },
}

impl ErrorView {
    pub fn bot_detection(message: &str, suggestion: &str) -> Self {
        Self::BotDetection {
            message: message.to_string(),
            suggestion: suggestion.to_string(),
            hints: ALTERNATIVE_HINTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

/// Everything the info panel displays, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    pub title: String,
    pub uploader: String,
    pub duration: String,
    pub views: String,
    pub thumbnail: Option<String>,
    pub formats: Vec<FormatOption>,
    pub selected: usize,
}

impl InfoPanel {
    pub fn new(info: &VideoInfo, formats: Vec<FormatOption>) -> Self {
        Self {
            title: info.title().to_string(),
            uploader: format!("By: {}", info.uploader()),
            duration: format_duration(info.duration),
            views: format_views(info.view_count),
            thumbnail: info.thumbnail.clone(),
            formats,
            selected: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerView {
    pub visible: bool,
    pub source: Option<String>,
    pub playing: bool,
    /// Set when the player was just revealed and should be brought into view
    pub scroll_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    pub label: String,
    pub status: String,
    pub limited: bool,
}

impl From<&SupportedSite> for SiteEntry {
    fn from(site: &SupportedSite) -> Self {
        Self {
            label: format!("{} ({})", site.name, site.domain),
            status: site.status.clone(),
            limited: site.is_limited(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    loading: bool,
    error: Option<ErrorView>,
    info: Option<InfoPanel>,
    player: PlayerView,
    notices: Vec<Notice>,
    sites_overlay: Option<Vec<SiteEntry>>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    pub fn hide_loading(&mut self) {
        self.loading = false;
    }

    pub fn show_error(&mut self, view: ErrorView) {
        self.error = Some(view);
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    pub fn show_info(&mut self, panel: InfoPanel) {
        self.info = Some(panel);
    }

    pub fn hide_info(&mut self) {
        self.info = None;
    }

    /// Marks option `index` as selected in the visible panel.
    pub fn select_format(&mut self, index: usize) {
        if let Some(panel) = self.info.as_mut() {
            panel.selected = index;
        }
    }

    /// Binds `source`, starts playback and asks for the player to be scrolled into view.
    pub fn show_player(&mut self, source: String) {
        self.player = PlayerView {
            visible: true,
            source: Some(source),
            playing: true,
            scroll_requested: true,
        };
    }

    /// Hides the player and always stops playback and clears the source.
    pub fn hide_player(&mut self) {
        self.player = PlayerView::default();
    }

    /// Called by the front end once it has brought the player into view.
    pub fn acknowledge_scroll(&mut self) {
        self.player.scroll_requested = false;
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash_success_at(message, Instant::now());
    }

    pub fn flash_success_at(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.push(Notice {
            message: message.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Removes notices whose time is up.
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.retain(|n| n.expires_at > now);
    }

    pub fn show_sites(&mut self, sites: &[SupportedSite]) {
        self.sites_overlay = Some(sites.iter().map(SiteEntry::from).collect());
    }

    pub fn hide_sites(&mut self) {
        self.sites_overlay = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorView> {
        self.error.as_ref()
    }

    pub fn info(&self) -> Option<&InfoPanel> {
        self.info.as_ref()
    }

    pub fn player(&self) -> &PlayerView {
        &self.player
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn sites(&self) -> Option<&[SiteEntry]> {
        self.sites_overlay.as_deref()
    }
}
