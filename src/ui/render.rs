// Text rendering for the terminal front end, one function per region

use std::fmt::Write;

use crate::ui::state::{ErrorView, InfoPanel, Notice, PlayerView, SiteEntry, UiState};

/// Renders every visible region, top to bottom.
pub fn render(ui: &UiState) -> String {
    let mut out = String::new();

    if ui.is_loading() {
        out.push_str(&render_loading());
    }
    if let Some(error) = ui.error() {
        out.push_str(&render_error(error));
    }
    if let Some(panel) = ui.info() {
        out.push_str(&render_info(panel));
    }
    if ui.player().visible {
        out.push_str(&render_player(ui.player()));
    }
    out.push_str(&render_notices(ui.notices()));
    if let Some(sites) = ui.sites() {
        out.push_str(&render_sites(sites));
    }

    out
}

pub fn render_loading() -> String {
    "⏳ Processing...\n".to_string()
}

pub fn render_error(error: &ErrorView) -> String {
    let mut out = String::new();
    match error {
        ErrorView::Plain(message) => {
            let _ = writeln!(out, "✖ {}", message);
        }
        ErrorView::BotDetection { message, suggestion, hints } => {
            let _ = writeln!(out, "🤖 Bot Detection Alert");
            let _ = writeln!(out, "   {}", message);
            let _ = writeln!(out, "   {}", suggestion);
            let _ = writeln!(out, "   Alternative Options:");
            for hint in hints {
                let _ = writeln!(out, "    - {}", hint);
            }
            let _ = writeln!(out, "   Type `sites` to view supported sites.");
        }
    }
    out
}

pub fn render_info(panel: &InfoPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "━━ {}", panel.title);
    let _ = writeln!(out, "   {}", panel.uploader);
    let _ = writeln!(out, "   {} · {}", panel.duration, panel.views);
    if let Some(thumb) = &panel.thumbnail {
        let _ = writeln!(out, "   Thumbnail: {}", thumb);
    }
    let _ = writeln!(out, "   Formats:");
    for (i, option) in panel.formats.iter().enumerate() {
        let marker = if i == panel.selected { '*' } else { ' ' };
        let _ = writeln!(out, "   {} [{}] {}", marker, i, option.label);
    }
    out
}

pub fn render_player(player: &PlayerView) -> String {
    match &player.source {
        Some(source) if player.playing => format!("▶ Now playing: {}\n", source),
        Some(source) => format!("⏸ Paused: {}\n", source),
        None => String::new(),
    }
}

pub fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| format!("✔ {}\n", n.message))
        .collect()
}

pub fn render_sites(sites: &[SiteEntry]) -> String {
    let mut out = String::from("━━ Supported Video Sites\n");
    for site in sites {
        let flag = if site.limited { "!" } else { " " };
        let _ = writeln!(out, " {} {:<40} {}", flag, site.label, site.status);
    }
    out.push_str("   Type `dismiss` to close.\n");
    out
}
