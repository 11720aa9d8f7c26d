// UI module - view-model, formatting and terminal rendering

pub mod format;
pub mod format_selector;
pub mod render;
pub mod state;

pub use format_selector::{FormatOption, FormatSelector, BEST_FORMAT_ID};
pub use state::{ErrorView, InfoPanel, PlayerView, UiState};
