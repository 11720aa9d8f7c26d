// FormatSelector - turns the server's format list into selectable options
//
// The first option is always the synthetic "Best Quality" entry. Server
// entries without a usable quality label are left out.

use crate::api::models::Format;

/// Value sent as `format_id` for the synthetic best-quality option
pub const BEST_FORMAT_ID: &str = "best";

/// Quality option for UI display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    /// Display label (e.g., "720p (MP4)")
    pub label: String,

    /// Value for selection, sent to the server as `format_id`
    pub value: String,
}

impl FormatOption {
    pub fn best() -> Self {
        Self {
            label: "Best Quality".to_string(),
            value: BEST_FORMAT_ID.to_string(),
        }
    }
}

pub struct FormatSelector;

impl FormatSelector {
    /// Build quality options from raw formats, best quality first
    pub fn build_options(formats: &[Format]) -> Vec<FormatOption> {
        let mut options = vec![FormatOption::best()];

        options.extend(
            formats
                .iter()
                .filter(|f| f.has_known_quality())
                .map(|f| FormatOption {
                    label: Self::label_for(f),
                    value: f.format_id.clone(),
                }),
        );

        options
    }

    fn label_for(format: &Format) -> String {
        let quality = format.quality.as_deref().unwrap_or_default();
        match format.ext.as_deref() {
            Some(ext) if !ext.is_empty() => format!("{}p ({})", quality, ext.to_uppercase()),
            _ => format!("{}p", quality),
        }
    }
}
