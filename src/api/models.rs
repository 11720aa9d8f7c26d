// Wire models for the video API

use serde::{Deserialize, Deserializer, Serialize};

/// Video metadata returned by `/api/video/info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub uploader: Option<String>,
    /// Length in whole seconds
    #[serde(default, deserialize_with = "de_whole_seconds")]
    pub duration: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
}

impl VideoInfo {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown title")
    }

    pub fn uploader(&self) -> &str {
        self.uploader.as_deref().unwrap_or("Unknown uploader")
    }
}

/// One selectable quality/container variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    /// Height label ("720") or "Unknown"; the backend sends heights as numbers
    #[serde(default, deserialize_with = "de_quality")]
    pub quality: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
}

impl Format {
    /// Whether the entry carries a usable quality label.
    pub fn has_known_quality(&self) -> bool {
        matches!(self.quality.as_deref(), Some(q) if !q.is_empty() && q != "Unknown")
    }
}

/// Result of `/api/video/download`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub filename: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedSite {
    pub name: String,
    pub domain: String,
    pub status: String,
}

impl SupportedSite {
    /// Sites with degraded support get highlighted in the list.
    pub fn is_limited(&self) -> bool {
        self.status.contains("Limited")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupportedSitesResponse {
    pub supported_sites: Vec<SupportedSite>,
}

#[derive(Debug, Serialize)]
pub struct InfoRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub format_id: &'a str,
}

/// Error body sent with non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(u64),
    Float(f64),
    Text(String),
}

fn de_quality<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.map(|v| match v {
        NumberOrString::Int(n) => n.to_string(),
        NumberOrString::Float(f) => format!("{}", f.trunc() as u64),
        NumberOrString::Text(s) => s,
    }))
}

fn de_whole_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        NumberOrString::Int(n) => Some(n),
        NumberOrString::Float(f) if f.is_finite() && f >= 0.0 => Some(f.floor() as u64),
        NumberOrString::Float(_) => None,
        NumberOrString::Text(s) => s.trim().parse().ok(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_from_backend_payload() {
        let body = r#"{
            "title": "Big Buck Bunny",
            "uploader": "Blender",
            "duration": 596.5,
            "view_count": 2500000,
            "thumbnail": null,
            "formats": [
                {"format_id": "137", "ext": "mp4", "quality": 1080},
                {"format_id": "x", "ext": "webm", "quality": "Unknown"}
            ]
        }"#;

        let info: VideoInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.title(), "Big Buck Bunny");
        assert_eq!(info.duration, Some(596));
        assert_eq!(info.view_count, Some(2_500_000));
        assert!(info.thumbnail.is_none());
        assert_eq!(info.formats[0].quality.as_deref(), Some("1080"));
        assert!(info.formats[0].has_known_quality());
        assert!(!info.formats[1].has_known_quality());
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let info: VideoInfo =
            serde_json::from_str(r#"{"title": null, "uploader": null}"#).unwrap();
        assert_eq!(info.title(), "Unknown title");
        assert_eq!(info.uploader(), "Unknown uploader");
        assert_eq!(info.duration, None);
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_limited_site() {
        let site = SupportedSite {
            name: "YouTube".to_string(),
            domain: "youtube.com".to_string(),
            status: "Limited (bot detection)".to_string(),
        };
        assert!(site.is_limited());
    }
}
