// URL and filename helpers shared by the client and the saver

use regex::Regex;
use reqwest::Url;

use super::errors::ClientError;

const MAX_FILENAME_CHARS: usize = 120;

lazy_static::lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

/// Checks user input the way the info workflow requires: non-empty and an
/// absolute URL with a host.
pub fn validate_video_url(input: &str) -> Result<Url, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation("Please enter a video URL"));
    }

    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => Ok(url),
        _ => Err(ClientError::validation("Please enter a valid URL")),
    }
}

/// Parses the configured API origin.
pub fn parse_api_base(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::validation(format!("Invalid API base {}: {}", raw, e)))?;
    if !url.has_host() || url.cannot_be_a_base() {
        return Err(ClientError::validation(format!(
            "Invalid API base {}: expected http(s)://host[:port]",
            raw
        )));
    }
    Ok(url)
}

/// Joins `segments` onto `base`, each pushed as one percent-encoded path segment.
pub fn api_url(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ClientError::validation(format!("Invalid API base: {}", base)))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Resolves a possibly relative link against the API origin.
pub fn resolve_against(base: &Url, link: &str) -> Result<Url, ClientError> {
    base.join(link)
        .map_err(|e| ClientError::Protocol(format!("Invalid download link {}: {}", link, e)))
}

/// Server-assigned names end up on the local filesystem; keep them to a
/// single harmless path component.
pub fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(last, "_");
    let cleaned = cleaned.trim_matches('.');

    if cleaned.is_empty() {
        return "video.mp4".to_string();
    }
    if cleaned.chars().count() <= MAX_FILENAME_CHARS {
        return cleaned.to_string();
    }

    // Shorten the stem, never the extension.
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.chars().count() <= 10 => {
            let keep = MAX_FILENAME_CHARS - ext.chars().count() - 1;
            let stem: String = stem.chars().take(keep).collect();
            format!("{}.{}", stem, ext)
        }
        _ => cleaned.chars().take(MAX_FILENAME_CHARS).collect(),
    }
}
