// Human-readable formatting for raw numeric video fields

/// `H:MM:SS` for an hour or more, `M:SS` below that, "Unknown" for absent or zero.
pub fn format_duration(seconds: Option<u64>) -> String {
    let seconds = match seconds {
        Some(s) if s > 0 => s,
        _ => return "Unknown".to_string(),
    };

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Compact view count: `2.5M views`, `1.5K views`, `999 views`.
pub fn format_views(views: Option<u64>) -> String {
    let views = match views {
        Some(v) if v > 0 => v,
        _ => return "Unknown views".to_string(),
    };

    if views >= 1_000_000 {
        format!("{:.1}M views", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K views", views as f64 / 1_000.0)
    } else {
        format!("{} views", views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(None), "Unknown");
        assert_eq!(format_duration(Some(0)), "Unknown");
        assert_eq!(format_duration(Some(5)), "0:05");
        assert_eq!(format_duration(Some(65)), "1:05");
        assert_eq!(format_duration(Some(3600)), "1:00:00");
        assert_eq!(format_duration(Some(3725)), "1:02:05");
    }

    #[test]
    fn test_views() {
        assert_eq!(format_views(None), "Unknown views");
        assert_eq!(format_views(Some(0)), "Unknown views");
        assert_eq!(format_views(Some(999)), "999 views");
        assert_eq!(format_views(Some(1000)), "1.0K views");
        assert_eq!(format_views(Some(1500)), "1.5K views");
        assert_eq!(format_views(Some(2_500_000)), "2.5M views");
    }
}
