use chrono::{DateTime, Utc};

/// Compact relative label for `at` as seen from `now`.
///
/// Minutes under an hour, hours under a day, days under a week, then a
/// short date. Future timestamps read as "now".
pub fn format_time_ago(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return String::new();
    };

    let diff = (now - at).num_seconds();
    if diff < 60 {
        return "now".to_string();
    }
    if diff < 3_600 {
        return format!("{}m ago", diff / 60);
    }
    if diff < 86_400 {
        return format!("{}h ago", diff / 3_600);
    }
    if diff < 604_800 {
        return format!("{}d ago", diff / 86_400);
    }
    at.format("%b %d").to_string()
}
