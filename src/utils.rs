use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Endpoint for public playlist discovery, with the search term percent-encoded.
pub fn discover_endpoint(search: Option<&str>) -> String {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => format!(
            "/playlists/discover/?search={}",
            urlencoding::encode(term)
        ),
        None => "/playlists/discover/".to_string(),
    }
}

/// Formats a minute count as `45m` or `2h 05m`.
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

/// Formats a video position as `m:ss`, or `h:mm:ss` past the hour.
pub fn format_timestamp(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Parses `83`, `1:23` or `1:02:03` into seconds.
pub fn parse_timestamp(value: &str) -> Result<u32, String> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(format!("invalid timestamp '{}'", value));
    }

    let mut seconds: u32 = 0;
    for (idx, part) in parts.iter().enumerate() {
        let n: u32 = part
            .parse()
            .map_err(|_| format!("invalid timestamp '{}'", value))?;
        if idx > 0 && n >= 60 {
            return Err(format!("invalid timestamp '{}'", value));
        }
        seconds = seconds
            .checked_mul(60)
            .and_then(|s| s.checked_add(n))
            .ok_or_else(|| format!("timestamp '{}' is too large", value))?;
    }

    Ok(seconds)
}

/// Text bar for a completion percentage, e.g. `[#####-----]  50.0%`.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        clamped
    )
}

/// Shortens text to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Per-field validation messages from an error body such as
/// `{"email": ["Enter a valid email address."]}`, one line per field.
pub fn describe_field_errors(data: &Value) -> Vec<String> {
    let Some(fields) = data.as_object() else {
        return Vec::new();
    };

    fields
        .iter()
        .filter(|(field, _)| !matches!(field.as_str(), "error" | "detail"))
        .filter_map(|(field, value)| {
            let messages: Vec<&str> = match value {
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                Value::String(text) => vec![text.as_str()],
                _ => Vec::new(),
            };
            (!messages.is_empty()).then(|| format!("{}: {}", field, messages.join(" ")))
        })
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
