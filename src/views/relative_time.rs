use chrono::{DateTime, Utc};

/// Human "from now" text: `in 3 days`, `2 hours ago`.
pub fn from_now(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target.signed_duration_since(now);
    let future = delta.num_milliseconds() > 0;
    let phrase = humanize(delta.num_seconds().unsigned_abs());
    if future { format!("in {phrase}") } else { format!("{phrase} ago") }
}

fn humanize(secs: u64) -> String {
    let secs = secs as f64;
    let minutes = secs / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if secs < 45.0 {
        "a few seconds".to_string()
    } else if secs < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round() as u64)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours.round() as u64)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days.round() as u64)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round() as u64)
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round() as u64)
    }
}
