//! Compact timestamp formatting for `last_updated` display.

use chrono::{DateTime, Utc};

/// Absolute timestamp as shown in the record view, e.g. "2026-08-04 18:40 UTC".
pub fn fmt_timestamp(when: DateTime<Utc>) -> String {
    when.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Compact age relative to `now`, e.g. "just now", "5m ago", "3h ago", "2d ago".
pub fn fmt_age(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - when).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86_400;

    if secs < 60 {
        "just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(secs_ago: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();
        (now - chrono::Duration::seconds(secs_ago), now)
    }

    #[test]
    fn sub_minute_is_just_now() {
        let (when, now) = at(45);
        assert_eq!(fmt_age(when, now), "just now");
    }

    #[test]
    fn minutes_hours_days() {
        let (when, now) = at(5 * 60);
        assert_eq!(fmt_age(when, now), "5m ago");

        let (when, now) = at(3 * 3600 + 120);
        assert_eq!(fmt_age(when, now), "3h ago");

        let (when, now) = at(2 * 86_400 + 3600);
        assert_eq!(fmt_age(when, now), "2d ago");
    }

    #[test]
    fn future_stamps_clamp_to_just_now() {
        let (when, now) = at(-30);
        assert_eq!(fmt_age(when, now), "just now");
    }

    #[test]
    fn absolute_format() {
        let when = Utc.with_ymd_and_hms(2026, 8, 4, 18, 40, 12).unwrap();
        assert_eq!(fmt_timestamp(when), "2026-08-04 18:40 UTC");
    }
}
