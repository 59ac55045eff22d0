//! Human-readable rendering of panel counters for embeds.

use chrono::DateTime;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary prefixes, e.g. `1536` as `1.5 KB`.
///
/// Values keep at most two decimals and drop trailing zeros. Negative counts are
/// treated as zero.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, UNITS[unit])
}

/// Formats a traffic quota in bytes, `0` meaning unlimited.
pub fn format_quota(total_bytes: i64) -> String {
    if total_bytes <= 0 {
        "Unlimited".to_string()
    } else {
        format_bytes(total_bytes)
    }
}

/// Formats an expiry given as unix milliseconds, `0` meaning never.
pub fn format_expiry(expiry_ms: i64) -> String {
    if expiry_ms <= 0 {
        return "No expiry".to_string();
    }

    match DateTime::from_timestamp_millis(expiry_ms) {
        Some(date) => date.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "Invalid date".to_string(),
    }
}

/// Share of the quota used, `None` for unlimited quotas.
pub fn usage_percent(used_bytes: i64, total_bytes: i64) -> Option<f64> {
    if total_bytes <= 0 {
        return None;
    }
    Some(used_bytes.max(0) as f64 / total_bytes as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bytes_with_binary_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024 * 1024), "10 GB");
        assert_eq!(format_bytes(1_288_490_189), "1.2 GB");
        assert_eq!(format_bytes(-5), "0 B");
    }

    #[test]
    fn caps_unit_at_terabytes() {
        let five_pb = 5 * 1024_i64.pow(5);

        assert_eq!(format_bytes(five_pb), "5120 TB");
    }

    #[test]
    fn formats_unlimited_quota_and_expiry() {
        assert_eq!(format_quota(0), "Unlimited");
        assert_eq!(format_quota(2048), "2 KB");
        assert_eq!(format_expiry(0), "No expiry");
        assert_eq!(format_expiry(1_700_000_000_000), "2023-11-14 22:13 UTC");
    }

    #[test]
    fn computes_usage_share() {
        assert_eq!(usage_percent(50, 200), Some(25.0));
        assert_eq!(usage_percent(50, 0), None);
    }
}
