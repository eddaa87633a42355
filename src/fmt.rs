//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Chart emoji for size summaries
pub const CHART: Emoji = Emoji("📊", "~");

/// Up arrow for categories that grew
pub const INCREASE: Emoji = Emoji("📈", "+");

/// Down arrow for categories that shrank
pub const DECREASE: Emoji = Emoji("📉", "-");

/// Package emoji for package headers
pub const PACKAGE: Emoji = Emoji("📦", "#");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Sizes at or above this many bytes (in magnitude) are shown in MB
pub const MB_DISPLAY_THRESHOLD: u64 = 500_000;

const KB: f64 = 1_000.0;
const MB: f64 = 1_000_000.0;

/// Format a (possibly negative) byte count with 1000-based units
///
/// # Examples
///
/// ```
/// use ipa_diff::fmt::format_size;
///
/// assert_eq!(format_size(1_500), "1.50 KB");
/// assert_eq!(format_size(499_999), "500.00 KB");
/// assert_eq!(format_size(500_000), "0.50 MB");
/// assert_eq!(format_size(-2_500_000), "-2.50 MB");
/// ```
pub fn format_size(bytes: i64) -> String {
    if bytes.unsigned_abs() >= MB_DISPLAY_THRESHOLD {
        format!("{:.2} MB", bytes as f64 / MB)
    } else {
        format!("{:.2} KB", bytes as f64 / KB)
    }
}

/// Format an unsigned byte count
pub fn format_bytes(bytes: u64) -> String {
    format_size(i64::try_from(bytes).unwrap_or(i64::MAX))
}

/// Format a size change as `+X`, `-X` or `no change`
///
/// # Examples
///
/// ```
/// use ipa_diff::fmt::format_change;
///
/// assert_eq!(format_change(2_000), "+2.00 KB");
/// assert_eq!(format_change(-600_000), "-0.60 MB");
/// assert_eq!(format_change(0), "no change");
/// ```
pub fn format_change(change: i64) -> String {
    match change.signum() {
        1 => format!("+{}", format_size(change)),
        -1 => format_size(change),
        _ => "no change".to_string(),
    }
}

/// Format a file size in a table cell; absent files (size 0) render as `-`
pub fn format_optional_size(bytes: u64) -> String {
    if bytes == 0 {
        "-".to_string()
    } else {
        format_bytes(bytes)
    }
}
