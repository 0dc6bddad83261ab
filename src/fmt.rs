//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Checkmark emoji for success messages
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure messages
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Chart emoji for report headers
pub const CHART: Emoji = Emoji("📊", "~");

/// Package emoji for the breakdown table title
pub const PACKAGE: Emoji = Emoji("📦", "*");

/// Format a byte count as a megabyte string with one decimal place
///
/// All report columns use this rounding; exact byte values are kept
/// separately so totals never accumulate rounding error.
///
/// # Examples
///
/// ```
/// use apksize::fmt::format_mb;
///
/// assert_eq!(format_mb(0), "0.0 MB");
/// assert_eq!(format_mb(1_048_576), "1.0 MB");
/// assert_eq!(format_mb(2_621_440), "2.5 MB");
/// ```
pub fn format_mb(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.1} MB", bytes as f64 / MB)
}

/// Parse a `"X.Y MB"` display string back to a float megabyte value
///
/// Malformed input yields `0.0` rather than an error; the report pipeline
/// never depends on re-parsed display values, this exists for consumers
/// that read the rendered tables back.
///
/// # Examples
///
/// ```
/// use apksize::fmt::parse_mb;
///
/// assert_eq!(parse_mb("3.5 MB"), 3.5);
/// assert_eq!(parse_mb("garbage"), 0.0);
/// ```
pub fn parse_mb(s: &str) -> f64 {
    s.split_whitespace()
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}
