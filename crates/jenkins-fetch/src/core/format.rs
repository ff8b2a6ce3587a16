use std::time::Duration;

use indicatif::HumanCount;

/// Two fraction digits with `,` thousands grouping, e.g. `1,234.50`.
///
/// Negative and non-finite values render as `0.00`.
pub fn format_decimal(value: f64) -> String {
    let value = if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    };
    let hundredths = (value * 100.0).round() as u64;
    format!("{}.{:02}", HumanCount(hundredths / 100), hundredths % 100)
}

/// Average throughput in KB/s (1 KB = 1000 bytes); zero when no time has passed.
pub fn kilobytes_per_second(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        bytes as f64 / 1000.0 / secs
    } else {
        0.0
    }
}
