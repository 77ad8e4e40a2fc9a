// ============================================================================
// Formatting helpers shared by the dashboard and the webhook digest
// ============================================================================

/// Seconds as zero-padded `HH:MM:SS`, fractional part truncated.
///
/// NaN, infinite and negative inputs render as `00:00:00`. Hours are not
/// wrapped at 24.
pub fn format_hms(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00:00".to_string();
    }
    let total = seconds.trunc() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// [`format_hms`] over raw attribute text; non-numeric text is zero.
pub fn format_hms_str(raw: &str) -> String {
    format_hms(raw.trim().parse::<f64>().unwrap_or(f64::NAN))
}

/// Seconds as `XmYs` for the webhook digest.
///
/// Rounds to whole seconds before splitting so 59.6s reads `1m0s`.
pub fn format_minutes_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0m0s".to_string();
    }
    let total = seconds.round() as u64;
    format!("{}m{}s", total / 60, total % 60)
}

/// `part / whole` as a percentage with two decimals.
///
/// A zero `whole` yields `"0.00"` instead of dividing.
pub fn percentage(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", part as f64 / whole as f64 * 100.0)
}
