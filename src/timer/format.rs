//! `mm:ss` rendering of a remaining duration

/// Format whole seconds as `mm:ss`.
///
/// Minutes are not wrapped into hours: 6000 seconds renders as `100:00`.
/// Negative input renders as `00:00`.
pub fn format_mm_ss(remaining_seconds: i64) -> String {
    let remaining = remaining_seconds.max(0);
    format!("{:02}:{:02}", remaining / 60, remaining % 60)
}
