//! Step duration values such as `5`, `2:30` or `1:00:00`.

use std::time::Duration;

/// Seconds per component, most significant first.
const FACTORS: [u64; 3] = [60 * 60, 60, 1];

/// Parses a colon-separated duration.
///
/// Components are right-aligned against hours, minutes and seconds, except
/// that a single number means minutes. Components that are not numbers count
/// as zero, so the result is always usable.
pub fn parse_duration(value: &str) -> Duration {
    let mut parts: Vec<&str> = value.splitn(FACTORS.len(), ':').collect();
    if parts.len() == 1 {
        parts.push("0");
    }
    let offset = FACTORS.len() - parts.len();
    let secs = parts
        .iter()
        .enumerate()
        .filter_map(|(i, part)| {
            let n = part.trim().parse::<u64>().ok()?;
            Some(n.saturating_mul(FACTORS[offset + i]))
        })
        .fold(0u64, u64::saturating_add);
    Duration::from_secs(secs)
}

/// Rounds up to the next whole minute.
pub fn round_duration(d: Duration) -> Duration {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    Duration::from_secs(secs.div_ceil(60).saturating_mul(60))
}
