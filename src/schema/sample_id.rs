use regex::Regex;

/// The sequence from the original survey campaign: SARDI25001 onwards.
pub const DEFAULT_PREFIX: &str = "SARDI";
pub const DEFAULT_START: u64 = 25001;
pub const DEFAULT_WIDTH: usize = 5;

/// Next sample identifier given the existing ids in insertion order.
///
/// Only the last id matters: storage is append-only, so the last entry is
/// the most recently issued one. If the collection is empty or the last id
/// does not match the expected pattern, the configured start id is issued.
///
/// Not safe under concurrent writers: two simultaneous submissions can
/// compute the same id. The deployment is single-user-at-a-time.
pub fn next_sample_id(existing: &[String], prefix: &str, start: u64, width: usize) -> String {
    let (next, width) = existing
        .last()
        .and_then(|last| numeric_suffix(last, prefix))
        .map(|(n, w)| (n + 1, w))
        .unwrap_or((start, width));

    format!("{}{:0width$}", prefix, next, width = width)
}

/// Numeric suffix and its zero-padded width, so the issued id keeps the
/// same width as the one it follows.
fn numeric_suffix(id: &str, prefix: &str) -> Option<(u64, usize)> {
    // Prefix is configuration, so the pattern cannot be a compile-time
    // constant; a single submission compiles it once.
    let pattern = Regex::new(&format!(r"^{}(\d+)$", regex::escape(prefix))).ok()?;
    let digits = pattern.captures(id.trim())?.get(1)?.as_str();
    Some((digits.parse::<u64>().ok()?, digits.len()))
}
