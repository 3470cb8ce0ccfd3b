//! Line decoding and integer extraction for incoming serial text
//!
//! The device emits newline-delimited text frames like `val:-12mN` or
//! `ready`. There is no framing protocol beyond that: a line yields a
//! sample exactly when the characters left after keeping only ASCII
//! digits and `-` form a parseable integer. Everything else is dropped
//! without surfacing an error; this is best-effort telemetry.

/// Decode one raw line permissively.
///
/// Invalid UTF-8 bytes are replaced rather than rejected, and surrounding
/// whitespace (including the line terminator) is stripped.
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

/// Extract a trailing integer from noisy text.
///
/// Keeps only ASCII digits and `-`, then parses the result as an integer.
/// Returns `None` when the filtered sequence is empty or does not parse
/// (for example a stray interior minus sign, or a magnitude outside the
/// `i64` range; no real load cell produces 19-digit readings).
pub fn extract_int(s: &str) -> Option<i64> {
    let digits: String = s
        .chars()
        .filter(|c| *c == '-' || c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Clamp a value to a symmetric range around zero, if a limit is set.
pub fn clamp_symmetric(value: i64, limit: Option<i64>) -> i64 {
    match limit {
        Some(limit) => value.clamp(-limit.abs(), limit.abs()),
        None => value,
    }
}
