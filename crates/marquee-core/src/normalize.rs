//! Scalar normalization for raw source text.
//!
//! The policy is deliberately lenient: a malformed scalar degrades to
//! `None`, it never rejects the row. Note the asymmetry between [`int`]
//! and [`decimal`] — `int` strips stray characters before parsing while
//! `decimal` only attempts a direct parse. Both behaviors are kept
//! exactly as the legacy importer had them.

/// Parse a base-10 integer out of messy text.
///
/// Strips every character that is not an ASCII digit or `-` (stray
/// quotes, spaces, thousands separators), then parses what remains.
/// `None` if nothing parseable survives.
pub fn int(raw: &str) -> Option<i64> {
  let cleaned: String = raw
    .trim()
    .chars()
    .filter(|c| c.is_ascii_digit() || *c == '-')
    .collect();
  cleaned.parse().ok()
}

/// Parse a decimal number. Direct parse only — no character stripping.
pub fn decimal(raw: &str) -> Option<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  trimmed.parse().ok()
}

/// Trim text; `None` if nothing remains. No case folding, no escaping.
pub fn text(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_owned())
  }
}
