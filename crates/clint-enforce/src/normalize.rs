//! Message standardization and order-preserving deduplication.

use std::collections::HashSet;

use clint_core::types::{Position, Violation};

/// Strip a trailing `(<location>, line N)` suffix, as in
/// `undefined name 'x' (unknown-location, line 4)`.
pub fn standardize_message(message: &str) -> String {
    let trimmed = message.trim_end();
    match location_suffix_start(trimmed) {
        Some(start) => trimmed[..start].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

fn location_suffix_start(message: &str) -> Option<usize> {
    let body = message.strip_suffix(')')?;
    let open = body.rfind('(')?;
    let inner = &body[open + 1..];
    let (location, line_part) = inner.rsplit_once(',')?;
    let digits = line_part.trim_start().strip_prefix("line")?.trim();
    let is_location = location == "unknown-location" || (location.starts_with('<') && location.ends_with('>'));
    if is_location && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(open)
    } else {
        None
    }
}

/// Concatenate Stage-A findings and rule-engine findings, standardize every
/// message, and drop later duplicates. Two violations are duplicates when
/// their standardized messages match and their positions are equal, with
/// "no position" only ever equal to "no position".
pub fn merge(stage_a: Vec<Violation>, rules: Vec<Violation>) -> Vec<Violation> {
    let mut seen: HashSet<(String, Option<Position>)> = HashSet::new();
    let mut merged = Vec::with_capacity(stage_a.len() + rules.len());
    for mut violation in stage_a.into_iter().chain(rules) {
        violation.message = standardize_message(&violation.message);
        if seen.insert((violation.message.clone(), violation.position)) {
            merged.push(violation);
        }
    }
    merged
}
