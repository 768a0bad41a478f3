use lazy_static::lazy_static;
use regex::Regex;

/// Which price phrasing a pattern recognizes. `Range` takes the second
/// (upper) amount as the ceiling and discards the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePhrase {
    Under,
    Around,
    Range,
}

/// Words that gate explicit price extraction. Without one of these a number
/// in the query is never treated as a price ("version 5.0" stays a version).
pub const BUDGET_SIGNAL_WORDS: &[&str] = &[
    "under", "below", "less than", "upto", "around", "about", "between", "max", "maximum",
];

/// Generic cheapness markers that resolve to the low tier when no tier
/// keyword and no explicit price matched.
pub const CHEAPNESS_WORDS: &[&str] = &["cheap", "budget", "under"];

/// Brand-exclusion phrasings that force the electronics category when they
/// co-occur with a computer keyword.
pub const BRAND_EXCLUSION_PHRASES: &[&str] = &["non-apple", "not apple", "excluding apple"];

/// Computer keywords for the brand-exclusion category special case.
pub const COMPUTER_KEYWORDS: &[&str] = &["laptop", "computer", "macbook"];

lazy_static! {
    /// Price patterns in priority order; first match wins. The order is
    /// semantically load-bearing: ambiguous phrasing resolves via priority,
    /// not best match.
    pub static ref PRICE_PATTERNS: Vec<(Regex, PricePhrase)> = vec![
        (
            Regex::new(r"(?:under|below|less than|upto)\s+(?:rs\.?|₹)?\s*(\d+(?:,\d+)*(?:\.\d+)?)")
                .expect("under pattern"),
            PricePhrase::Under,
        ),
        (
            Regex::new(r"(?:around|about)\s+(?:rs\.?|₹)?\s*(\d+(?:,\d+)*(?:\.\d+)?)")
                .expect("around pattern"),
            PricePhrase::Around,
        ),
        (
            Regex::new(r"between\s+(?:rs\.?|₹)?\s*(\d+(?:,\d+)*)\s+and\s+(?:rs\.?|₹)?\s*(\d+(?:,\d+)*)")
                .expect("range pattern"),
            PricePhrase::Range,
        ),
    ];

    /// Brand-exclusion phrase in catalog free text, e.g. "non-apple" or
    /// "excluding sony". The captured token is the brand to remove.
    pub static ref BRAND_EXCLUSION: Regex =
        Regex::new(r"(?:\bnon-|\bexcluding\s+)([a-z0-9]+)").expect("brand exclusion pattern");
}

/// True when the normalized query contains at least one budget-signal word.
pub fn has_budget_signal(normalized: &str) -> bool {
    BUDGET_SIGNAL_WORDS.iter().any(|w| normalized.contains(w))
}

/// Explicit price from a normalized query, or `None`. Patterns are tried in
/// declared order; a pattern whose amount fails to parse falls through to the
/// next one rather than aborting extraction.
pub fn extract_explicit_price(normalized: &str) -> Option<u64> {
    if !has_budget_signal(normalized) {
        return None;
    }

    for (pattern, phrase) in PRICE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(normalized) else {
            continue;
        };
        let group = match phrase {
            PricePhrase::Range => 2,
            _ => 1,
        };
        let Some(amount) = caps.get(group) else {
            continue;
        };
        if let Some(price) = parse_amount(amount.as_str(), normalized) {
            return Some(price);
        }
    }

    None
}

/// Brand excluded by the query, if any.
pub fn excluded_brand(normalized: &str) -> Option<String> {
    BRAND_EXCLUSION
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Numeric literal → whole currency units. Strips thousands separators,
/// parses as decimal, applies the "30k" shorthand heuristic (a literal `k`
/// anywhere in the query promotes values below 100 by a factor of 1000),
/// floors to an integer.
fn parse_amount(literal: &str, normalized_query: &str) -> Option<u64> {
    let cleaned = literal.replace(',', "");
    let mut value: f64 = cleaned.parse().ok()?;

    if normalized_query.contains('k') && value < 100.0 {
        value *= 1000.0;
    }

    Some(value.floor() as u64)
}
