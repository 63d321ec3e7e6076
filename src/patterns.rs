//! Compiled regex patterns and fixed field names.
//!
//! Patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Listing Detection
// =============================================================================

/// Matches the provider-record identifier carried by each listing `<div>`:
/// `PR`, one or more digits, then a tilde (e.g. `PR0001234~`).
///
/// Unanchored: the id only needs to contain the pattern.
pub static LISTING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PR\d+~").expect("LISTING_ID regex"));

/// Tag name of the listing containers.
pub const LISTING_TAG: &str = "div";

// =============================================================================
// Charset Sniffing
// =============================================================================

/// Matches `<meta charset="...">`.
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("META_CHARSET regex")
});

/// Matches `<meta http-equiv="Content-Type" content="...; charset=...">`.
pub static META_CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("META_CONTENT_TYPE_CHARSET regex")
});

// =============================================================================
// Cell Cleaning
// =============================================================================

/// Characters trimmed from both ends of a cell, in addition to whitespace.
pub const CELL_TRIM_CHARS: &[char] = &[':', '-'];

// =============================================================================
// Record Field Names
// =============================================================================

/// Metadata label holding the (possibly multi-line) street address.
pub const ADDRESS: &str = "Address";

/// Metadata label holding the restaurant name.
pub const BUSINESS_NAME: &str = "Business Name";

/// Score summary key: mean of the parsed inspection scores.
pub const AVERAGE_SCORE: &str = "Average Score";

/// Score summary key: highest parsed inspection score.
pub const HIGH_SCORE: &str = "High Score";

/// Score summary key: number of inspections with a parsable score.
pub const TOTAL_INSPECTIONS: &str = "Total Inspections";

/// Marker word identifying inspection-history rows.
pub const INSPECTION_WORD: &str = "inspection";
