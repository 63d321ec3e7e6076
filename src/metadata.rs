//! Restaurant metadata extraction.
//!
//! The top of every listing is a two-column table of label/value rows:
//!
//! ```html
//! <tr><td>Business Name:</td><td>IVAR'S SALMON HOUSE</td></tr>
//! <tr><td>Address:</td><td>401 NE NORTHLAKE WAY</td></tr>
//! <tr><td></td><td>Seattle, WA 98105</td></tr>
//! ```
//!
//! A row with an empty label continues the field above it, so a multi-line
//! address ends up as several values under one `Address` key.

use std::collections::BTreeMap;

use dom_query::Selection;

use crate::dom;
use crate::error::{Error, Result};
use crate::listing::Listing;
use crate::patterns::CELL_TRIM_CHARS;

/// Field label → values, in row order.
pub type MetadataRecord = BTreeMap<String, Vec<String>>;

/// Normalise cell text.
///
/// Trims whitespace, colons and hyphens from both ends. Missing text (a cell
/// without a single direct text) cleans to the empty string.
///
/// # Example
///
/// ```rust
/// use kc_inspections::metadata::clean;
///
/// assert_eq!(clean(Some("  :- text -: \n")), "text");
/// assert_eq!(clean(None), "");
/// ```
#[must_use]
pub fn clean(text: Option<&str>) -> String {
    text.map(|t| {
        t.trim_matches(|c: char| c.is_whitespace() || CELL_TRIM_CHARS.contains(&c))
            .to_string()
    })
    .unwrap_or_default()
}

/// Clean the direct text of a table cell.
#[must_use]
pub fn clean_cell(cell: &Selection) -> String {
    clean(dom::first_text(cell).as_deref())
}

/// A `<tr>` with exactly two direct `<td>` children.
#[must_use]
pub fn is_two_cell_row(row: &Selection) -> bool {
    dom::tag_name(row).as_deref() == Some("tr") && dom::find_children(row, "td").len() == 2
}

/// Extract the label/value metadata of one listing.
///
/// Fails when the listing has no `<tbody>` or the body has no two-cell rows;
/// the caller decides whether that skips the listing or aborts the run.
pub fn extract_metadata(listing: &Listing) -> Result<MetadataRecord> {
    let body = dom::find_descendants(&listing.block, "tbody", |_| true)
        .into_iter()
        .next()
        .ok_or_else(|| Error::MissingTableBody {
            id: listing.id.clone(),
        })?;

    let rows: Vec<(String, String)> = dom::find_children(&body, "tr")
        .iter()
        .filter(|row| is_two_cell_row(row))
        .filter_map(label_and_value)
        .collect();

    if rows.is_empty() {
        return Err(Error::NoMetadataRows {
            id: listing.id.clone(),
        });
    }

    Ok(carry_forward(rows))
}

fn label_and_value(row: &Selection) -> Option<(String, String)> {
    match dom::find_children(row, "td").as_slice() {
        [label, value] => Some((clean_cell(label), clean_cell(value))),
        _ => None,
    }
}

/// Fold cleaned `(label, value)` rows into a record.
///
/// An empty label reuses the last non-empty one. Empty labels before any
/// non-empty label accumulate under the empty-string key.
#[must_use]
pub fn carry_forward<I>(rows: I) -> MetadataRecord
where
    I: IntoIterator<Item = (String, String)>,
{
    let (_, record) = rows.into_iter().fold(
        (String::new(), MetadataRecord::new()),
        |(current, mut record), (label, value)| {
            let current = if label.is_empty() { current } else { label };
            record.entry(current.clone()).or_default().push(value);
            (current, record)
        },
    );
    record
}
