//! Restaurant records.
//!
//! A record is the flat merge of a listing's metadata with its score summary.
//! Records are produced lazily by [`assemble`], one listing at a time.

use std::collections::BTreeMap;

use dom_query::Document;
use serde::Serialize;

use crate::error::Result;
use crate::listing::{self, Listing};
use crate::metadata::{self, MetadataRecord};
use crate::patterns::{AVERAGE_SCORE, HIGH_SCORE, TOTAL_INSPECTIONS};
use crate::scoring::{self, ScoreSummary};

/// Value of one record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Metadata values, one per table row.
    Text(Vec<String>),
    /// Fractional score data.
    Float(f64),
    /// Whole-number score data.
    Integer(i64),
}

impl FieldValue {
    /// Flatten to a single JSON value; text values become one space-joined string.
    #[must_use]
    pub fn flatten(&self) -> serde_json::Value {
        match self {
            Self::Text(values) => serde_json::Value::String(values.join(" ")),
            Self::Float(value) => serde_json::Value::from(*value),
            Self::Integer(value) => serde_json::Value::from(*value),
        }
    }
}

/// One restaurant's metadata and score summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestaurantRecord {
    /// Identifier of the listing block the record came from.
    #[serde(skip)]
    pub listing_id: String,

    /// Metadata labels plus the three score keys.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl RestaurantRecord {
    /// Merge metadata and scores. Score keys overwrite same-named labels.
    #[must_use]
    pub fn from_parts(listing_id: String, metadata: MetadataRecord, scores: ScoreSummary) -> Self {
        let mut fields: BTreeMap<String, FieldValue> = metadata
            .into_iter()
            .map(|(label, values)| (label, FieldValue::Text(values)))
            .collect();

        fields.insert(AVERAGE_SCORE.to_string(), FieldValue::Float(scores.average_score));
        fields.insert(HIGH_SCORE.to_string(), FieldValue::Integer(scores.high_score));
        fields.insert(
            TOTAL_INSPECTIONS.to_string(),
            FieldValue::Integer(i64::try_from(scores.total_inspections).unwrap_or(i64::MAX)),
        );

        Self { listing_id, fields }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Text values of a metadata field, empty if absent or numeric.
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        match self.fields.get(key) {
            Some(FieldValue::Text(values)) => values,
            _ => &[],
        }
    }
}

/// Build the record of a single listing.
pub fn extract_record(listing: &Listing) -> Result<RestaurantRecord> {
    let metadata = metadata::extract_metadata(listing)?;
    let scores = scoring::extract_scores(&listing.block);
    Ok(RestaurantRecord::from_parts(listing.id.clone(), metadata, scores))
}

/// Lazy, single-pass sequence of records over a parsed document.
///
/// Each item is computed on demand. A listing whose structure cannot be read
/// yields an `Err` for that listing only; iteration continues afterwards.
pub struct Records<'a> {
    listings: std::vec::IntoIter<Listing<'a>>,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<RestaurantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let listing = self.listings.next()?;
        tracing::debug!(listing = %listing.id, "extracting listing");
        Some(extract_record(&listing))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.listings.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Records for every listing of `document`, in document order.
///
/// Restarting means calling `assemble` again; the document stays valid.
///
/// # Example
///
/// ```rust
/// use kc_inspections::{dom, record};
///
/// let doc = dom::parse(r#"<div id="PR1~"><table>
///     <tr><td>Business Name:</td><td>Cafe</td></tr>
/// </table></div>"#);
///
/// let records: Vec<_> = record::assemble(&doc).collect::<Result<_, _>>()?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].values("Business Name"), ["Cafe"]);
/// # Ok::<(), kc_inspections::Error>(())
/// ```
#[must_use]
pub fn assemble(document: &Document) -> Records<'_> {
    Records {
        listings: listing::segment(document).into_iter(),
    }
}
