//! Inspection score aggregation.
//!
//! Below the metadata table each listing has one four-cell row per past
//! inspection, with the score in the third cell:
//!
//! ```html
//! <tr><td>Inspection Information</td><td>Date</td><td>Score</td><td>Result</td></tr>
//! <tr><td>Routine Inspection/Field Review</td><td>01/14/2014</td><td>10</td><td>Unsatisfactory</td></tr>
//! ```
//!
//! The header row starts with "Inspection" and is skipped; data rows merely
//! contain the word.

use dom_query::Selection;

use crate::dom;
use crate::metadata::clean_cell;
use crate::patterns::INSPECTION_WORD;

/// Aggregate inspection scores of one listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    /// Mean of the parsable scores; 0 when none parsed.
    pub average_score: f64,
    /// Highest parsable score, never below 0.
    pub high_score: i64,
    /// Number of rows whose score parsed.
    pub total_inspections: usize,
}

impl ScoreSummary {
    /// Create a new `ScoreSummary`.
    #[must_use]
    pub fn new(average_score: f64, high_score: i64, total_inspections: usize) -> Self {
        Self {
            average_score,
            high_score,
            total_inspections,
        }
    }

    /// Summary of a listing without any usable inspection.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0.0, 0, 0)
    }
}

impl Default for ScoreSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// A `<tr>` with four direct cells whose first cell mentions "inspection"
/// without starting with it.
#[must_use]
pub fn is_inspection_row(row: &Selection) -> bool {
    if dom::tag_name(row).as_deref() != Some("tr") {
        return false;
    }

    let cells = dom::find_children(row, "td");
    let [first, _, _, _] = cells.as_slice() else {
        return false;
    };

    let label = clean_cell(first).to_lowercase();
    label.contains(INSPECTION_WORD) && !label.starts_with(INSPECTION_WORD)
}

/// Summarise the inspection history found anywhere inside `block`.
///
/// # Example
///
/// ```rust
/// use kc_inspections::{dom, scoring};
///
/// let doc = dom::parse(r#"<div id="b"><table>
///     <tr><td>Inspection Information</td><td>Date</td><td>Score</td><td>Result</td></tr>
///     <tr><td>Routine Inspection</td><td>1/1/2014</td><td>10</td><td>Unsatisfactory</td></tr>
///     <tr><td>Return Inspection</td><td>1/2/2014</td><td>0</td><td>Satisfactory</td></tr>
/// </table></div>"#);
///
/// let summary = scoring::extract_scores(&doc.select("#b"));
/// assert_eq!(summary.total_inspections, 2);
/// assert_eq!(summary.high_score, 10);
/// assert_eq!(summary.average_score, 5.0);
/// ```
#[must_use]
pub fn extract_scores(block: &Selection) -> ScoreSummary {
    let scores = dom::find_descendants(block, "tr", is_inspection_row)
        .iter()
        .map(|row| {
            // Predicate guarantees four cells
            dom::find_children(row, "td")
                .get(2)
                .map(clean_cell)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    summarize(scores.iter().map(String::as_str))
}

/// Fold raw score texts into a summary.
///
/// Texts that do not parse as integers are dropped from every field.
#[must_use]
pub fn summarize<'s, I>(raw_scores: I) -> ScoreSummary
where
    I: IntoIterator<Item = &'s str>,
{
    let mut samples = 0usize;
    // Wide enough that no run of i64 scores can overflow
    let mut total = 0i128;
    // Starts at 0, so an all-negative history reports 0
    let mut high_score = 0i64;

    for raw in raw_scores {
        let Ok(score) = raw.parse::<i64>() else {
            continue;
        };
        samples += 1;
        total += i128::from(score);
        if score > high_score {
            high_score = score;
        }
    }

    let average_score = if samples > 0 {
        total as f64 / samples as f64
    } else {
        0.0
    };

    ScoreSummary::new(average_score, high_score, samples)
}
