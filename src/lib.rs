//! # kc-inspections
//!
//! Restaurant inspection scraper for county health-department results pages.
//!
//! A results page lists one block per restaurant: a label/value metadata
//! table followed by the inspection history. This library pulls each block
//! apart into a flat record, summarises the inspection scores and geocodes
//! the address into a GeoJSON feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use kc_inspections::{extract_records, Options};
//!
//! let html = r#"<div id="PR0001~"><table>
//!     <tr><td>Business Name:</td><td>IVAR'S SALMON HOUSE</td></tr>
//!     <tr><td>Address:</td><td>401 NE NORTHLAKE WAY</td></tr>
//!     <tr><td>Routine Inspection/Field Review</td><td>01/14/2014</td><td>10</td><td>Unsatisfactory</td></tr>
//! </table></div>"#;
//!
//! let records = extract_records(html, &Options::default())?;
//! assert_eq!(records[0].values("Business Name"), ["IVAR'S SALMON HOUSE"]);
//! # Ok::<(), kc_inspections::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - [`listing`]: find the per-restaurant blocks
//! - [`metadata`]: label/value rows with carry-forward labels
//! - [`scoring`]: average/high/count over the inspection rows
//! - [`record`]: merge both into a lazily produced record stream
//! - [`geo`]: geocode records into a `FeatureCollection`
//!
//! Malformed cells, unparsable scores, missing addresses and failed lookups
//! never abort a run; they only drop data for the affected record.

mod error;
mod options;
mod patterns;

/// DOM query adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Listing block segmentation.
pub mod listing;

/// Label/value metadata extraction.
pub mod metadata;

/// Inspection score aggregation.
pub mod scoring;

/// Restaurant records and the lazy record stream.
pub mod record;

/// Geocoding and GeoJSON output.
pub mod geo;

/// Query building, HTTP retrieval and on-disk caching of results pages.
pub mod source;

// Public API - re-exports
pub use error::{Error, Result};
pub use geo::{FeatureCollection, GeoFeature, Geocoder};
pub use options::Options;
pub use record::{FieldValue, RestaurantRecord};

use tracing::{debug, warn};

/// Apply the malformed-listing policy to the lazy record stream.
fn records<'a>(
    document: &'a dom::Document,
    options: &'a Options,
) -> impl Iterator<Item = Result<RestaurantRecord>> + 'a {
    record::assemble(document)
        .take(options.limit())
        .filter_map(move |result| match result {
            Ok(record) => Some(Ok(record)),
            Err(err) if options.skip_malformed_listings => {
                warn!(error = %err, "skipping malformed listing");
                None
            }
            Err(err) => Some(Err(err)),
        })
}

/// Extracts every restaurant record from a results page.
///
/// Records come back in document order. With the default options malformed
/// listings are skipped; with `skip_malformed_listings: false` the first one
/// aborts with its error.
pub fn extract_records(html: &str, options: &Options) -> Result<Vec<RestaurantRecord>> {
    let document = dom::parse(html);
    records(&document, options).collect()
}

/// Extracts records and geocodes them into a feature collection.
///
/// Records without an address, or whose lookup fails or finds nothing, are
/// left out. Feature order follows listing order.
///
/// # Example
///
/// ```rust
/// use kc_inspections::geo::{GeocodeMatch, Geometry};
/// use kc_inspections::{build_feature_collection, Geocoder, Options, Result};
///
/// struct Everywhere;
///
/// impl Geocoder for Everywhere {
///     fn geocode(&self, _address: &str) -> Result<Option<GeocodeMatch>> {
///         Ok(Some(GeocodeMatch { geometry: Geometry::point(47.6, -122.3), address: None }))
///     }
/// }
///
/// let html = r#"<div id="PR1~"><table>
///     <tr><td>Business Name</td><td>Cafe</td></tr>
///     <tr><td>Address</td><td>1 Main St</td></tr>
/// </table></div>"#;
///
/// let collection = build_feature_collection(html, &Everywhere, &Options::default())?;
/// assert_eq!(collection.len(), 1);
/// assert_eq!(collection.features[0].properties["Address"], "1 Main St");
/// # Ok::<(), kc_inspections::Error>(())
/// ```
pub fn build_feature_collection<G>(
    html: &str,
    geocoder: &G,
    options: &Options,
) -> Result<FeatureCollection>
where
    G: Geocoder + ?Sized,
{
    let document = dom::parse(html);

    let mut features = Vec::new();
    for record in records(&document, options) {
        let record = record?;
        if let Some(feature) = geo::enrich(&record, geocoder) {
            features.push(feature);
        }
    }

    debug!(features = features.len(), "built feature collection");
    Ok(FeatureCollection::new(features))
}

/// Like [`build_feature_collection`], decoding a retrieved document first.
pub fn build_feature_collection_from_document<G>(
    document: &source::Document,
    geocoder: &G,
    options: &Options,
) -> Result<FeatureCollection>
where
    G: Geocoder + ?Sized,
{
    build_feature_collection(&document.decode(), geocoder, options)
}
