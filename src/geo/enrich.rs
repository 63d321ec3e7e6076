//! Record → GeoJSON feature conversion.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::geo::geocoder::Geocoder;
use crate::geo::types::{GeoFeature, PROPERTY_ALLOW_LIST};
use crate::patterns::ADDRESS;
use crate::record::RestaurantRecord;

/// The record's address lines joined with single spaces.
///
/// Empty lines are skipped. `None` when nothing is left.
///
/// # Example
///
/// ```rust
/// use kc_inspections::geo::joined_address;
/// use kc_inspections::metadata::MetadataRecord;
/// use kc_inspections::record::RestaurantRecord;
/// use kc_inspections::scoring::ScoreSummary;
///
/// let mut metadata = MetadataRecord::new();
/// metadata.insert("Address".into(), vec!["401 NE".into(), "Northlake Way".into()]);
/// let record = RestaurantRecord::from_parts("PR1~".into(), metadata, ScoreSummary::empty());
///
/// assert_eq!(joined_address(&record).as_deref(), Some("401 NE Northlake Way"));
/// ```
#[must_use]
pub fn joined_address(record: &RestaurantRecord) -> Option<String> {
    let lines: Vec<&str> = record
        .values(ADDRESS)
        .iter()
        .map(String::as_str)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Allow-listed fields of `record`, list values flattened to strings.
#[must_use]
pub fn allowed_properties(record: &RestaurantRecord) -> Map<String, Value> {
    PROPERTY_ALLOW_LIST
        .iter()
        .filter_map(|key| {
            record
                .get(key)
                .map(|value| ((*key).to_string(), value.flatten()))
        })
        .collect()
}

/// Geocode one record into a feature.
///
/// Returns `None` without calling the geocoder when the record has no
/// address. A lookup that fails or finds nothing also yields `None`; the
/// caller just moves on to the next record.
pub fn enrich<G>(record: &RestaurantRecord, geocoder: &G) -> Option<GeoFeature>
where
    G: Geocoder + ?Sized,
{
    let Some(address) = joined_address(record) else {
        debug!(listing = %record.listing_id, "no address, skipping geocoding");
        return None;
    };

    let found = match geocoder.geocode(&address) {
        Ok(Some(found)) => found,
        Ok(None) => {
            warn!(listing = %record.listing_id, %address, "no geocoding match");
            return None;
        }
        Err(err) => {
            warn!(listing = %record.listing_id, %address, error = %err, "geocoding failed");
            return None;
        }
    };

    let address = found
        .address
        .filter(|canonical| !canonical.trim().is_empty())
        .unwrap_or(address);

    let mut properties = allowed_properties(record);
    properties.insert(ADDRESS.to_string(), Value::String(address));

    Some(GeoFeature::new(found.geometry, properties))
}
