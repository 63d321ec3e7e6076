//! Geographic enrichment.
//!
//! Turns restaurant records into GeoJSON features by geocoding their address.
//!
//! # Module Structure
//!
//! - `types`: GeoJSON output types and the property allow-list
//! - `geocoder`: The `Geocoder` trait the enricher depends on
//! - `nominatim`: Blocking HTTP geocoder for OpenStreetMap Nominatim
//! - `enrich`: Record → feature conversion
//!
//! Lookups are fail-open: a record without an address, a lookup without a
//! match and a failed lookup all simply produce no feature.

pub mod enrich;
pub mod geocoder;
pub mod nominatim;
pub mod types;

pub use enrich::{enrich, joined_address};
pub use geocoder::{GeocodeMatch, Geocoder};
pub use nominatim::NominatimGeocoder;
pub use types::{FeatureCollection, GeoFeature, Geometry, PROPERTY_ALLOW_LIST};
