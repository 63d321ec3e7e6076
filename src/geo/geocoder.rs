//! The geocoding collaborator.

use crate::error::Result;
use crate::geo::types::Geometry;

/// Result of a successful address lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    /// Location of the address.
    pub geometry: Geometry,
    /// The provider's canonical form of the address, if it returned one.
    pub address: Option<String>,
}

/// Resolves an address string to a location.
///
/// `Ok(None)` means the provider found no match. `Err` covers transport
/// failures, timeouts and unreadable responses. The enricher treats both the
/// same way and never retries.
pub trait Geocoder {
    /// Look up `address`.
    fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>> {
        (**self).geocode(address)
    }
}
