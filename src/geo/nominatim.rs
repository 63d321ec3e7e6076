//! OpenStreetMap Nominatim geocoder.
//!
//! Blocking client with a bounded request timeout. A timeout surfaces as an
//! ordinary transport error, which the enricher turns into "no feature".

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::geo::geocoder::{GeocodeMatch, Geocoder};
use crate::geo::types::Geometry;

/// Public Nominatim search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Default bound on a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim requires an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!("kc-inspections/", env!("CARGO_PKG_VERSION"));

/// One entry of a Nominatim search response.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocoder backed by a Nominatim-compatible search API.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
}

impl NominatimGeocoder {
    /// Geocoder against the public endpoint with default timeout.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Geocoder against a custom endpoint (self-hosted Nominatim, test server).
    pub fn with_endpoint(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| Error::Geocode(format!("invalid user agent: {e}")))?,
        );
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn search_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>> {
        let url = self.search_url(address);
        debug!(%address, "geocoding address");

        let places: Vec<NominatimPlace> = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;

        places.into_iter().next().map(place_to_match).transpose()
    }
}

fn place_to_match(place: NominatimPlace) -> Result<GeocodeMatch> {
    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|e| Error::Geocode(format!("invalid latitude {:?}: {e}", place.lat)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|e| Error::Geocode(format!("invalid longitude {:?}: {e}", place.lon)))?;

    Ok(GeocodeMatch {
        geometry: Geometry::point(latitude, longitude),
        address: Some(place.display_name),
    })
}
