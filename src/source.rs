//! Results-page retrieval and caching.
//!
//! Builds the inspection search query, fetches the results page over HTTP
//! and stores/loads a cached copy so the extractor can be rerun offline.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use encoding_rs::Encoding;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};
use url::Url;

use crate::encoding;
use crate::error::Result;

/// Inspection search results endpoint.
pub const INSPECTION_URL: &str =
    "http://info.kingcounty.gov/health/ehs/foodsafety/inspections/Results.aspx";

/// Default bound on fetching one results page.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Recognised query parameters and their defaults, in request order.
const DEFAULT_PARAMS: [(&str, &str); 16] = [
    ("Output", "W"),
    ("Business_Name", "Ivar's Salmon House"),
    ("Business_Address", "401 NE Northlake Way"),
    ("Longitude", ""),
    ("Latitude", ""),
    ("City", "Seattle"),
    ("Zip_Code", "98105"),
    ("Inspection_Type", "All"),
    ("Inspection_Start", ""),
    ("Inspection_End", ""),
    ("Inspection_Closed_Business", "A"),
    ("Violation_Points", ""),
    ("Violation_Red_Points", ""),
    ("Violation_Descr", ""),
    ("Fuzzy_Search", "N"),
    ("Sort", "B"),
];

/// Query parameters of an inspection search.
///
/// Only the parameters the search endpoint recognises can be set; anything
/// else is ignored.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use kc_inspections::source::InspectionQuery;
///
/// let start = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap_or_default();
/// let end = NaiveDate::from_ymd_opt(2015, 2, 1).unwrap_or_default();
/// let query = InspectionQuery::default()
///     .zip_code("98105")
///     .date_range(start, end);
///
/// assert_eq!(query.get("Inspection_Start"), Some("2/1/2013"));
/// assert_eq!(query.get("Zip_Code"), Some("98105"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionQuery {
    params: Vec<(&'static str, String)>,
}

impl Default for InspectionQuery {
    fn default() -> Self {
        Self {
            params: DEFAULT_PARAMS
                .iter()
                .map(|(key, value)| (*key, (*value).to_string()))
                .collect(),
        }
    }
}

impl InspectionQuery {
    /// Override a recognised parameter.
    ///
    /// Returns `false` (and changes nothing) when `key` is not recognised.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.params.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => {
                debug!(%key, "ignoring unrecognised query parameter");
                false
            }
        }
    }

    /// Current value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// All parameters in request order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Restaurant name to search for.
    #[must_use]
    pub fn business_name(self, name: &str) -> Self {
        self.with("Business_Name", name)
    }

    /// Street address to search for.
    #[must_use]
    pub fn address(self, address: &str) -> Self {
        self.with("Business_Address", address)
    }

    /// City to search in.
    #[must_use]
    pub fn city(self, city: &str) -> Self {
        self.with("City", city)
    }

    /// ZIP code to search in.
    #[must_use]
    pub fn zip_code(self, zip: &str) -> Self {
        self.with("Zip_Code", zip)
    }

    /// Only inspections between `start` and `end`.
    #[must_use]
    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with("Inspection_Start", format_date(start))
            .with("Inspection_End", format_date(end))
    }

    /// Inspection type filter (`All`, `Routine`, ...).
    #[must_use]
    pub fn inspection_type(self, kind: &str) -> Self {
        self.with("Inspection_Type", kind)
    }

    /// Include closed businesses (`A`) or only open ones (`O`).
    #[must_use]
    pub fn include_closed(self, include: bool) -> Self {
        self.with("Inspection_Closed_Business", if include { "A" } else { "O" })
    }

    /// Fuzzy name matching.
    #[must_use]
    pub fn fuzzy_search(self, fuzzy: bool) -> Self {
        self.with("Fuzzy_Search", if fuzzy { "Y" } else { "N" })
    }

    /// Sort order code (`B` = business name).
    #[must_use]
    pub fn sort(self, order: &str) -> Self {
        self.with("Sort", order)
    }

    /// Full request URL.
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(INSPECTION_URL, self.params())?)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// A results page as retrieved: raw bytes plus the declared charset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Raw response body.
    pub content: Vec<u8>,
    /// Charset label declared by the server, if any.
    pub encoding: Option<String>,
}

impl Document {
    /// Wrap already-retrieved bytes.
    #[must_use]
    pub fn new(content: Vec<u8>, encoding: Option<String>) -> Self {
        Self { content, encoding }
    }

    /// Fetch the results page for `query`.
    ///
    /// Transport errors, timeouts and non-2xx statuses are errors.
    pub fn fetch(query: &InspectionQuery, timeout: Duration) -> Result<Self> {
        let url = query.url()?;
        info!(%url, "fetching inspection results");

        let client = Client::builder().timeout(timeout).build()?;
        let response = client.get(url).send()?.error_for_status()?;

        let encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);
        let content = response.bytes()?.to_vec();

        debug!(bytes = content.len(), encoding = ?encoding, "fetched results page");
        Ok(Self { content, encoding })
    }

    /// Write a cached copy: the encoding label on the first line, then the
    /// body verbatim.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let label = self.encoding.as_deref().unwrap_or_default();
        let mut bytes = Vec::with_capacity(label.len() + 1 + self.content.len());
        bytes.extend_from_slice(label.as_bytes());
        bytes.push(b'\n');
        bytes.extend_from_slice(&self.content);
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a cached copy written by [`Document::save`].
    ///
    /// A plain HTML file (first line not an encoding label) loads as-is
    /// with no declared encoding.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_cache_bytes(bytes))
    }

    fn from_cache_bytes(bytes: Vec<u8>) -> Self {
        let Some(newline) = bytes.iter().position(|b| *b == b'\n') else {
            return Self::new(bytes, None);
        };

        let label = String::from_utf8_lossy(&bytes[..newline]).trim().to_string();
        if label.is_empty() {
            return Self::new(bytes[newline + 1..].to_vec(), None);
        }
        if Encoding::for_label(label.as_bytes()).is_some() {
            return Self::new(bytes[newline + 1..].to_vec(), Some(label));
        }

        Self::new(bytes, None)
    }

    /// Body decoded to UTF-8, honouring the declared encoding.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::decode(&self.content, self.encoding.as_deref())
    }
}

/// Extract the `charset` parameter of a `Content-Type` header value.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}
