//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use kc_inspections::geo::{GeocodeMatch, Geometry};
use kc_inspections::{Error, Geocoder, Result};

/// One listing shaped like the live results page: metadata rows, then a
/// nested inspection-history table inside a single spanning cell.
pub fn listing(id: &str, name: &str, address: &[&str], scores: &[&str]) -> String {
    let mut html = format!(
        r#"<div id="{id}" class="resultRow"><table><tbody>
        <tr><td class="headerCell">Business Name:</td><td>{name}</td></tr>
        <tr><td>Business Category:</td><td>Seating 151-250 - Risk Category III</td></tr>
"#
    );
    for (i, line) in address.iter().enumerate() {
        let label = if i == 0 { "Address:" } else { "" };
        html.push_str(&format!("        <tr><td>{label}</td><td>{line}</td></tr>\n"));
    }
    html.push_str("        <tr><td>Phone:</td><td>(206) 632-0767</td></tr>\n");
    html.push_str(
        r#"        <tr><td colspan="2"><table><tbody>
            <tr><td>Inspection Information</td><td>Date</td><td>Score</td><td>Result</td></tr>
"#,
    );
    for score in scores {
        html.push_str(&format!(
            "            <tr><td>Routine Inspection/Field Review</td><td>01/14/2014</td><td>{score}</td><td>Unsatisfactory</td></tr>\n"
        ));
    }
    html.push_str("        </tbody></table></td></tr>\n    </tbody></table></div>\n");
    html
}

/// Wrap listings into a results page.
pub fn page(listings: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Results</title></head>
<body><div id="container"><h2>Search Results</h2>
{}
<div id="footer">King County</div></div></body></html>"#,
        listings.concat()
    )
}

/// Geocoder that places every address at the same point, records each
/// lookup and can be told to fail or miss for specific addresses.
#[derive(Default)]
pub struct RecordingGeocoder {
    pub asked: RefCell<Vec<String>>,
    pub missing: Vec<String>,
    pub failing: Vec<String>,
    pub canonical: Option<String>,
}

impl Geocoder for RecordingGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>> {
        self.asked.borrow_mut().push(address.to_string());
        if self.failing.iter().any(|a| a == address) {
            return Err(Error::Geocode("connection reset".into()));
        }
        if self.missing.iter().any(|a| a == address) {
            return Ok(None);
        }
        Ok(Some(GeocodeMatch {
            geometry: Geometry::point(47.6497, -122.3206),
            address: self.canonical.clone(),
        }))
    }
}
