mod common;

use common::{listing, page, RecordingGeocoder};
use kc_inspections::source::Document;
use kc_inspections::{
    build_feature_collection, build_feature_collection_from_document, Error, Options,
};
use serde_json::json;

#[test]
fn multi_line_address_is_geocoded_as_one_string() {
    let html = page(&[listing("PR1~", "Ivar's", &["401 NE", "Northlake Way"], &["10"])]);
    let geocoder = RecordingGeocoder::default();

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");

    assert_eq!(collection.len(), 1);
    assert_eq!(*geocoder.asked.borrow(), vec!["401 NE Northlake Way".to_string()]);
}

#[test]
fn listing_without_address_produces_no_feature_and_no_lookup() {
    let html = page(&[listing("PR1~", "Food Truck", &[], &["10"])]);
    let geocoder = RecordingGeocoder::default();

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");

    assert!(collection.is_empty());
    assert!(geocoder.asked.borrow().is_empty());
}

#[test]
fn features_carry_only_allow_listed_properties() {
    let html = page(&[listing("PR1~", "Cafe", &["1 Main St"], &["10", "20"])]);
    let geocoder = RecordingGeocoder::default();

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");

    let properties = &collection.features[0].properties;
    assert!(!properties.contains_key("Phone"));
    assert!(!properties.contains_key("Business Category"));
    assert_eq!(
        serde_json::Value::Object(properties.clone()),
        json!({
            "Business Name": "Cafe",
            "Address": "1 Main St",
            "Average Score": 15.0,
            "High Score": 20,
            "Total Inspections": 2
        })
    );
}

#[test]
fn canonical_address_replaces_scraped_address() {
    let html = page(&[listing("PR1~", "Cafe", &["1 MAIN ST"], &["10"])]);
    let geocoder = RecordingGeocoder {
        canonical: Some("1 Main Street, Seattle, WA 98105, USA".into()),
        ..RecordingGeocoder::default()
    };

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");

    assert_eq!(
        collection.features[0].properties["Address"],
        "1 Main Street, Seattle, WA 98105, USA"
    );
}

#[test]
fn failed_and_unmatched_lookups_are_dropped_in_order() {
    let html = page(&[
        listing("PR1~", "First", &["1 Main St"], &["1"]),
        listing("PR2~", "Second", &["2 Main St"], &["2"]),
        listing("PR3~", "Third", &["3 Main St"], &["3"]),
        listing("PR4~", "Fourth", &["4 Main St"], &["4"]),
        listing("PR5~", "Fifth", &[], &["5"]),
        listing("PR6~", "Sixth", &["6 Main St"], &["6"]),
    ]);
    let geocoder = RecordingGeocoder {
        failing: vec!["2 Main St".into()],
        missing: vec!["4 Main St".into()],
        ..RecordingGeocoder::default()
    };

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");

    let names: Vec<&str> = collection
        .features
        .iter()
        .filter_map(|f| f.properties["Business Name"].as_str())
        .collect();
    assert_eq!(names, vec!["First", "Third", "Sixth"]);
    // Every addressed record was looked up exactly once, no retries
    assert_eq!(geocoder.asked.borrow().len(), 5);
}

#[test]
fn output_is_a_geojson_feature_collection() {
    let html = page(&[listing("PR1~", "Cafe", &["1 Main St"], &["7"])]);
    let geocoder = RecordingGeocoder::default();

    let collection =
        build_feature_collection(&html, &geocoder, &Options::default()).expect("build failed");
    let json = serde_json::to_value(&collection).expect("serialize");

    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"][0]["type"], "Feature");
    assert_eq!(json["features"][0]["geometry"]["type"], "Point");
    assert_eq!(
        json["features"][0]["geometry"]["coordinates"],
        json!([-122.3206, 47.6497])
    );
}

#[test]
fn empty_page_gives_empty_collection() {
    let geocoder = RecordingGeocoder::default();
    let collection =
        build_feature_collection(&page(&[]), &geocoder, &Options::default()).expect("build failed");
    assert_eq!(
        serde_json::to_value(&collection).expect("serialize"),
        json!({"type": "FeatureCollection", "features": []})
    );
}

#[test]
fn strict_mode_surfaces_malformed_listing() {
    let html = page(&[r#"<div id="PR9~"><table></table></div>"#.to_string()]);
    let geocoder = RecordingGeocoder::default();
    let options = Options {
        skip_malformed_listings: false,
        ..Options::default()
    };

    let result = build_feature_collection(&html, &geocoder, &options);
    assert!(matches!(
        result,
        Err(Error::MissingTableBody { .. } | Error::NoMetadataRows { .. })
    ));
}

#[test]
fn declared_encoding_is_used_for_retrieved_documents() {
    // Windows-1252 body, no meta charset
    let mut body = b"<html><body><div id=\"PR1~\"><table>".to_vec();
    body.extend_from_slice(b"<tr><td>Business Name:</td><td>CAF\xC9 ALLEGRO</td></tr>");
    body.extend_from_slice(b"<tr><td>Address:</td><td>4214 UNIVERSITY WAY NE</td></tr>");
    body.extend_from_slice(b"</table></div></body></html>");
    let document = Document::new(body, Some("windows-1252".into()));
    let geocoder = RecordingGeocoder::default();

    let collection =
        build_feature_collection_from_document(&document, &geocoder, &Options::default())
            .expect("build failed");

    assert_eq!(collection.features[0].properties["Business Name"], "CAFÉ ALLEGRO");
}
