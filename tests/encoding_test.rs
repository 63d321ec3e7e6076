use kc_inspections::source::Document;
use kc_inspections::{extract_records, Options};

fn latin1_page() -> Vec<u8> {
    b"<html><head><meta charset=\"ISO-8859-1\"></head><body>\
      <div id=\"PR1~\"><table>\
      <tr><td>Business Name:</td><td>CAF\xC9 VITA</td></tr>\
      <tr><td>Address:</td><td>1005 E PIKE ST</td></tr>\
      </table></div></body></html>"
        .to_vec()
}

#[test]
fn meta_charset_is_honoured_without_declared_encoding() {
    let document = Document::new(latin1_page(), None);
    let records = extract_records(&document.decode(), &Options::default()).expect("extraction failed");
    assert_eq!(records[0].values("Business Name"), ["CAFÉ VITA"]);
}

#[test]
fn declared_encoding_wins_over_meta_charset() {
    // The meta tag claims UTF-8; the server header is authoritative
    let body = b"<html><head><meta charset=\"utf-8\"></head><body>\
      <div id=\"PR1~\"><table><tr><td>Business Name:</td><td>CAF\xC9 VITA</td></tr></table></div>\
      </body></html>"
        .to_vec();

    let document = Document::new(body, Some("ISO-8859-1".into()));
    let records = extract_records(&document.decode(), &Options::default()).expect("extraction failed");
    assert_eq!(records[0].values("Business Name"), ["CAFÉ VITA"]);
}

#[test]
fn utf8_content_passes_through() {
    let document = Document::new(
        "<div id=\"PR1~\"><table><tr><td>Business Name:</td><td>PHỞ BẮC</td></tr></table></div>"
            .as_bytes()
            .to_vec(),
        Some("utf-8".into()),
    );
    let records = extract_records(&document.decode(), &Options::default()).expect("extraction failed");
    assert_eq!(records[0].values("Business Name"), ["PHỞ BẮC"]);
}
