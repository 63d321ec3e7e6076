//! Character encoding resolution and transcoding.
//!
//! Results pages arrive as raw bytes plus whatever charset the server
//! declared. Resolution order:
//!
//! 1. the declared label, when `encoding_rs` recognises it
//! 2. `<meta charset>` / `<meta http-equiv="Content-Type">` in the first 1 KiB
//! 3. UTF-8
//!
//! Decoding is lossy; invalid sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::{META_CHARSET, META_CONTENT_TYPE_CHARSET};

/// How much of the document is searched for a meta charset.
const SNIFF_LIMIT: usize = 1024;

/// Charset declared in the document's own meta tags, if recognisable.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*META_CHARSET, &*META_CONTENT_TYPE_CHARSET]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// The encoding to decode with, given an optional declared label.
#[must_use]
pub fn resolve(html: &[u8], declared: Option<&str>) -> &'static Encoding {
    declared
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or_else(|| detect_encoding(html))
}

/// Transcode HTML bytes to UTF-8, sniffing the charset from meta tags.
///
/// # Examples
///
/// ```
/// use kc_inspections::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(transcode_to_utf8(html).contains("Hello, World!"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    decode(html, None)
}

/// Decode document bytes to UTF-8, preferring the declared encoding.
///
/// `declared` is the charset reported alongside the document (an HTTP
/// `Content-Type` charset or the label stored in a cached copy).
///
/// # Examples
///
/// ```
/// use kc_inspections::encoding::decode;
///
/// assert_eq!(decode(b"Caf\xE9", Some("ISO-8859-1")), "Caf\u{e9}");
/// assert_eq!(decode(b"plain", Some("not-a-charset")), "plain");
/// ```
#[must_use]
pub fn decode(html: &[u8], declared: Option<&str>) -> String {
    let encoding = resolve(html, declared);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
