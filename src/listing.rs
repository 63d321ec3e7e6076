//! Listing segmentation.
//!
//! A results page holds one `<div>` per restaurant whose `id` carries a
//! provider-record identifier (`PR<digits>~`). Everything else on the page is
//! ignored.

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{LISTING_ID, LISTING_TAG};

/// One restaurant's inspection block within a results page.
#[derive(Clone)]
pub struct Listing<'a> {
    /// The block's `id` attribute.
    pub id: String,

    /// Root of the block's subtree.
    pub block: Selection<'a>,
}

/// Find every listing block in `document`, in document order.
///
/// # Example
///
/// ```rust
/// use kc_inspections::{dom, listing};
///
/// let doc = dom::parse(r#"
///     <div id="PR0001~">first</div>
///     <div id="header">not a listing</div>
///     <div id="PR0002~">second</div>
/// "#);
///
/// let ids: Vec<String> = listing::segment(&doc).into_iter().map(|l| l.id).collect();
/// assert_eq!(ids, vec!["PR0001~", "PR0002~"]);
/// ```
#[must_use]
pub fn segment(document: &Document) -> Vec<Listing<'_>> {
    // html5 parsing always synthesises <html>, so this covers the whole tree
    let root = document.select("html");

    dom::find_descendants(&root, LISTING_TAG, is_listing_block)
        .into_iter()
        .filter_map(|block| {
            let id = dom::id(&block)?;
            Some(Listing { id, block })
        })
        .collect()
}

fn is_listing_block(sel: &Selection) -> bool {
    dom::id(sel).is_some_and(|id| LISTING_ID.is_match(&id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_listings_in_unrelated_document() {
        let doc = dom::parse("<html><body><div id='main'><p>Nothing here</p></div></body></html>");
        assert!(segment(&doc).is_empty());
    }

    #[test]
    fn ignores_non_div_elements_with_matching_id() {
        let doc = dom::parse(r#"<span id="PR1~">x</span><div id="PR2~">y</div>"#);
        let ids: Vec<String> = segment(&doc).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["PR2~"]);
    }

    #[test]
    fn ignores_divs_without_id() {
        let doc = dom::parse(r#"<div>PR1~</div><div class="PR2~"></div>"#);
        assert!(segment(&doc).is_empty());
    }

    #[test]
    fn preserves_document_order_across_nesting() {
        let doc = dom::parse(
            r#"<div id="wrap"><div id="PR3~"></div></div><div id="PR1~"></div><div id="PR2~"></div>"#,
        );
        let ids: Vec<String> = segment(&doc).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["PR3~", "PR1~", "PR2~"]);
    }
}
