//! DOM Query Adapter
//!
//! The narrow tree-query surface the extractors depend on, implemented once
//! over the `dom_query` crate. Three operations matter:
//!
//! - [`find_descendants`]: element descendants by tag name plus a predicate
//! - [`find_children`]: direct element children by tag name
//! - [`first_text`]: the single direct text of a node, if it has one
//!
//! The parse tree is never mutated through this module.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
///
/// `dom_query` parses with html5ever, so bare `<table><tr>` markup gets the
/// implied `<tbody>` inserted just like any html5 parser would.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

// === Querying ===

/// Find element descendants with the given tag that satisfy `predicate`.
///
/// Results come back in document order (pre-order walk). The root of `sel`
/// itself is never part of the result.
///
/// # Example
///
/// ```rust
/// use kc_inspections::dom;
///
/// let doc = dom::parse(r#"<div id="root"><p>a</p><div><p class="x">b</p></div></div>"#);
/// let root = doc.select("#root");
///
/// let all = dom::find_descendants(&root, "p", |_| true);
/// assert_eq!(all.len(), 2);
///
/// let marked = dom::find_descendants(&root, "p", |p| p.has_attr("class"));
/// assert_eq!(marked.len(), 1);
/// ```
#[must_use]
pub fn find_descendants<'a, P>(sel: &Selection<'a>, tag: &str, predicate: P) -> Vec<Selection<'a>>
where
    P: Fn(&Selection<'a>) -> bool,
{
    let mut found = Vec::new();
    let Some(root) = sel.nodes().first() else {
        return found;
    };

    // Explicit stack keeps the walk iterative; children are pushed in reverse
    // so they pop in document order.
    let mut stack: Vec<NodeRef<'a>> = root.children().into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if is_tag(&node, tag) {
            let candidate = Selection::from(node);
            if predicate(&candidate) {
                found.push(candidate);
            }
        }
        stack.extend(node.children().into_iter().rev());
    }

    found
}

/// Find direct element children with the given tag, in document order.
#[must_use]
pub fn find_children<'a>(sel: &Selection<'a>, tag: &str) -> Vec<Selection<'a>> {
    let Some(root) = sel.nodes().first() else {
        return Vec::new();
    };

    root.children()
        .into_iter()
        .filter(|child| is_tag(child, tag))
        .map(Selection::from)
        .collect()
}

/// Get the single direct text of a node.
///
/// A node with exactly one text child yields that text. A node with exactly
/// one element child defers to that child. Anything else (no children, or
/// mixed/multiple children) has no single text and yields `None`.
///
/// # Example
///
/// ```rust
/// use kc_inspections::dom;
///
/// let doc = dom::parse("<table><tr><td> Name: </td><td><b>Ivar's</b></td><td></td><td>a<br>b</td></tr></table>");
/// let cells = dom::find_descendants(&doc.select("table"), "td", |_| true);
///
/// assert_eq!(dom::first_text(&cells[0]).as_deref(), Some(" Name: "));
/// assert_eq!(dom::first_text(&cells[1]).as_deref(), Some("Ivar's"));
/// assert_eq!(dom::first_text(&cells[2]), None);
/// assert_eq!(dom::first_text(&cells[3]), None);
/// ```
#[must_use]
pub fn first_text(sel: &Selection) -> Option<StrTendril> {
    sel.nodes().first().and_then(single_text)
}

fn single_text(node: &NodeRef) -> Option<StrTendril> {
    match node.children().as_slice() {
        [only] if only.is_text() => Some(only.text()),
        [only] if only.is_element() => single_text(only),
        _ => None,
    }
}
