//! Configuration options for the extraction pipeline.
//!
//! The `Options` struct controls how many records are produced and what
//! happens when a listing's structure cannot be read.

/// Configuration options for the extraction pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use kc_inspections::Options;
///
/// // Use defaults
/// let options = Options::default();
/// assert!(options.skip_malformed_listings);
///
/// // Only look at the first five restaurants
/// let options = Options {
///     max_records: Some(5),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Stop after this many listings.
    ///
    /// Records are produced lazily, so listings past the limit are never
    /// extracted. Listings skipped as malformed still count toward the limit.
    ///
    /// Default: `None` (all listings)
    pub max_records: Option<usize>,

    /// Skip listings whose table structure cannot be read.
    ///
    /// When `false`, the first malformed listing aborts the whole run with
    /// its error instead.
    ///
    /// Default: `true`
    pub skip_malformed_listings: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_records: None,
            skip_malformed_listings: true,
        }
    }
}

impl Options {
    /// Options limited to the first `max_records` listings.
    #[must_use]
    pub fn with_limit(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
            ..Self::default()
        }
    }

    /// Effective listing limit.
    #[must_use]
    pub(crate) fn limit(&self) -> usize {
        self.max_records.unwrap_or(usize::MAX)
    }
}
