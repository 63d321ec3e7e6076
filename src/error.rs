//! Error types for kc-inspections.
//!
//! Only genuinely fatal conditions live here. Malformed cells, unparsable
//! scores, missing addresses and failed geocoding lookups are all recovered
//! where they happen and never surface as an `Error`.

/// Error type for retrieval and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A listing block has no `<tbody>` to read metadata from.
    #[error("Listing {id} has no table body")]
    MissingTableBody {
        /// Identifier of the offending listing block.
        id: String,
    },

    /// A listing block's table body has no label/value rows.
    #[error("Listing {id} has no metadata rows")]
    NoMetadataRows {
        /// Identifier of the offending listing block.
        id: String,
    },

    /// HTTP retrieval failed (transport error, timeout or non-2xx status).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading or writing a cached document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The query URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The geocoding collaborator returned something we could not interpret.
    #[error("Geocoding failed: {0}")]
    Geocode(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for kc-inspections operations.
pub type Result<T> = std::result::Result<T, Error>;
