use thiserror::Error;

/// Convenience alias for results produced by this crate
pub type Result<T> = std::result::Result<T, BookletError>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum BookletError {
    /// The page geometry breaks one of its invariants; nothing has been drawn
    #[error("invalid page geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// A content block of a kind the layout engine cannot draw
    #[error("unsupported content block kind: {kind}")]
    UnsupportedBlockKind { kind: String },

    /// The document grew past the page limit the caller asked for
    #[error("document exceeds the page limit of {limit} pages")]
    PageLimitExceeded { limit: usize },

    /// A colour in a configuration file or block list could not be parsed
    #[error("invalid colour: {value:?}")]
    InvalidColour { value: String },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// A block list or plan was not valid JSON
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// A geometry file was not valid TOML
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    /// The geometry could not be rendered as TOML
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    /// [zip] failed while packaging a DOCX file
    Zip(#[from] zip::result::ZipError),
}

impl BookletError {
    pub(crate) fn geometry<S: Into<String>>(reason: S) -> BookletError {
        BookletError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}
