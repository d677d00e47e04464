use thiserror::Error;

/// Input-shape failures from the chat pipeline. Both carry enough context
/// to tell the caller what was actually in the export.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no recognizable chat message headers in input")]
    NoSpeakers,

    #[error("speaker \"{requested}\" not found; available: {}", .available.join(", "))]
    SpeakerNotFound {
        requested: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
}
