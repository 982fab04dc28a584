//! Error types for the sequence codec

use thiserror::Error;

/// Codec result type
pub type Result<T> = std::result::Result<T, CodecError>;

/// Decode-path errors for the sequence codec
///
/// Every decode failure is reported to the caller rather than swallowed:
/// a corrupted shared link must be diagnosable, never silently decoded
/// into a wrong sequence. The verifier converts these into report data.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A motion token field failed to reverse-map through the alphabet
    /// tables, or the token structure is inconsistent
    #[error("malformed motion token {token:?}: invalid {field} code {code:?}")]
    MalformedMotion {
        token: String,
        field: &'static str,
        code: String,
    },

    /// Beat token is missing its colon separator
    #[error("malformed beat token {0:?}: missing ':' separator")]
    MalformedBeat(String),

    /// Empty input handed to the sequence decoder
    #[error("cannot decode an empty sequence string")]
    EmptySequence,

    /// Sequence token split produced no segments
    #[error("malformed sequence token: no beat segments")]
    MalformedSequence,

    /// Legacy-format token with a starting beat number but no beats
    #[error("legacy sequence {0:?} carries no beats after the starting beat number")]
    NoBeatsFound(String),

    /// Tagged payload whose inverse compression step failed
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Share-link origin or module alias is unusable
    #[error("invalid share URL: {0}")]
    InvalidShareUrl(String),
}
