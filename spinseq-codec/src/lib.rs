//! # SpinSeq Codec Library
//!
//! Compact string serialization for choreographed motion sequences,
//! dense enough to fit non-trivial sequences into a shareable URL:
//! - Alphabet tables (enum ↔ short ASCII code mappings)
//! - Motion / beat / sequence codecs with a fixed micro-grammar
//! - Legacy-format migration on decode
//! - Opportunistic compression with a tagged payload
//! - Deep-link building and parsing (`open` query parameter)
//! - Collaborator interfaces for post-decode label resolution
//!
//! Layering is strict: sequence → beat → motion → alphabet, with the
//! compression layer wrapping the sequence codec and the URL binder
//! wrapping compression. All operations are pure, synchronous string
//! transforms with no shared mutable state.

pub mod alphabet;
pub mod beat;
pub mod compress;
pub mod error;
pub mod motion;
pub mod resolve;
pub mod sequence;
pub mod share;

pub use alphabet::{GridLocation, MotionType, Orientation, RotationDirection};
pub use beat::Beat;
pub use compress::{compress_sequence, decompress_sequence, CompressedSequence, COMPRESSION_TAG};
pub use error::{CodecError, Result};
pub use motion::{HandRole, Motion, Turns};
pub use resolve::{annotate_sequence, GridMode, GridPositionResolver, LetterResolver};
pub use sequence::{decode_sequence, encode_sequence, Sequence};
pub use share::{build_share_url, parse_share_url, DeepLink, ShareLink};
