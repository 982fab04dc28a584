//! Opportunistic sequence compression
//!
//! Wraps the sequence codec in a reversible, URL-alphabet-safe
//! compressor: zstd for the compression itself, URL-safe base64 (no
//! padding) for transport. Compression is applied per-sequence, never
//! assumed — short sequences often compress worse than raw because of
//! fixed compressor overhead, so the choice is length-driven and
//! computed fresh on every call:
//!
//! - compressed form strictly shorter than raw → `z:<base64(zstd(raw))>`
//! - otherwise → the raw sequence token, verbatim and untagged
//!
//! The tag cannot collide with a raw token: `z` is not in any alphabet,
//! and raw tokens always begin with a location code or a colon.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use tracing::debug;

use crate::error::{CodecError, Result};
use crate::sequence::{decode_sequence, encode_sequence, Sequence};

/// Two-character prefix marking a compressed payload
pub const COMPRESSION_TAG: &str = "z:";

/// Sequence tokens are small; favor density over compression speed
const COMPRESSION_LEVEL: i32 = 19;

/// A share-ready payload and how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedSequence {
    pub payload: String,
    pub is_compressed: bool,
}

/// Encode a sequence and compress the result when it helps
///
/// The untagged branch returns the raw encoding verbatim, so the output
/// is never longer than the raw token plus the possibility of a strictly
/// shorter tagged form.
pub fn compress_sequence(sequence: &Sequence) -> CompressedSequence {
    let raw = encode_sequence(sequence);
    compress_payload(raw)
}

fn compress_payload(raw: String) -> CompressedSequence {
    let packed = match zstd::stream::encode_all(raw.as_bytes(), COMPRESSION_LEVEL) {
        Ok(bytes) => bytes,
        Err(e) => {
            // Compression is an optimization; the raw token is always valid
            debug!("zstd encode failed, sharing raw token: {}", e);
            return CompressedSequence {
                payload: raw,
                is_compressed: false,
            };
        }
    };

    let tagged = format!("{}{}", COMPRESSION_TAG, URL_SAFE_NO_PAD.encode(&packed));
    if tagged.len() < raw.len() {
        debug!(
            raw_len = raw.len(),
            compressed_len = tagged.len(),
            "sequence payload compressed"
        );
        CompressedSequence {
            payload: tagged,
            is_compressed: true,
        }
    } else {
        CompressedSequence {
            payload: raw,
            is_compressed: false,
        }
    }
}

/// Decode a (possibly compressed) share payload back to a sequence
///
/// Tagged payloads are base64-decoded, zstd-decompressed, and UTF-8
/// checked before sequence decoding; any inverse-path failure is
/// `DecompressionFailed`. Untagged payloads go straight to the sequence
/// decoder.
pub fn decompress_sequence(payload: &str) -> Result<Sequence> {
    let token = match payload.strip_prefix(COMPRESSION_TAG) {
        Some(tagged) => {
            let packed = URL_SAFE_NO_PAD
                .decode(tagged)
                .map_err(|e| CodecError::DecompressionFailed(format!("base64: {}", e)))?;
            let bytes = zstd::stream::decode_all(packed.as_slice())
                .map_err(|e| CodecError::DecompressionFailed(format!("zstd: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| CodecError::DecompressionFailed(format!("utf-8: {}", e)))?
        }
        None => payload.to_string(),
    };

    decode_sequence(&token)
}
