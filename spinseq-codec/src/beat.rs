//! Beat token codec
//!
//! A beat combines up to two motions (primary and secondary hand) into a
//! single colon-delimited token: `<motionOrEmpty>:<motionOrEmpty>`. The
//! colon is always present, so a beat with no motions at all encodes as
//! exactly `":"`.
//!
//! Beat tokens carry no positional self-knowledge; the beat number is
//! supplied by the sequence codec on decode.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::motion::{decode_motion, encode_motion, HandRole, Motion};

/// Beat number reserved for the start position
pub const START_POSITION_BEAT: u32 = 0;

/// One step of a sequence, holding up to two motions
///
/// `letter` and `grid_position` are owned by downstream resolvers, not
/// by the codec: they are never encoded, stay `None` after decode, and
/// are excluded from round-trip requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Position within the sequence; 0 is reserved for the start position
    pub beat_number: u32,
    pub primary: Option<Motion>,
    pub secondary: Option<Motion>,
    /// Human-readable label, resolved externally after decode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    /// Resolved grid position, derived externally after decode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<String>,
}

impl Beat {
    /// Create a beat with the given number and motions
    pub fn new(beat_number: u32, primary: Option<Motion>, secondary: Option<Motion>) -> Self {
        Self {
            beat_number,
            primary,
            secondary,
            letter: None,
            grid_position: None,
        }
    }

    /// Create a blank start-position beat (number 0, no motions)
    pub fn blank_start_position() -> Self {
        Self::new(START_POSITION_BEAT, None, None)
    }

    /// True if neither hand moves this beat
    pub fn is_blank(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

/// Encode a beat to its colon-delimited wire token
///
/// # Examples
///
/// ```
/// use spinseq_codec::beat::{encode_beat, Beat};
///
/// assert_eq!(encode_beat(&Beat::blank_start_position()), ":");
/// ```
pub fn encode_beat(beat: &Beat) -> String {
    format!(
        "{}:{}",
        encode_motion(beat.primary.as_ref()),
        encode_motion(beat.secondary.as_ref())
    )
}

/// Decode a wire token to a beat
///
/// Splits on the first colon into exactly two motion tokens; a missing
/// colon is `MalformedBeat`. The beat number comes from the caller.
pub fn decode_beat(token: &str, beat_number: u32) -> Result<Beat> {
    let (primary_token, secondary_token) = token
        .split_once(':')
        .ok_or_else(|| CodecError::MalformedBeat(token.to_string()))?;

    let primary = decode_motion(primary_token, HandRole::Primary)?;
    let secondary = decode_motion(secondary_token, HandRole::Secondary)?;

    Ok(Beat::new(beat_number, primary, secondary))
}
