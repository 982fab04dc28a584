//! Sequence token codec
//!
//! Joins a start-position beat and an ordered list of sequence beats
//! into one pipe-delimited string:
//!
//! ```text
//! <startPosition>|<beat1>|<beat2>|...
//! ```
//!
//! On decode, two formats coexist without migration markers:
//!
//! - **Current**: the first segment is an encoded beat (the start
//!   position). Every encoded beat contains a colon and letter codes.
//! - **Legacy**: the first segment is a bare decimal beat number. The
//!   start position is synthesized blank and the remaining segments are
//!   numbered sequentially from that parsed number.
//!
//! A digits-only segment can never be a valid encoded beat, so the two
//! formats are unambiguous by construction. The start position is never
//! counted toward the reported sequence length.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beat::{decode_beat, encode_beat, Beat, START_POSITION_BEAT};
use crate::error::{CodecError, Result};

/// Delimiter between beat tokens in a sequence token
pub const SEQUENCE_DELIMITER: char = '|';

const SEQUENCE_DELIMITER_STR: &str = "|";

/// An ordered list of beats plus a start position
///
/// The start position lives in its own field, never commingled with the
/// beat list. Producers that historically embedded it as beat 0 inside
/// the list are normalized on construction via [`Sequence::normalized`]
/// and tolerated on encode. `word` is collaborator-owned (like a beat's
/// letter) and excluded from round-trip requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub start_position: Option<Beat>,
    pub beats: Vec<Beat>,
    /// Human-readable word label, resolved externally after decode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

impl Sequence {
    /// Create a sequence, normalizing any embedded start position
    ///
    /// Beats numbered 0 are removed from the list; the first one found
    /// becomes the start position unless an explicit one was supplied.
    pub fn normalized(start_position: Option<Beat>, beats: Vec<Beat>) -> Self {
        let mut start = start_position;
        let mut sequence_beats = Vec::with_capacity(beats.len());
        for beat in beats {
            if beat.beat_number == START_POSITION_BEAT {
                if start.is_none() {
                    start = Some(beat);
                }
                // A second embedded beat 0 has nowhere to go; drop it
                continue;
            }
            sequence_beats.push(beat);
        }
        Self {
            start_position: start,
            beats: sequence_beats,
            word: None,
        }
    }

    /// Create a sequence from sequence beats alone
    pub fn new(beats: Vec<Beat>) -> Self {
        Self::normalized(None, beats)
    }

    /// Number of sequence beats, explicitly excluding the start position
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// True if the sequence has no beats (a bare start position)
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}

/// Encode a sequence to its pipe-delimited wire token
///
/// Start-position resolution order: the explicit field, then a beat
/// numbered 0 embedded in the beat list (excluded from the sequence
/// beats), then a synthesized blank beat. Stored beat-number gaps are
/// ignored; position in the token is what numbers beats on decode.
pub fn encode_sequence(sequence: &Sequence) -> String {
    let embedded_start = sequence
        .beats
        .iter()
        .find(|b| b.beat_number == START_POSITION_BEAT);

    let start_token = match (&sequence.start_position, embedded_start) {
        (Some(start), _) => encode_beat(start),
        (None, Some(start)) => encode_beat(start),
        (None, None) => encode_beat(&Beat::blank_start_position()),
    };

    let mut tokens = Vec::with_capacity(sequence.beats.len() + 1);
    tokens.push(start_token);
    for beat in &sequence.beats {
        if beat.beat_number == START_POSITION_BEAT {
            continue; // consumed as the start position above
        }
        tokens.push(encode_beat(beat));
    }

    tokens.join(SEQUENCE_DELIMITER_STR)
}

/// Decode a wire token to a sequence
///
/// Handles both the current and legacy formats (see module docs). Empty
/// inner segments are skipped silently; beats are renumbered by decoded
/// order, so a skipped segment leaves no numbering gap.
pub fn decode_sequence(token: &str) -> Result<Sequence> {
    if token.is_empty() {
        return Err(CodecError::EmptySequence);
    }

    let segments: Vec<&str> = token.split(SEQUENCE_DELIMITER).collect();
    if segments.is_empty() {
        return Err(CodecError::MalformedSequence);
    }

    if is_legacy_header(segments[0]) {
        return decode_legacy(token, &segments);
    }

    let start_position = decode_beat(segments[0], START_POSITION_BEAT)?;

    let mut beats = Vec::with_capacity(segments.len() - 1);
    for segment in &segments[1..] {
        if segment.is_empty() {
            continue;
        }
        let number = beats.len() as u32 + 1;
        beats.push(decode_beat(segment, number)?);
    }

    Ok(Sequence {
        start_position: Some(start_position),
        beats,
        word: None,
    })
}

/// A digits-only first segment marks the legacy format
///
/// Valid encoded beats always contain a colon and letter codes, never
/// pure digits, so this test cannot misfire on current-format tokens.
fn is_legacy_header(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn decode_legacy(token: &str, segments: &[&str]) -> Result<Sequence> {
    let starting_number: u32 = segments[0]
        .parse()
        .map_err(|_| CodecError::MalformedSequence)?;

    let beat_segments = &segments[1..];
    if beat_segments.is_empty() {
        return Err(CodecError::NoBeatsFound(token.to_string()));
    }

    debug!(
        starting_number,
        beats = beat_segments.len(),
        "decoding legacy sequence format"
    );

    let mut beats = Vec::with_capacity(beat_segments.len());
    for segment in beat_segments {
        if segment.is_empty() {
            continue;
        }
        // The header grammar admits any digit run, so a hostile URL can
        // push the sequential numbering past u32::MAX.
        let number = starting_number
            .checked_add(beats.len() as u32)
            .ok_or(CodecError::MalformedSequence)?;
        beats.push(decode_beat(segment, number)?);
    }

    Ok(Sequence {
        start_position: Some(Beat::blank_start_position()),
        beats,
        word: None,
    })
}
