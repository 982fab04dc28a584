//! Motion token codec
//!
//! Encodes one hand's movement record to a fixed-grammar token and back.
//! The wire layout, with no separators, is:
//!
//! ```text
//! LL LL O O R T+ M
//! ```
//!
//! - `LL` — two-letter start location, then two-letter end location
//! - `O`  — one-letter start orientation, then end orientation
//! - `R`  — one-letter rotation direction
//! - `T+` — turns: one or more decimal digits, or the literal `f`
//! - `M`  — one-letter motion type
//!
//! Turns is the only variable-length field; its extent is determined by
//! scanning forward until a motion-type letter is found. Because the
//! float-turns sentinel `f` is itself a motion-type letter, the first
//! character of the turns run is consumed unconditionally before the stop
//! scan begins. Minimum token length is therefore 9 (`2+2+1+1+1+1+1`).
//!
//! Absence is representable: an unused hand encodes as the empty string,
//! and any token shorter than the minimum decodes back to absent rather
//! than erroring.

use serde::{Deserialize, Serialize};

use crate::alphabet::{GridLocation, MotionType, Orientation, RotationDirection};
use crate::error::{CodecError, Result};

/// Minimum possible encoded motion length (2+2+1+1+1+1+1)
pub const MIN_MOTION_TOKEN_LEN: usize = 9;

/// Turn count for one motion
///
/// Either a non-negative integer (typically 0–3, but the grammar allows
/// multiple digits) or the float-turns sentinel written as a literal `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turns {
    Count(u32),
    Float,
}

impl Turns {
    /// Parse a turns run as scanned out of a motion token
    ///
    /// The run `f` is the float sentinel; any other non-empty all-digit
    /// run is an integer count. Everything else is malformed.
    pub fn parse(run: &str) -> Option<Self> {
        if run == "f" {
            return Some(Turns::Float);
        }
        if !run.is_empty() && run.bytes().all(|b| b.is_ascii_digit()) {
            return run.parse::<u32>().ok().map(Turns::Count);
        }
        None
    }
}

impl std::fmt::Display for Turns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Turns::Count(n) => write!(f, "{}", n),
            Turns::Float => write!(f, "f"),
        }
    }
}

/// Which hand a motion belongs to
///
/// Carried structurally (implied by position within a beat token), never
/// encoded inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandRole {
    Primary,
    Secondary,
}

impl std::fmt::Display for HandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandRole::Primary => write!(f, "primary"),
            HandRole::Secondary => write!(f, "secondary"),
        }
    }
}

/// One hand's movement within a beat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub motion_type: MotionType,
    pub start_loc: GridLocation,
    pub end_loc: GridLocation,
    pub start_ori: Orientation,
    pub end_ori: Orientation,
    pub rotation: RotationDirection,
    pub turns: Turns,
    pub color: HandRole,
}

/// Encode a motion (or its absence) to a wire token
///
/// Absent motions encode as the empty string, which downstream codecs
/// treat as "hand not used this beat". Encoding a present motion cannot
/// fail: the alphabets are closed enums with exactly one code per
/// variant, so there is no unmapped-variant path to defend against.
///
/// # Examples
///
/// ```
/// use spinseq_codec::alphabet::{GridLocation, MotionType, Orientation, RotationDirection};
/// use spinseq_codec::motion::{encode_motion, HandRole, Motion, Turns};
///
/// let motion = Motion {
///     motion_type: MotionType::Pro,
///     start_loc: GridLocation::South,
///     end_loc: GridLocation::West,
///     start_ori: Orientation::In,
///     end_ori: Orientation::In,
///     rotation: RotationDirection::Clockwise,
///     turns: Turns::Count(0),
///     color: HandRole::Primary,
/// };
/// assert_eq!(encode_motion(Some(&motion)), "soweiic0p");
/// assert_eq!(encode_motion(None), "");
/// ```
pub fn encode_motion(motion: Option<&Motion>) -> String {
    let Some(m) = motion else {
        return String::new();
    };
    format!(
        "{}{}{}{}{}{}{}",
        m.start_loc.code(),
        m.end_loc.code(),
        m.start_ori.code(),
        m.end_ori.code(),
        m.rotation.code(),
        m.turns,
        m.motion_type.code()
    )
}

/// Decode a wire token to a motion
///
/// Tokens shorter than [`MIN_MOTION_TOKEN_LEN`] (including the empty
/// string) decode to `Ok(None)` — absence, never an error. Longer tokens
/// must parse completely; any field that fails to reverse-map reports
/// `MalformedMotion` naming the offending field.
///
/// `color` is supplied by the caller since hand role is implied by
/// position within the beat token.
pub fn decode_motion(token: &str, color: HandRole) -> Result<Option<Motion>> {
    if token.len() < MIN_MOTION_TOKEN_LEN {
        return Ok(None);
    }

    let start_loc = field(token, 0..2, "start_loc", GridLocation::from_code)?;
    let end_loc = field(token, 2..4, "end_loc", GridLocation::from_code)?;
    let start_ori = char_field(token, 4, "start_ori", Orientation::from_code)?;
    let end_ori = char_field(token, 5, "end_ori", Orientation::from_code)?;
    let rotation = char_field(token, 6, "rotation", RotationDirection::from_code)?;

    let (turns, motion_type) = scan_turns(token)?;

    Ok(Some(Motion {
        motion_type,
        start_loc,
        end_loc,
        start_ori,
        end_ori,
        rotation,
        turns,
        color,
    }))
}

fn malformed(token: &str, field: &'static str, code: &str) -> CodecError {
    CodecError::MalformedMotion {
        token: token.to_string(),
        field,
        code: code.to_string(),
    }
}

fn field<T>(
    token: &str,
    range: std::ops::Range<usize>,
    name: &'static str,
    map: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let code = token.get(range).unwrap_or("");
    map(code).ok_or_else(|| malformed(token, name, code))
}

fn char_field<T>(
    token: &str,
    at: usize,
    name: &'static str,
    map: impl Fn(char) -> Option<T>,
) -> Result<T> {
    let code = token.get(at..at + 1).unwrap_or("");
    code.chars()
        .next()
        .and_then(&map)
        .ok_or_else(|| malformed(token, name, code))
}

/// Scan the variable-length turns run and the trailing motion type
///
/// The cursor starts just past the rotation code. The first character is
/// always part of the turns run (this is what lets the float sentinel
/// `f` coexist with `MotionType::Float`); the scan then consumes until
/// the first motion-type letter, which must also be the last character
/// of the token.
fn scan_turns(token: &str) -> Result<(Turns, MotionType)> {
    let tail = match token.get(7..) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(malformed(token, "turns", "")),
    };

    let mut chars = tail.char_indices();
    chars.next(); // first character always belongs to the turns run

    let stop = chars.find_map(|(i, c)| MotionType::from_code(c).map(|mt| (i, c, mt)));
    let Some((stop_idx, stop_char, motion_type)) = stop else {
        return Err(malformed(token, "motion_type", tail));
    };

    // The stop character terminates the token; trailing bytes can only
    // be corruption since beat delimiters already bound the token.
    if stop_idx + stop_char.len_utf8() != tail.len() {
        return Err(malformed(token, "motion_type", &tail[stop_idx..]));
    }

    let turns_run = &tail[..stop_idx];
    let turns = Turns::parse(turns_run).ok_or_else(|| malformed(token, "turns", turns_run))?;

    Ok((turns, motion_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pro_motion() -> Motion {
        Motion {
            motion_type: MotionType::Pro,
            start_loc: GridLocation::South,
            end_loc: GridLocation::West,
            start_ori: Orientation::In,
            end_ori: Orientation::In,
            rotation: RotationDirection::Clockwise,
            turns: Turns::Count(0),
            color: HandRole::Primary,
        }
    }

    #[test]
    fn test_encode_reference_token() {
        assert_eq!(encode_motion(Some(&pro_motion())), "soweiic0p");
    }

    #[test]
    fn test_encode_absent_is_empty() {
        assert_eq!(encode_motion(None), "");
    }

    #[test]
    fn test_decode_reference_token() {
        let motion = decode_motion("soweiic0p", HandRole::Primary)
            .unwrap()
            .expect("token should decode to a present motion");
        assert_eq!(motion, pro_motion());
    }

    #[test]
    fn test_round_trip_all_motion_types() {
        for mt in MotionType::all_variants() {
            let mut m = pro_motion();
            m.motion_type = *mt;
            let token = encode_motion(Some(&m));
            let decoded = decode_motion(&token, HandRole::Primary).unwrap().unwrap();
            assert_eq!(decoded, m, "round trip failed for {:?}", mt);
        }
    }

    #[test]
    fn test_float_turns_sentinel() {
        let motion = decode_motion("soweiicfp", HandRole::Primary).unwrap().unwrap();
        assert_eq!(motion.turns, Turns::Float);
        assert_eq!(motion.motion_type, MotionType::Pro);

        let reencoded = encode_motion(Some(&motion));
        assert_eq!(reencoded, "soweiicfp", "float sentinel must re-encode as literal f");
    }

    #[test]
    fn test_float_turns_with_float_type() {
        // Both the sentinel and the motion type use the letter f; the
        // forced first turns character keeps them apart.
        let motion = decode_motion("soweiinff", HandRole::Secondary).unwrap().unwrap();
        assert_eq!(motion.turns, Turns::Float);
        assert_eq!(motion.motion_type, MotionType::Float);
        assert_eq!(encode_motion(Some(&motion)), "soweiinff");
    }

    #[test]
    fn test_multi_digit_turns() {
        let motion = decode_motion("soweiic12p", HandRole::Primary).unwrap().unwrap();
        assert_eq!(motion.turns, Turns::Count(12));
        assert_eq!(encode_motion(Some(&motion)), "soweiic12p");
    }

    #[test]
    fn test_short_tokens_decode_to_absent() {
        // Anything under the minimum length is absence, never an error
        for token in ["", "s", "sowe", "soweiic0"] {
            let decoded = decode_motion(token, HandRole::Primary).unwrap();
            assert!(decoded.is_none(), "{:?} should decode to absent", token);
        }
    }

    #[test]
    fn test_invalid_location_reports_field() {
        let err = decode_motion("zzweiic0p", HandRole::Primary).unwrap_err();
        match err {
            CodecError::MalformedMotion { field, code, .. } => {
                assert_eq!(field, "start_loc");
                assert_eq!(code, "zz");
            }
            other => panic!("expected MalformedMotion, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_orientation_reports_field() {
        let err = decode_motion("sowezic0p", HandRole::Primary).unwrap_err();
        match err {
            CodecError::MalformedMotion { field, .. } => assert_eq!(field, "start_ori"),
            other => panic!("expected MalformedMotion, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_motion_type_is_error() {
        // Nine chars, but nothing after the forced turns character is a
        // motion-type letter.
        let err = decode_motion("soweiic00", HandRole::Primary).unwrap_err();
        match err {
            CodecError::MalformedMotion { field, .. } => assert_eq!(field, "motion_type"),
            other => panic!("expected MalformedMotion, got {:?}", other),
        }
    }

    #[test]
    fn test_non_digit_turns_run_is_error() {
        // First turns character is 'p' (forced into the run), stop is the
        // final 'p'; the run "p" is neither digits nor the sentinel.
        let err = decode_motion("soweiicpp", HandRole::Primary).unwrap_err();
        match err {
            CodecError::MalformedMotion { field, .. } => assert_eq!(field, "turns"),
            other => panic!("expected MalformedMotion, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_bytes_after_motion_type() {
        let err = decode_motion("soweiic0p0", HandRole::Primary).unwrap_err();
        match err {
            CodecError::MalformedMotion { field, .. } => assert_eq!(field, "motion_type"),
            other => panic!("expected MalformedMotion, got {:?}", other),
        }
    }

    #[test]
    fn test_turns_parse() {
        assert_eq!(Turns::parse("0"), Some(Turns::Count(0)));
        assert_eq!(Turns::parse("3"), Some(Turns::Count(3)));
        assert_eq!(Turns::parse("12"), Some(Turns::Count(12)));
        assert_eq!(Turns::parse("f"), Some(Turns::Float));
        assert_eq!(Turns::parse(""), None);
        assert_eq!(Turns::parse("ff"), None);
        assert_eq!(Turns::parse("1f"), None);
    }
}
