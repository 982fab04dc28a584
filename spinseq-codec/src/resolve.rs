//! Collaborator interfaces for post-decode label resolution
//!
//! The codec round-trips motion fields only; human-readable letters and
//! resolved grid positions come from a downstream lookup service the
//! codec does not own. These traits model that seam: they are invoked
//! only after decode, and failures are non-fatal — an unresolved field
//! simply stays `None`.

use serde::{Deserialize, Serialize};

use crate::alphabet::GridLocation;
use crate::beat::Beat;
use crate::sequence::Sequence;

/// Grid interpretation mode used by letter lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    Diamond,
    Box,
}

/// Resolves a human-readable letter label for a decoded beat
pub trait LetterResolver {
    /// Label for the beat's motion pair, or `None` if unresolvable
    fn letter_for(&self, beat: &Beat, mode: GridMode) -> Option<String>;
}

/// Resolves a combined grid position from two hand locations
pub trait GridPositionResolver {
    /// Combined position name, or `None` if the pair has no mapping
    fn position_for(&self, primary: GridLocation, secondary: GridLocation) -> Option<String>;
}

/// Fill collaborator-owned fields on a freshly decoded sequence
///
/// Every beat (start position included) is offered to both resolvers.
/// A resolver returning `None` leaves the field untouched; nothing here
/// can fail the decode that produced the sequence.
pub fn annotate_sequence(
    sequence: &mut Sequence,
    mode: GridMode,
    letters: &dyn LetterResolver,
    positions: &dyn GridPositionResolver,
) {
    if let Some(start) = sequence.start_position.as_mut() {
        annotate_beat(start, mode, letters, positions);
    }
    for beat in sequence.beats.iter_mut() {
        annotate_beat(beat, mode, letters, positions);
    }
}

fn annotate_beat(
    beat: &mut Beat,
    mode: GridMode,
    letters: &dyn LetterResolver,
    positions: &dyn GridPositionResolver,
) {
    if beat.letter.is_none() {
        beat.letter = letters.letter_for(beat, mode);
    }
    if beat.grid_position.is_none() {
        if let (Some(primary), Some(secondary)) = (&beat.primary, &beat.secondary) {
            beat.grid_position = positions.position_for(primary.end_loc, secondary.end_loc);
        }
    }
}
