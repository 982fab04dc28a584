//! Seeded random sequence generation for batch verification
//!
//! Produces structurally valid sequences covering the whole alphabet
//! space: every location, orientation, rotation, motion type, and turns
//! form (including the float sentinel and multi-digit counts) shows up
//! under enough samples. Seeded randomness keeps batch runs
//! reproducible, so a failing sequence can be regenerated exactly from
//! its seed and index.

use rand::Rng;

use spinseq_codec::{
    Beat, GridLocation, HandRole, Motion, MotionType, Orientation, RotationDirection, Sequence,
    Turns,
};

/// Generate one random sequence with up to `max_beats` beats
///
/// Roughly one hand in ten sits out a beat, so absent-motion encoding
/// (and the occasional fully blank beat) stays exercised.
pub fn random_sequence(rng: &mut impl Rng, max_beats: usize) -> Sequence {
    let beat_count = rng.gen_range(1..=max_beats.max(1));
    let start_position = Beat::new(
        0,
        maybe_motion(rng, HandRole::Primary, 0.9),
        maybe_motion(rng, HandRole::Secondary, 0.9),
    );

    let beats = (1..=beat_count as u32)
        .map(|n| {
            Beat::new(
                n,
                maybe_motion(rng, HandRole::Primary, 0.9),
                maybe_motion(rng, HandRole::Secondary, 0.9),
            )
        })
        .collect();

    Sequence::normalized(Some(start_position), beats)
}

fn maybe_motion(rng: &mut impl Rng, color: HandRole, presence: f64) -> Option<Motion> {
    if rng.gen_bool(presence) {
        Some(random_motion(rng, color))
    } else {
        None
    }
}

fn random_motion(rng: &mut impl Rng, color: HandRole) -> Motion {
    Motion {
        motion_type: pick(rng, MotionType::all_variants()),
        start_loc: pick(rng, GridLocation::all_variants()),
        end_loc: pick(rng, GridLocation::all_variants()),
        start_ori: pick(rng, Orientation::all_variants()),
        end_ori: pick(rng, Orientation::all_variants()),
        rotation: pick(rng, RotationDirection::all_variants()),
        turns: random_turns(rng),
        color,
    }
}

fn random_turns(rng: &mut impl Rng) -> Turns {
    match rng.gen_range(0..6) {
        0..=3 => Turns::Count(rng.gen_range(0..=3)),
        4 => Turns::Float,
        // Occasional multi-digit count to exercise the variable-length scan
        _ => Turns::Count(rng.gen_range(10..=99)),
    }
}

fn pick<T: Copy>(rng: &mut impl Rng, variants: &[T]) -> T {
    variants[rng.gen_range(0..variants.len())]
}
