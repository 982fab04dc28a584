//! Round-trip verification harness for the sequence codec
//!
//! Drives the compression layer in both directions and compares the
//! original sequence against the restored one field by field, per hand,
//! per beat. The verifier never panics and never returns an error:
//! decode failures and mismatches are data in the report. It doubles as
//! the codec's acceptance-test harness and as a live in-app diagnostic.
//!
//! The batch variant yields cooperatively between sequences so a host
//! with a single UI thread stays responsive; this affects latency only,
//! never results, and a partially completed batch report is still
//! meaningful.

pub mod generator;

use serde::{Deserialize, Serialize};
use tracing::debug;

use spinseq_codec::{compress_sequence, decompress_sequence, Beat, Motion, Sequence};

/// One field that differed between original and restored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    /// Dotted path, e.g. `primary.turns`
    pub field: String,
    pub expected: String,
    pub actual: String,
}

/// Comparison outcome for one beat (start position included as beat 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatReport {
    pub beat_number: u32,
    pub passed: bool,
    pub mismatches: Vec<FieldMismatch>,
}

/// Full round-trip comparison report for one sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub passed: bool,
    /// Decode failure on the restore path, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_compressed: bool,
    /// Sequence-level mismatches (currently only `beat_count`)
    pub mismatches: Vec<FieldMismatch>,
    pub beats_compared: usize,
    pub beats_matching: usize,
    pub motions_compared: usize,
    pub motions_matching: usize,
    pub beats: Vec<BeatReport>,
}

impl VerifyReport {
    fn failed_decode(is_compressed: bool, error: String) -> Self {
        Self {
            passed: false,
            error: Some(error),
            is_compressed,
            mismatches: Vec::new(),
            beats_compared: 0,
            beats_matching: 0,
            motions_compared: 0,
            motions_matching: 0,
            beats: Vec::new(),
        }
    }
}

/// Aggregate report over a batch of sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub sequences_verified: usize,
    pub sequences_passed: usize,
    /// Fraction of sequences that round-tripped cleanly (0.0 to 1.0)
    pub pass_rate: f64,
    pub reports: Vec<VerifyReport>,
}

impl BatchReport {
    /// Reports for sequences that failed, paired with their batch index
    pub fn failures(&self) -> Vec<(usize, &VerifyReport)> {
        self.reports
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.passed)
            .collect()
    }
}

/// Round-trip one sequence through the compression layer and diff it
///
/// Pure comparison with no side effects: encode, decode back, compare.
/// A decode failure produces a failed report carrying the error text
/// rather than propagating it.
pub fn verify_sequence(sequence: &Sequence) -> VerifyReport {
    let original = Sequence::normalized(
        sequence.start_position.clone(),
        sequence.beats.clone(),
    );

    let compressed = compress_sequence(&original);
    let restored = match decompress_sequence(&compressed.payload) {
        Ok(seq) => seq,
        Err(e) => return VerifyReport::failed_decode(compressed.is_compressed, e.to_string()),
    };

    compare_sequences(&original, &restored, compressed.is_compressed)
}

/// Verify many sequences, yielding between each so a host UI thread is
/// never starved
///
/// Results are identical to calling [`verify_sequence`] in a loop; the
/// yield is a responsiveness accommodation only. Cancellation means
/// "stop polling the future" — no cleanup contract beyond that.
pub async fn verify_batch(sequences: &[Sequence]) -> BatchReport {
    let mut reports = Vec::with_capacity(sequences.len());
    for (index, sequence) in sequences.iter().enumerate() {
        let report = verify_sequence(sequence);
        if !report.passed {
            debug!(index, "sequence failed round-trip verification");
        }
        reports.push(report);
        tokio::task::yield_now().await;
    }

    let sequences_verified = reports.len();
    let sequences_passed = reports.iter().filter(|r| r.passed).count();
    let pass_rate = if sequences_verified == 0 {
        1.0
    } else {
        sequences_passed as f64 / sequences_verified as f64
    };

    BatchReport {
        sequences_verified,
        sequences_passed,
        pass_rate,
        reports,
    }
}

fn compare_sequences(original: &Sequence, restored: &Sequence, is_compressed: bool) -> VerifyReport {
    let mut mismatches = Vec::new();
    if original.len() != restored.len() {
        mismatches.push(FieldMismatch {
            field: "beat_count".to_string(),
            expected: original.len().to_string(),
            actual: restored.len().to_string(),
        });
    }

    let mut beats = Vec::new();
    let mut motions_compared = 0;
    let mut motions_matching = 0;

    // Start position: an absent original start encodes as a blank beat,
    // so compare against blank rather than flagging presence.
    let blank = Beat::blank_start_position();
    let original_start = original.start_position.as_ref().unwrap_or(&blank);
    let restored_start = restored.start_position.as_ref().unwrap_or(&blank);
    beats.push(compare_beats(
        original_start,
        restored_start,
        &mut motions_compared,
        &mut motions_matching,
    ));

    let paired = original.beats.len().min(restored.beats.len());
    for (original_beat, restored_beat) in original.beats.iter().zip(restored.beats.iter()) {
        beats.push(compare_beats(
            original_beat,
            restored_beat,
            &mut motions_compared,
            &mut motions_matching,
        ));
    }

    // When beat counts differ, the surplus side still gets per-beat
    // entries so the report stays fully diagnostic.
    for beat in original.beats.iter().skip(paired) {
        beats.push(surplus_beat(beat, SurplusSide::Original, &mut motions_compared));
    }
    for beat in restored.beats.iter().skip(paired) {
        beats.push(surplus_beat(beat, SurplusSide::Restored, &mut motions_compared));
    }

    let beats_compared = beats.len();
    let beats_matching = beats.iter().filter(|b| b.passed).count();
    let passed = mismatches.is_empty() && beats_matching == beats_compared;

    VerifyReport {
        passed,
        error: None,
        is_compressed,
        mismatches,
        beats_compared,
        beats_matching,
        motions_compared,
        motions_matching,
        beats,
    }
}

/// Which side of the comparison a surplus beat came from
#[derive(Clone, Copy)]
enum SurplusSide {
    Original,
    Restored,
}

/// Report entry for a beat that exists on only one side
///
/// Each present motion counts as compared-but-not-matching; a blank
/// surplus beat still fails with a whole-beat presence mismatch.
fn surplus_beat(beat: &Beat, side: SurplusSide, motions_compared: &mut usize) -> BeatReport {
    let (expected, actual) = match side {
        SurplusSide::Original => ("present", "absent"),
        SurplusSide::Restored => ("absent", "present"),
    };

    let mut mismatches = Vec::new();
    for (hand, motion) in [("primary", &beat.primary), ("secondary", &beat.secondary)] {
        if motion.is_some() {
            *motions_compared += 1;
            mismatches.push(FieldMismatch {
                field: hand.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    if mismatches.is_empty() {
        mismatches.push(FieldMismatch {
            field: "beat".to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    BeatReport {
        beat_number: beat.beat_number,
        passed: false,
        mismatches,
    }
}

fn compare_beats(
    original: &Beat,
    restored: &Beat,
    motions_compared: &mut usize,
    motions_matching: &mut usize,
) -> BeatReport {
    let mut mismatches = Vec::new();

    for (hand, expected, actual) in [
        ("primary", &original.primary, &restored.primary),
        ("secondary", &original.secondary, &restored.secondary),
    ] {
        match (expected, actual) {
            (None, None) => {}
            (Some(e), Some(a)) => {
                *motions_compared += 1;
                let before = mismatches.len();
                compare_motions(hand, e, a, &mut mismatches);
                if mismatches.len() == before {
                    *motions_matching += 1;
                }
            }
            (Some(_), None) => {
                *motions_compared += 1;
                mismatches.push(FieldMismatch {
                    field: hand.to_string(),
                    expected: "present".to_string(),
                    actual: "absent".to_string(),
                });
            }
            (None, Some(_)) => {
                *motions_compared += 1;
                mismatches.push(FieldMismatch {
                    field: hand.to_string(),
                    expected: "absent".to_string(),
                    actual: "present".to_string(),
                });
            }
        }
    }

    BeatReport {
        beat_number: original.beat_number,
        passed: mismatches.is_empty(),
        mismatches,
    }
}

fn compare_motions(hand: &str, expected: &Motion, actual: &Motion, out: &mut Vec<FieldMismatch>) {
    let mut check = |field: &str, e: String, a: String| {
        if e != a {
            out.push(FieldMismatch {
                field: format!("{}.{}", hand, field),
                expected: e,
                actual: a,
            });
        }
    };

    check(
        "motion_type",
        expected.motion_type.to_string(),
        actual.motion_type.to_string(),
    );
    check(
        "start_loc",
        expected.start_loc.to_string(),
        actual.start_loc.to_string(),
    );
    check("end_loc", expected.end_loc.to_string(), actual.end_loc.to_string());
    check(
        "start_ori",
        expected.start_ori.to_string(),
        actual.start_ori.to_string(),
    );
    check("end_ori", expected.end_ori.to_string(), actual.end_ori.to_string());
    check(
        "rotation",
        expected.rotation.to_string(),
        actual.rotation.to_string(),
    );
    check("turns", expected.turns.to_string(), actual.turns.to_string());
}
