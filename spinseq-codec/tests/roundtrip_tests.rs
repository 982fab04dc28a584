//! End-to-end round-trip tests for the sequence codec
//!
//! Exercises the full stack — motion/beat/sequence codecs, compression
//! layer, and URL binder — against the wire-format reference tokens and
//! the legacy-format migration path.

use spinseq_codec::{
    build_share_url, compress_sequence, decode_sequence, decompress_sequence, encode_sequence,
    parse_share_url, Beat, CodecError, GridLocation, HandRole, Motion, MotionType, Orientation,
    RotationDirection, Sequence, Turns, COMPRESSION_TAG,
};

fn motion(color: HandRole) -> Motion {
    Motion {
        motion_type: MotionType::Pro,
        start_loc: GridLocation::South,
        end_loc: GridLocation::West,
        start_ori: Orientation::In,
        end_ori: Orientation::In,
        rotation: RotationDirection::Clockwise,
        turns: Turns::Count(0),
        color,
    }
}

fn two_hand_beat(number: u32) -> Beat {
    Beat::new(
        number,
        Some(motion(HandRole::Primary)),
        Some(motion(HandRole::Secondary)),
    )
}

/// Build a sequence that exercises every alphabet variant at least once
fn varied_sequence() -> Sequence {
    let locations = GridLocation::all_variants();
    let orientations = Orientation::all_variants();
    let rotations = RotationDirection::all_variants();
    let types = MotionType::all_variants();
    let turns = [
        Turns::Count(0),
        Turns::Count(1),
        Turns::Count(2),
        Turns::Count(3),
        Turns::Float,
        Turns::Count(12),
    ];

    let beats = (0..12u32)
        .map(|i| {
            let idx = i as usize;
            let primary = Motion {
                motion_type: types[idx % types.len()],
                start_loc: locations[idx % locations.len()],
                end_loc: locations[(idx + 3) % locations.len()],
                start_ori: orientations[idx % orientations.len()],
                end_ori: orientations[(idx + 1) % orientations.len()],
                rotation: rotations[idx % rotations.len()],
                turns: turns[idx % turns.len()],
                color: HandRole::Primary,
            };
            let secondary = Motion {
                motion_type: types[(idx + 2) % types.len()],
                start_loc: locations[(idx + 5) % locations.len()],
                end_loc: locations[(idx + 1) % locations.len()],
                start_ori: orientations[(idx + 2) % orientations.len()],
                end_ori: orientations[(idx + 3) % orientations.len()],
                rotation: rotations[(idx + 1) % rotations.len()],
                turns: turns[(idx + 3) % turns.len()],
                color: HandRole::Secondary,
            };
            Beat::new(i + 1, Some(primary), Some(secondary))
        })
        .collect();

    Sequence::normalized(Some(two_hand_beat(0)), beats)
}

#[test]
fn reference_beat_token_round_trips() {
    // Scenario 1: the canonical two-hand pro beat
    let seq = Sequence::new(vec![two_hand_beat(1)]);
    let token = encode_sequence(&seq);
    assert_eq!(token, ":|soweiic0p:soweiic0p");

    let decoded = decode_sequence(&token).unwrap();
    assert_eq!(decoded.beats[0].primary, Some(motion(HandRole::Primary)));
    assert_eq!(decoded.beats[0].secondary, Some(motion(HandRole::Secondary)));
}

#[test]
fn start_position_never_counts_toward_length() {
    // Scenario 2
    let seq = Sequence::new(vec![two_hand_beat(1)]);
    let decoded = decode_sequence(&encode_sequence(&seq)).unwrap();
    assert_eq!(decoded.len(), 1);
}

#[test]
fn legacy_format_migrates_on_decode() {
    // Scenario 3
    let decoded = decode_sequence("3|soweiic0p:soweiic0p").unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.beats[0].beat_number, 3);
    assert_eq!(decoded.beats[0].primary, Some(motion(HandRole::Primary)));
    assert!(decoded.start_position.unwrap().is_blank());
}

#[test]
fn float_turns_round_trip_literal_f() {
    // Scenario 4
    let mut float_motion = motion(HandRole::Primary);
    float_motion.turns = Turns::Float;
    let seq = Sequence::new(vec![Beat::new(1, Some(float_motion.clone()), None)]);

    let token = encode_sequence(&seq);
    assert!(token.contains("soweiicfp"));

    let decoded = decode_sequence(&token).unwrap();
    assert_eq!(decoded.beats[0].primary, Some(float_motion));
}

#[test]
fn share_url_without_open_param_is_none() {
    // Scenario 5
    let parsed = parse_share_url("https://example.app/?theme=dark").unwrap();
    assert!(parsed.is_none());
}

#[test]
fn full_round_trip_preserves_every_field() {
    let seq = varied_sequence();
    let decoded = decode_sequence(&encode_sequence(&seq)).unwrap();

    assert_eq!(decoded.len(), seq.len());
    for (original, restored) in seq.beats.iter().zip(decoded.beats.iter()) {
        for (a, b) in [
            (&original.primary, &restored.primary),
            (&original.secondary, &restored.secondary),
        ] {
            match (a, b) {
                (Some(x), Some(y)) => {
                    assert_eq!(x.motion_type, y.motion_type);
                    assert_eq!(x.start_loc, y.start_loc);
                    assert_eq!(x.end_loc, y.end_loc);
                    assert_eq!(x.start_ori, y.start_ori);
                    assert_eq!(x.end_ori, y.end_ori);
                    assert_eq!(x.rotation, y.rotation);
                    assert_eq!(x.turns, y.turns);
                    assert_eq!(x.color, y.color);
                }
                (None, None) => {}
                _ => panic!("presence mismatch at beat {}", original.beat_number),
            }
        }
    }
}

#[test]
fn compression_idempotence_regardless_of_choice() {
    for seq in [Sequence::new(vec![two_hand_beat(1)]), varied_sequence()] {
        let compressed = compress_sequence(&seq);
        let restored = decompress_sequence(&compressed.payload).unwrap();
        assert_eq!(restored.beats, seq.beats);
    }
}

#[test]
fn compression_monotonicity() {
    for seq in [Sequence::new(vec![two_hand_beat(1)]), varied_sequence()] {
        let raw = encode_sequence(&seq);
        let compressed = compress_sequence(&seq);
        if compressed.is_compressed {
            assert!(compressed.payload.len() < raw.len());
            assert!(compressed.payload.starts_with(COMPRESSION_TAG));
        } else {
            assert_eq!(compressed.payload, raw);
        }
    }
}

#[test]
fn current_format_first_segment_never_digits_only() {
    let token = encode_sequence(&varied_sequence());
    let first = token.split('|').next().unwrap();
    assert!(
        first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit()),
        "first segment {:?} must not be mistaken for a legacy header",
        first
    );
    assert!(first.contains(':'), "encoded beats always carry a colon");
}

#[test]
fn share_link_round_trip_through_url() {
    let seq = varied_sequence();
    let link = build_share_url("https://example.app", "editor", &seq).unwrap();

    let deep = parse_share_url(&link.url).unwrap().expect("link carries a sequence");
    assert_eq!(deep.module_alias, "editor");
    assert_eq!(deep.sequence.beats, seq.beats);
}

#[test]
fn sequence_json_round_trips_without_resolver_fields() {
    let seq = varied_sequence();
    let json = serde_json::to_string(&seq).unwrap();
    assert!(
        !json.contains("letter") && !json.contains("grid_position"),
        "unresolved collaborator fields stay out of the JSON shape"
    );

    let restored: Sequence = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, seq);
}

#[test]
fn corrupted_links_report_errors_not_wrong_sequences() {
    // Truncated motion token inside an otherwise valid sequence
    let err = decode_sequence(":|soweiic0p:soweiic0pzz").unwrap_err();
    assert!(matches!(err, CodecError::MalformedMotion { .. }));

    // Tagged payload with a broken frame
    let err = decompress_sequence("z:AAAA").unwrap_err();
    assert!(matches!(err, CodecError::DecompressionFailed(_)));
}
