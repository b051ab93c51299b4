use super::*;
use super::pipeline::map_ranges;
use proptest::prelude::*;

fn range(start: i64, length: i64) -> Range {
    Range::new(start, length).unwrap()
}

fn rule(dest: i64, source: i64, length: i64) -> MappingRule {
    MappingRule::new(dest, source, length).unwrap()
}

/// Every value in `ranges`, mapped or not, sorted
fn expand(ranges: &[Range]) -> Vec<i64> {
    let mut values: Vec<i64> = ranges.iter().flat_map(Range::values).collect();
    values.sort_unstable();
    values
}

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn test_range_rejects_empty_and_negative_length() {
    assert_eq!(
        Range::new(5, 0),
        Err(RemapError::EmptyRange { start: 5, length: 0 })
    );
    assert!(Range::new(5, -3).is_err());
}

#[test]
fn test_range_rejects_end_overflow() {
    assert_eq!(
        Range::new(i64::MAX, 1),
        Err(RemapError::EndOverflow {
            start: i64::MAX,
            length: 1
        })
    );
    assert!(Range::new(i64::MAX - 1, 1).is_ok());
}

#[test]
fn test_rule_rejects_bad_definitions() {
    assert!(MappingRule::new(0, 0, 0).is_err());
    assert!(MappingRule::new(i64::MAX, 0, 2).is_err());
    assert!(matches!(
        MappingRule::new(i64::MAX - 10, i64::MIN, 1),
        Err(RemapError::OffsetOverflow { .. })
    ));
}

#[test]
fn test_rule_accessors() {
    let r = rule(52, 50, 48);
    assert_eq!(r.source(), range(50, 48));
    assert_eq!(r.offset(), 2);
    assert_eq!(r.translate(50), Some(52));
    assert_eq!(r.translate(97), Some(99));
    assert_eq!(r.translate(98), None);
    assert_eq!(r.translate(49), None);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_overlap_classification() {
    // source [10, 20)
    let r = rule(100, 10, 10);

    assert_eq!(r.overlap(range(0, 10)), Overlap::Disjoint);
    assert_eq!(r.overlap(range(20, 5)), Overlap::Disjoint);
    assert_eq!(r.overlap(range(10, 10)), Overlap::Contained);
    assert_eq!(r.overlap(range(12, 3)), Overlap::Contained);
    assert_eq!(r.overlap(range(5, 20)), Overlap::Encloses);
    assert_eq!(r.overlap(range(15, 10)), Overlap::Right);
    assert_eq!(r.overlap(range(10, 11)), Overlap::Right);
    assert_eq!(r.overlap(range(5, 10)), Overlap::Left);
    assert_eq!(r.overlap(range(9, 11)), Overlap::Left);
}

// ============================================================================
// Stage
// ============================================================================

#[test]
fn test_split_disjoint_passes_through() {
    let stage = Stage::new(vec![rule(50, 98, 2)]);
    assert_eq!(stage.split_range(range(79, 14)), vec![range(79, 14)]);
}

#[test]
fn test_split_contained_shifts_whole_range() {
    let stage = Stage::new(vec![rule(52, 50, 48)]);
    assert_eq!(stage.split_range(range(55, 13)), vec![range(57, 13)]);
}

#[test]
fn test_split_enclosed_rule_cuts_three_ways() {
    let stage = Stage::new(vec![rule(0, 14, 3)]);
    assert_eq!(
        stage.split_range(range(10, 10)),
        vec![range(10, 4), range(0, 3), range(17, 3)]
    );
}

#[test]
fn test_split_right_and_left_partials() {
    // source [10, 20) -> [100, 110)
    let stage = Stage::new(vec![rule(100, 10, 10)]);
    assert_eq!(
        stage.split_range(range(15, 10)),
        vec![range(105, 5), range(20, 5)]
    );
    assert_eq!(
        stage.split_range(range(5, 10)),
        vec![range(5, 5), range(100, 5)]
    );
}

#[test]
fn test_split_residual_reaches_later_rule() {
    // [0, 30) crosses both rules; the left leftover of the first rule is
    // picked up by the second
    let stage = Stage::new(vec![rule(100, 10, 10), rule(200, 0, 10)]);
    assert_eq!(
        stage.split_range(range(0, 30)),
        vec![range(200, 10), range(100, 10), range(20, 10)]
    );
}

#[test]
fn test_empty_stage_is_identity() {
    let stage = Stage::default();
    assert_eq!(stage.split_range(range(-5, 3)), vec![range(-5, 3)]);
    assert_eq!(stage.lookup_point(-5), -5);
}

#[test]
fn test_lookup_first_rule_wins() {
    let stage = Stage::new(vec![rule(100, 0, 10), rule(200, 5, 10)]);
    assert_eq!(stage.lookup_point(7), 107);
    assert_eq!(stage.lookup_point(12), 207);
    assert_eq!(stage.lookup_point(20), 20);
}

#[test]
fn test_find_overlap() {
    let disjoint: Stage = [rule(0, 10, 5), rule(0, 0, 10), rule(0, 15, 1)]
        .into_iter()
        .collect();
    assert_eq!(disjoint.find_overlap(), None);

    let overlapping = Stage::new(vec![rule(0, 20, 5), rule(0, 0, 10), rule(0, 9, 3)]);
    assert_eq!(overlapping.find_overlap(), Some((1, 2)));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_no_stages_returns_min_input_start() {
    let ranges = [range(79, 14), range(55, 13)];
    assert_eq!(run_pipeline(&ranges, &[]), Some(55));
    assert_eq!(lookup_point(42, &[]), 42);
}

#[test]
fn test_empty_input_has_no_minimum() {
    let stages = [Stage::new(vec![rule(0, 0, 10)])];
    assert_eq!(run_pipeline(&[], &stages), None);
}

#[test]
fn test_pipeline_chains_stages() {
    let pipeline: Pipeline = [
        Stage::new(vec![rule(50, 98, 2), rule(52, 50, 48)]),
        Stage::new(vec![rule(0, 15, 37), rule(37, 52, 2), rule(39, 0, 15)]),
    ]
    .into_iter()
    .collect();

    assert_eq!(pipeline.stages().len(), 2);
    // 79 -> 81 -> 81, 14 -> 14 -> 53, 55 -> 57 -> 57, 13 -> 13 -> 52
    assert_eq!(pipeline.lookup_point(79), 81);
    assert_eq!(pipeline.lookup_point(14), 53);
    assert_eq!(pipeline.run(&[range(79, 14), range(55, 13)]), Some(57));
    assert_eq!(
        expand(&map_ranges(&[range(13, 2)], pipeline.stages())),
        vec![52, 53]
    );
}

// ============================================================================
// Properties
// ============================================================================

fn arb_range() -> impl Strategy<Value = Range> {
    (-500i64..500, 1i64..120).prop_map(|(start, length)| range(start, length))
}

/// Rules anywhere, possibly overlapping
fn arb_rule() -> impl Strategy<Value = MappingRule> {
    (-1000i64..1000, -600i64..600, 1i64..80)
        .prop_map(|(dest, source, length)| rule(dest, source, length))
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop::collection::vec(arb_rule(), 0..6).prop_map(Stage::new)
}

/// Disjoint sources below 1000, disjoint destinations at 10_000 and up,
/// shuffled into arbitrary authored order
fn arb_injective_stage() -> impl Strategy<Value = Stage> {
    prop::collection::vec((0i64..40, 1i64..60), 0..6)
        .prop_map(|spans| {
            let mut source = -600;
            let mut dest = 10_000;
            spans
                .into_iter()
                .map(|(gap, length)| {
                    source += gap;
                    let r = rule(dest, source, length);
                    source += length;
                    dest += length + 1;
                    r
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .prop_map(Stage::new)
}

proptest! {
    #[test]
    fn prop_split_covers_exactly_the_mapped_values(stage in arb_stage(), input in arb_range()) {
        let output = stage.split_range(input);

        let mut expected: Vec<i64> = input.values().map(|v| stage.lookup_point(v)).collect();
        expected.sort_unstable();
        prop_assert_eq!(expand(&output), expected);
    }

    #[test]
    fn prop_split_preserves_total_length(stage in arb_stage(), input in arb_range()) {
        let total: i64 = stage.split_range(input).iter().map(Range::length).sum();
        prop_assert_eq!(total, input.length());
    }

    #[test]
    fn prop_split_never_yields_empty_ranges(stage in arb_stage(), input in arb_range()) {
        for piece in stage.split_range(input) {
            prop_assert!(piece.length() > 0);
        }
    }

    #[test]
    fn prop_single_point_matches_lookup(stage in arb_stage(), value in -700i64..700) {
        let output = stage.split_range(range(value, 1));
        prop_assert_eq!(output, vec![range(stage.lookup_point(value), 1)]);
    }

    #[test]
    fn prop_injective_stage_outputs_are_disjoint(
        stage in arb_injective_stage(),
        input in arb_range(),
    ) {
        prop_assert_eq!(stage.find_overlap(), None);

        let mut output = stage.split_range(input);
        output.sort();
        for pair in output.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start(), "{} overlaps {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_range_outside_every_rule_is_unchanged(
        stage in arb_injective_stage(),
        start in 2000i64..5000,
        length in 1i64..100,
    ) {
        let input = range(start, length);
        prop_assert_eq!(stage.split_range(input), vec![input]);
    }

    #[test]
    fn prop_pipeline_minimum_matches_pointwise_minimum(
        stages in prop::collection::vec(arb_stage(), 0..4),
        inputs in prop::collection::vec(arb_range(), 1..4),
    ) {
        let expected = inputs
            .iter()
            .flat_map(Range::values)
            .map(|v| lookup_point(v, &stages))
            .min();
        prop_assert_eq!(run_pipeline(&inputs, &stages), expected);
    }
}
