//! Property-based tests over arbitrary raw records.
//!
//! Raw records are built from the real field names with values of every JSON shape the
//! sources have been seen to contain: numbers, numeric strings with units, junk strings,
//! booleans and nulls.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    use crate::{
        common::round_tenth,
        compare::{compare, Metric, Winner},
        record::{normalize, ProcessorRecord},
        result::ComparisonResult,
        score::ComponentScores,
    };

    const FIELDS: &[&str] = &[
        "name",
        "manufacturer",
        "frequency",
        "numCores",
        "numThreads",
        "fabProcess",
        "gpuCores",
        "gpuClock",
        "l2Cache",
        "l3Cache",
        "maxMemorySize",
        "memoryChannels",
        "architecture",
        "launchDate",
        "dieSize",
        "memoryType",
        "gpuName",
        "gpuArchitecture",
    ];

    fn raw_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            (0u32..200).prop_map(Value::from),
            (-50i64..50).prop_map(Value::from),
            (0.0f64..5000.0).prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            "[0-9]{1,4}(\\.[0-9]{1,3})?( GHz| nm| MB)?".prop_map(Value::from),
            ".{0,12}".prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            Just(Value::Null),
        ]
    }

    fn raw_record() -> impl Strategy<Value = Value> {
        proptest::collection::vec((proptest::sample::select(FIELDS), raw_value()), 0..24).prop_map(
            |entries| {
                let map: Map<String, Value> = entries
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect();
                Value::Object(map)
            },
        )
    }

    /// Anything a source might hold in place of a record object.
    fn raw_non_object() -> impl Strategy<Value = Value> {
        prop_oneof![
            raw_value(),
            proptest::collection::vec(raw_value(), 0..20).prop_map(Value::Array),
        ]
    }

    fn record() -> impl Strategy<Value = ProcessorRecord> {
        raw_record().prop_map(|raw| normalize(&raw))
    }

    fn in_range(value: f64) -> bool {
        (0.0..=100.0).contains(&value)
    }

    fn one_decimal(value: f64) -> bool {
        round_tenth(value) == value
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn component_scores_in_range(record in record()) {
            let scores = ComponentScores::of(&record);
            for value in [scores.cpu, scores.gpu, scores.memory, scores.efficiency, scores.cache].iter() {
                prop_assert!(in_range(*value), "score {} out of range for {:?}", value, record);
                prop_assert!(one_decimal(*value), "score {} not rounded", value);
            }
        }

        #[test]
        fn performance_index_matches_weights(record in record()) {
            let s = ComponentScores::of(&record);
            let index = s.performance_index();
            let expected = round_tenth(
                (0.40 * s.cpu + 0.30 * s.gpu + 0.15 * s.memory + 0.10 * s.efficiency + 0.05 * s.cache)
                    .clamp(0.0, 100.0),
            );
            prop_assert!(in_range(index));
            prop_assert_eq!(index, expected);
        }

        #[test]
        fn normalized_numbers_are_defined(raw in raw_record()) {
            let record = normalize(&raw);
            prop_assert!(record.frequency.is_finite() && record.frequency >= 0.0);
            prop_assert!(record.gpu_clock.is_finite() && record.gpu_clock >= 0.0);
            prop_assert!(record.fab_process > 0);
        }

        #[test]
        fn non_objects_normalize_to_default(raw in raw_non_object()) {
            prop_assert_eq!(normalize(&raw), ProcessorRecord::default());
        }

        #[test]
        fn normalize_is_idempotent(raw in raw_record()) {
            let once = normalize(&raw);
            let value = serde_json::to_value(&once).unwrap();
            let twice = normalize(&value);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn category_wins_add_up(a in record(), b in record()) {
            let result = compare(&a, &b);
            prop_assert!(result.wins_a + result.wins_b <= Metric::ALL.len());
            prop_assert_eq!(result.wins_a + result.wins_b + result.ties(), Metric::ALL.len());
            prop_assert_eq!(result.breakdown.len(), Metric::ALL.len());
            for outcome in result.breakdown.iter() {
                if outcome.winner == Winner::Tie {
                    prop_assert_eq!(outcome.difference, 0.0);
                } else {
                    prop_assert!(outcome.difference > 0.0);
                }
            }
        }

        #[test]
        fn comparison_is_symmetric(a in record(), b in record()) {
            let ab = ComparisonResult::build(&a, &b);
            let ba = ComparisonResult::build(&b, &a);
            prop_assert_eq!(ab.category_wins_a(), ba.category_wins_b());
            prop_assert_eq!(ab.category_wins_b(), ba.category_wins_a());
            prop_assert_eq!(ab.winner(), ba.winner().swapped());
            prop_assert_eq!(ab.category_leader(), ba.category_leader().swapped());
            for (x, y) in ab.breakdown().iter().zip(ba.breakdown().iter()) {
                prop_assert_eq!(x.metric, y.metric);
                prop_assert_eq!(x.winner, y.winner.swapped());
                prop_assert_eq!(x.difference, y.difference);
            }
        }

        #[test]
        fn record_against_itself_ties(a in record()) {
            let result = ComparisonResult::build(&a, &a.clone());
            prop_assert_eq!(result.winner(), Winner::Tie);
            prop_assert_eq!(result.ties(), Metric::ALL.len());
        }
    }
}
