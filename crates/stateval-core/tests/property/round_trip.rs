// Stateval - Stationary Distribution Benchmark Evaluation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Property-based tests for plain-format persistence.

use proptest::prelude::*;
use stateval_core::{
    parse_record_str, record_to_string, ErrorMetrics, ExperimentRecord, RecordFormat,
    StructureCounts,
};

fn identity() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9][a-z0-9.-]{0,15}".prop_filter("null is reserved", |s| s != "null"),
    ]
}

fn path() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z][a-z0-9/._-]{0,30}".prop_filter("null is reserved", |s| s != "null"))
}

fn value() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(-15.0), -1.0e9f64..1.0e9, 1.0e-12f64..1.0e-3]
}

prop_compose! {
    fn arb_record()(
        ids in (identity(), identity(), identity(), identity(), identity()),
        times in (value(), value()),
        flags in (any::<bool>(), any::<bool>()),
        paths in (path(), path()),
        counts in (0u64..1_000_000, 0u64..1000, 0u64..1000, 0u64..1_000_000),
        reachable in 0u64..1_000_000,
        errors in (value(), value(), value(), value()),
    ) -> ExperimentRecord {
        ExperimentRecord {
            tool: ids.0,
            configuration_id: ids.1,
            solver_id: ids.2,
            precision: ids.3,
            benchmark_name: ids.4,
            wall_clock_time: times.0,
            mc_time: times.1,
            timeout: flags.0,
            execution_error: flags.1,
            export_value_file: paths.0,
            log: paths.1,
            structure: StructureCounts::new(counts.0, counts.1, counts.2, counts.3),
            reachable_recurrent_states: reachable,
            errors: ErrorMetrics {
                max_absolute: errors.0,
                max_relative: errors.1,
                average_absolute: errors.2,
                average_relative: errors.3,
            },
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: parse(write(r)) == r for every field.
    #[test]
    fn prop_plain_round_trip(record in arb_record()) {
        let text = record_to_string(&record).unwrap();
        let parsed = parse_record_str(&text, RecordFormat::Plain).unwrap();
        prop_assert_eq!(parsed, record);
    }

    /// Property: every value is a single token.
    #[test]
    fn prop_one_token_per_value(record in arb_record()) {
        let text = record_to_string(&record).unwrap();
        for line in text.lines() {
            prop_assert_eq!(line.split_whitespace().count(), 2, "line {:?}", line);
        }
    }
}
