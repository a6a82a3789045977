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

//! Property-based and file-level tests for the comparator.

use proptest::prelude::*;
use stateval_stream::{compare, compare_files, ValueEncoding, ValueStream};
use stateval_test::{b1_scenario, marked_export, B1_APPROX_EXPORT, B1_EXACT_EXPORT};
use std::io::Cursor;

fn stream(values: &[f64]) -> ValueStream<Cursor<String>> {
    ValueStream::new(Cursor::new(marked_export(values)), ValueEncoding::Marked)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: the pass never pairs more values than the shorter stream holds.
    #[test]
    fn prop_count_bounded_by_shorter_stream(
        approx in prop::collection::vec(0.0f64..1.0, 0..50),
        exact in prop::collection::vec(0.0f64..1.0, 0..50),
    ) {
        let mut a = stream(&approx);
        let mut r = stream(&exact);
        let result = compare(&mut a, Some(&mut r)).unwrap();
        prop_assert!(result.referenced_count <= approx.len().min(exact.len()));
    }

    /// Property: values above the threshold cut the pass short.
    #[test]
    fn prop_threshold_terminates(
        prefix in prop::collection::vec(0.01f64..1.0, 0..20),
        suffix in prop::collection::vec(0.01f64..1.0, 0..20),
    ) {
        let mut approx = prefix.clone();
        approx.push(2.0);
        approx.extend(suffix.iter().copied());

        let mut a = stream(&approx);
        let result = compare::<_, Cursor<String>>(&mut a, None).unwrap();
        prop_assert_eq!(result.referenced_count, prefix.len());
        prop_assert!(result.approximate_residual);
    }

    /// Property: comparing a distribution with itself yields no error.
    #[test]
    fn prop_self_comparison_exact(values in prop::collection::vec(0.0f64..1.0, 0..50)) {
        let mut a = stream(&values);
        let mut r = stream(&values);
        let result = compare(&mut a, Some(&mut r)).unwrap();
        prop_assert_eq!(result.max_absolute_error, 0.0);
        prop_assert_eq!(result.max_relative_error, 0.0);
        prop_assert!(!result.has_residual());
    }

    /// Property: errors are never negative or NaN.
    #[test]
    fn prop_errors_finite_non_negative(
        approx in prop::collection::vec(0.0f64..1.5, 0..30),
        exact in prop::collection::vec(prop_oneof![Just(0.0), 0.001f64..1.0], 0..30),
    ) {
        let mut a = stream(&approx);
        let mut r = stream(&exact);
        let result = compare(&mut a, Some(&mut r)).unwrap();
        for value in [
            result.max_absolute_error,
            result.max_relative_error,
            result.sum_absolute_error,
            result.sum_relative_error,
        ] {
            prop_assert!(value.is_finite() && value >= 0.0);
        }
    }
}

#[test]
fn test_compare_files_in_run_dir() {
    let run = b1_scenario().unwrap();
    let result = compare_files(
        &run.join(B1_APPROX_EXPORT),
        Some(&run.join(B1_EXACT_EXPORT)),
        ValueEncoding::Marked,
    )
    .unwrap();
    assert_eq!(result.referenced_count, 3);
    assert!(result.reference_supplied);
    assert!(result.max_relative_error > 0.001);
}
