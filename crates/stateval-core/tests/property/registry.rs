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

//! Property-based tests for the benchmark registry.

use proptest::prelude::*;
use stateval_core::{BenchmarkRegistry, ExperimentRecord, StructureCounts};
use std::collections::HashSet;

fn record_for(name: &str, tool: usize, states: u64) -> ExperimentRecord {
    let mut record = ExperimentRecord::new(name);
    record.tool = format!("tool{}", tool);
    record.structure = StructureCounts::new(states, 1, 1, 0);
    record
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: resolving any sequence of records yields one benchmark per name.
    #[test]
    fn prop_one_benchmark_per_name(
        names in prop::collection::vec("[a-e]{1,2}", 0..60),
    ) {
        let mut registry = BenchmarkRegistry::new();
        for (i, name) in names.iter().enumerate() {
            registry.resolve(record_for(name, i, i as u64 + 1));
        }

        let distinct: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(registry.len(), distinct.len());
        prop_assert_eq!(registry.record_count(), names.len());

        for benchmark in registry.iter() {
            let expected = names.iter().filter(|n| n.as_str() == benchmark.name()).count();
            prop_assert_eq!(benchmark.experiments().len(), expected);
            for record in benchmark.experiments() {
                prop_assert_eq!(&record.benchmark_name, benchmark.name());
            }
        }
    }

    /// Property: the first record of a name seeds the structure for all later ones.
    #[test]
    fn prop_first_record_seeds_structure(
        names in prop::collection::vec("[a-c]", 1..40),
    ) {
        let mut registry = BenchmarkRegistry::new();
        for (i, name) in names.iter().enumerate() {
            registry.resolve(record_for(name, i, i as u64 + 1));
        }

        for benchmark in registry.iter() {
            let first = names.iter().position(|n| n.as_str() == benchmark.name()).unwrap();
            prop_assert_eq!(benchmark.states(), first as u64 + 1);
            for record in benchmark.experiments() {
                prop_assert_eq!(record.structure, benchmark.structure());
            }
        }
    }

    /// Property: records() replays ingestion order.
    #[test]
    fn prop_records_in_ingestion_order(
        names in prop::collection::vec("[a-d]", 0..40),
    ) {
        let mut registry = BenchmarkRegistry::new();
        for (i, name) in names.iter().enumerate() {
            registry.resolve(record_for(name, i, 1));
        }

        let tools: Vec<String> = registry.records().map(|r| r.tool.clone()).collect();
        let expected: Vec<String> = (0..names.len()).map(|i| format!("tool{}", i)).collect();
        prop_assert_eq!(tools, expected);
    }
}
