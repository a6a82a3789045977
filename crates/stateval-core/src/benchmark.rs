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

//! Benchmarks and their run history.

use crate::record::ExperimentRecord;
use crate::structure::StructureCounts;
use std::fmt;

/// Shape of a benchmark's stationary distribution support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationaryCategory {
    /// Exactly one reachable recurrent state.
    OneSingletonRecurrent,
    /// Every BSCC is a single state.
    SingletonRecurrent,
    /// Every state is recurrent.
    FullyRecurrent,
    Mixed,
}

impl StationaryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneSingletonRecurrent => "one-singleton-recurrent",
            Self::SingletonRecurrent => "singleton-recurrent",
            Self::FullyRecurrent => "fully-recurrent",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for StationaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A benchmark model together with every run recorded against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Benchmark {
    name: String,
    structure: StructureCounts,
    reachable_recurrent_states: u64,
    experiments: Vec<ExperimentRecord>,
}

impl Benchmark {
    /// Create a benchmark seeded with the given structure.
    pub fn new(name: impl Into<String>, structure: StructureCounts) -> Self {
        Self {
            name: name.into(),
            structure,
            reachable_recurrent_states: structure.reachable_recurrent_states(),
            experiments: Vec::new(),
        }
    }

    /// Create a benchmark seeded from the first record linked to it.
    ///
    /// A non-zero reachable count on the record wins over the one derived
    /// from its structure, so a count recounted from an exact export
    /// survives being persisted and read back.
    pub(crate) fn seeded_from(record: &ExperimentRecord) -> Self {
        let mut benchmark = Self::new(record.benchmark_name.clone(), record.structure);
        if record.reachable_recurrent_states > 0 {
            benchmark.reachable_recurrent_states = record.reachable_recurrent_states;
        }
        benchmark
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structure(&self) -> StructureCounts {
        self.structure
    }

    pub fn states(&self) -> u64 {
        self.structure.states
    }

    pub fn reachable_recurrent_states(&self) -> u64 {
        self.reachable_recurrent_states
    }

    /// Runs in insertion order.
    pub fn experiments(&self) -> &[ExperimentRecord] {
        &self.experiments
    }

    /// Mutable access to the runs, for writing error fields.
    ///
    /// The sequence itself can only grow through the registry.
    pub fn experiments_mut(&mut self) -> &mut [ExperimentRecord] {
        &mut self.experiments
    }

    pub(crate) fn push(&mut self, mut record: ExperimentRecord) -> usize {
        record.mirror_structure(self.structure, self.reachable_recurrent_states);
        self.experiments.push(record);
        self.experiments.len() - 1
    }

    /// Overwrite the structure and push it into every linked record.
    pub fn set_structure(&mut self, structure: StructureCounts) {
        self.structure = structure;
        self.set_reachable_recurrent_states(structure.reachable_recurrent_states());
    }

    /// Recompute the reachable recurrent count from a sampled stationary
    /// vector: the number of strictly positive entries.
    ///
    /// The vector enumerates every state, so an unknown state count is taken
    /// from its length.
    pub fn recount_reachable<I: IntoIterator<Item = f64>>(&mut self, distribution: I) -> u64 {
        let (length, positive) = distribution
            .into_iter()
            .fold((0u64, 0u64), |(length, positive), v| {
                (length + 1, positive + u64::from(v > 0.0))
            });
        if self.structure.states == 0 {
            self.structure.states = length;
        }
        self.set_reachable_recurrent_states(positive.min(self.structure.states));
        self.reachable_recurrent_states
    }

    fn set_reachable_recurrent_states(&mut self, reachable: u64) {
        self.reachable_recurrent_states = reachable;
        for record in &mut self.experiments {
            record.mirror_structure(self.structure, reachable);
        }
    }

    pub fn category(&self) -> StationaryCategory {
        let reachable = self.reachable_recurrent_states;
        if reachable == 1 {
            StationaryCategory::OneSingletonRecurrent
        } else if reachable == self.structure.bsccs {
            StationaryCategory::SingletonRecurrent
        } else if reachable == self.structure.states {
            StationaryCategory::FullyRecurrent
        } else {
            StationaryCategory::Mixed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_records(count: usize) -> Benchmark {
        let mut benchmark = Benchmark::new("B1", StructureCounts::default());
        for i in 0..count {
            let mut record = ExperimentRecord::new("B1");
            record.tool = format!("tool{}", i);
            benchmark.push(record);
        }
        benchmark
    }

    #[test]
    fn test_new_derives_reachable() {
        let benchmark = Benchmark::new("B1", StructureCounts::new(10, 4, 2, 7));
        assert_eq!(benchmark.reachable_recurrent_states(), 3);
        assert!(benchmark.experiments().is_empty());
    }

    #[test]
    fn test_push_mirrors_current_structure() {
        let mut benchmark = Benchmark::new("B1", StructureCounts::new(8, 2, 1, 5));
        benchmark.push(ExperimentRecord::new("B1"));
        let record = &benchmark.experiments()[0];
        assert_eq!(record.structure.states, 8);
        assert_eq!(record.reachable_recurrent_states, 3);
    }

    #[test]
    fn test_set_structure_updates_all_records() {
        let mut benchmark = with_records(3);
        let structure = StructureCounts::new(100, 5, 2, 98);
        benchmark.set_structure(structure);
        for record in benchmark.experiments() {
            assert_eq!(record.structure, structure);
            assert_eq!(record.reachable_recurrent_states, 2);
        }
    }

    #[test]
    fn test_set_structure_is_idempotent() {
        let mut benchmark = with_records(2);
        let structure = StructureCounts::new(12, 3, 3, 9);
        benchmark.set_structure(structure);
        let first = benchmark.experiments().to_vec();
        benchmark.set_structure(structure);
        assert_eq!(benchmark.experiments(), first.as_slice());
    }

    #[test]
    fn test_recount_reachable() {
        let mut benchmark = with_records(1);
        benchmark.set_structure(StructureCounts::new(5, 1, 1, 0));
        let reachable = benchmark.recount_reachable(vec![0.5, 0.0, 0.25, 0.25, 0.0]);
        assert_eq!(reachable, 3);
        assert_eq!(benchmark.experiments()[0].reachable_recurrent_states, 3);
    }

    #[test]
    fn test_recount_fills_unknown_state_count() {
        let mut benchmark = with_records(1);
        let reachable = benchmark.recount_reachable(vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(reachable, 1);
        assert_eq!(benchmark.states(), 4);
        assert_eq!(benchmark.experiments()[0].structure.states, 4);
    }

    // ==================== Categories ====================

    #[test]
    fn test_category_one_singleton() {
        let benchmark = Benchmark::new("b", StructureCounts::new(10, 10, 1, 9));
        assert_eq!(benchmark.category(), StationaryCategory::OneSingletonRecurrent);
    }

    #[test]
    fn test_category_singleton() {
        let benchmark = Benchmark::new("b", StructureCounts::new(10, 10, 4, 6));
        assert_eq!(benchmark.category(), StationaryCategory::SingletonRecurrent);
    }

    #[test]
    fn test_category_fully_recurrent() {
        let benchmark = Benchmark::new("b", StructureCounts::new(10, 1, 1, 0));
        assert_eq!(benchmark.category(), StationaryCategory::FullyRecurrent);
    }

    #[test]
    fn test_category_mixed() {
        let benchmark = Benchmark::new("b", StructureCounts::new(10, 3, 2, 4));
        assert_eq!(benchmark.category(), StationaryCategory::Mixed);
        assert_eq!(benchmark.category().to_string(), "mixed");
    }
}
