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

//! Name-keyed registry of benchmarks.
//!
//! The registry exclusively owns every [`Benchmark`], and each benchmark owns
//! its records. Records point back at their benchmark by name only, so there
//! is no shared mutable aliasing between the two.

use crate::benchmark::Benchmark;
use crate::error::{RecordError, RecordResult};
use crate::record::ExperimentRecord;
use crate::roles::ToolRoles;
use crate::structure::StructureCounts;
use std::collections::HashMap;

/// Position of a record inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    /// Index of the benchmark in first-seen order.
    pub benchmark: usize,
    /// Index of the record within the benchmark.
    pub slot: usize,
}

/// At most one [`Benchmark`] per name, in first-seen order.
///
/// # Examples
///
/// ```rust
/// use stateval_core::{BenchmarkRegistry, ExperimentRecord};
///
/// let mut registry = BenchmarkRegistry::new();
/// registry.resolve(ExperimentRecord::new("B1"));
/// registry.resolve(ExperimentRecord::new("B1"));
///
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.get("B1").unwrap().experiments().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRegistry {
    benchmarks: Vec<Benchmark>,
    index: HashMap<String, usize>,
    ingestion: Vec<RecordId>,
}

impl BenchmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `record` to its benchmark, creating the benchmark on first sight.
    ///
    /// A new benchmark is seeded from the structure and reachable count the
    /// record carries; an existing one mirrors its current structure onto the record. This is
    /// the only way records enter a benchmark.
    pub fn resolve(&mut self, record: ExperimentRecord) -> &Benchmark {
        let position = match self.index.get(&record.benchmark_name) {
            Some(&position) => position,
            None => {
                let position = self.benchmarks.len();
                self.benchmarks.push(Benchmark::seeded_from(&record));
                self.index.insert(record.benchmark_name.clone(), position);
                position
            }
        };

        let slot = self.benchmarks[position].push(record);
        self.ingestion.push(RecordId {
            benchmark: position,
            slot,
        });
        &self.benchmarks[position]
    }

    pub fn get(&self, name: &str) -> Option<&Benchmark> {
        self.index.get(name).map(|&i| &self.benchmarks[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Benchmark> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.benchmarks[i]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Benchmarks in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Benchmark> {
        self.benchmarks.iter()
    }

    /// Benchmarks as a mutable slice. Each benchmark's subtree is independent,
    /// so the slice can be split across workers.
    pub fn benchmarks_mut(&mut self) -> &mut [Benchmark] {
        &mut self.benchmarks
    }

    /// Number of records across all benchmarks.
    pub fn record_count(&self) -> usize {
        self.ingestion.len()
    }

    /// All records in ingestion order.
    pub fn records(&self) -> impl Iterator<Item = &ExperimentRecord> + '_ {
        self.ingestion
            .iter()
            .map(move |id| &self.benchmarks[id.benchmark].experiments()[id.slot])
    }

    /// Overwrite a benchmark's structure and re-propagate it to all its records.
    pub fn set_structure(&mut self, name: &str, structure: StructureCounts) -> RecordResult<()> {
        let benchmark = self
            .get_mut(name)
            .ok_or_else(|| RecordError::unknown_benchmark(name))?;
        benchmark.set_structure(structure);
        Ok(())
    }

    /// Some run of the benchmark is the exact run and exported a distribution.
    pub fn has_exact_reference(&self, name: &str, roles: &ToolRoles) -> bool {
        self.get(name).is_some_and(|benchmark| {
            benchmark
                .experiments()
                .iter()
                .any(|r| roles.is_exact(&r.precision) && r.has_export())
        })
    }
}
