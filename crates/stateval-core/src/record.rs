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

//! Experiment records.

use crate::structure::StructureCounts;

/// Error magnitudes of one run against its benchmark's reference.
///
/// All fields stay `0.0` until the aggregator has run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMetrics {
    pub max_absolute: f64,
    pub max_relative: f64,
    pub average_absolute: f64,
    pub average_relative: f64,
}

/// One tool run against one benchmark.
///
/// The owning [`Benchmark`](crate::Benchmark) is referenced by name only and
/// resolved through the [`BenchmarkRegistry`](crate::BenchmarkRegistry).
/// Identity fields that were absent in the source are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentRecord {
    pub tool: String,
    pub configuration_id: String,
    pub solver_id: String,
    pub precision: String,
    pub benchmark_name: String,

    /// Wall-clock time in seconds.
    pub wall_clock_time: f64,
    pub timeout: bool,
    pub execution_error: bool,
    /// Path of the exported distribution, relative to the run directory.
    pub export_value_file: Option<String>,
    pub log: Option<String>,
    pub mc_time: f64,

    /// Structure mirrored from the owning benchmark.
    pub structure: StructureCounts,
    pub reachable_recurrent_states: u64,

    pub errors: ErrorMetrics,
}

impl ExperimentRecord {
    /// Create an empty record for the given benchmark name.
    pub fn new(benchmark_name: impl Into<String>) -> Self {
        Self {
            benchmark_name: benchmark_name.into(),
            ..Self::default()
        }
    }

    /// Report column key: `tool.configuration.solver.precision`.
    pub fn tool_configuration(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.tool, self.configuration_id, self.solver_id, self.precision
        )
    }

    /// Unique name of the run: tool configuration followed by the benchmark.
    pub fn file_stem(&self) -> String {
        format!("{}.{}", self.tool_configuration(), self.benchmark_name)
    }

    /// The run timed out or crashed.
    #[inline]
    pub fn failed(&self) -> bool {
        self.timeout || self.execution_error
    }

    #[inline]
    pub fn has_export(&self) -> bool {
        self.export_value_file.is_some()
    }

    /// Copy structure and reachable count onto this record.
    pub(crate) fn mirror_structure(&mut self, structure: StructureCounts, reachable: u64) {
        self.structure = structure;
        self.reachable_recurrent_states = reachable;
    }

    pub fn set_errors(&mut self, errors: ErrorMetrics) {
        self.errors = errors;
    }
}
