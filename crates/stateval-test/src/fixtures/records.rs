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

//! Canned record fixtures.

use super::builders::RecordBuilder;

/// Exact reference run of `B1` with an export.
pub fn exact_storm() -> String {
    RecordBuilder::new("B1", "storm")
        .solver("classic-luexact-topo")
        .precision("ignored")
        .export("results/logs/exports/storm.sparse.classic-luexact-topo.ignored.B1.json")
        .wall_clock(3.0)
        .structured()
}

/// Approximate run of `B1` with an export.
pub fn approx_storm() -> String {
    RecordBuilder::new("B1", "storm")
        .solver("classic-gmres-topo")
        .export("results/logs/exports/storm.sparse.classic-gmres-topo.0.001.B1.json")
        .wall_clock(0.25)
        .structured()
}

/// Mass-only run of `B1` with a bare export.
pub fn prism_sparse() -> String {
    RecordBuilder::new("B1", "prism")
        .configuration("sparse-rel")
        .export("results/logs/exports/prism.sparse-rel.default.0.001.B1.txt")
        .wall_clock(7.5)
        .structured()
}

/// Reference-tool run without an export.
pub fn sds_run() -> String {
    RecordBuilder::new("B1", "sds")
        .configuration("default")
        .wall_clock(2.0)
        .structured()
}

pub fn timed_out() -> String {
    RecordBuilder::new("B1", "storm")
        .solver("classic-jacobi")
        .timeout(true)
        .wall_clock(6000.0)
        .structured()
}

pub fn crashed() -> String {
    RecordBuilder::new("B1", "prism")
        .configuration("hybrid-rel")
        .execution_error(true)
        .structured()
}

/// Processed record with structure filled in.
pub fn plain_processed() -> String {
    RecordBuilder::new("B1", "storm")
        .solver("classic-gmres-topo")
        .export("results/logs/exports/storm.sparse.classic-gmres-topo.0.001.B1.json")
        .structure(3, 1, 1, 0)
        .plain()
}
