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

//! Exported distributions and solver logs.

/// Marker-tagged export: one object per state, the value under `"v":`.
pub fn marked_export(values: &[f64]) -> String {
    let mut out = String::from("[\n");
    for (state, value) in values.iter().enumerate() {
        if state > 0 {
            out.push_str(",\n");
        }
        out.push_str(&format!(
            "{{\n \"s\": {{ \"x\": {} }},\n \"v\": {:?}\n}}",
            state, value
        ));
    }
    out.push_str("\n]\n");
    out
}

/// Bare export: whitespace-separated numbers, one per line.
pub fn bare_export(values: &[f64]) -> String {
    values.iter().map(|v| format!("{:?}\n", v)).collect()
}

/// Solver log carrying state and SCC counts.
pub fn structure_log(states: u64, sccs: u64, bsccs: u64, non_bsccs: u64) -> String {
    format!(
        "PRISM\n=====\n\nBuilding model...\n\nStates: {} ({} initial)\n\
         Transitions: {}\n\nComputing steady-state probabilities...\n\
         SCCs: {}, BSCCs: {}, non-BSCC states: {}\n\
         BSCC sizes: 1:{}\n\nTime for steady-state probability computation: 0.01 seconds.\n",
        states,
        1,
        states * 2,
        sccs,
        bsccs,
        non_bsccs,
        states.saturating_sub(non_bsccs),
    )
}

/// Reference distribution of the three-state scenario.
pub const B1_EXACT: [f64; 3] = [0.4, 0.35, 0.25];

/// Approximation of [`B1_EXACT`] with relative error about 0.029.
pub const B1_APPROX: [f64; 3] = [0.41, 0.34, 0.25];
