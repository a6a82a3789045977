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

//! Fluent builder for record text in either serialized format.

/// Builder for record fixtures.
///
/// # Examples
///
/// ```
/// use stateval_test::fixtures::builders::RecordBuilder;
///
/// let builder = RecordBuilder::new("B1", "prism")
///     .configuration("sparse-rel")
///     .wall_clock(4.5);
///
/// assert_eq!(builder.file_stem(), "prism.sparse-rel.default.0.001.B1");
/// assert!(builder.plain().contains("wallclock-time: 4.5\n"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    benchmark: String,
    tool: String,
    configuration: String,
    solver: String,
    precision: String,
    wall_clock: f64,
    mc_time: f64,
    timeout: bool,
    execution_error: bool,
    export: Option<String>,
    log: Option<String>,
    structure: [u64; 4],
    reachable: u64,
}

impl RecordBuilder {
    /// Creates a builder for a finished, successful run without an export.
    pub fn new(benchmark: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            benchmark: benchmark.into(),
            tool: tool.into(),
            configuration: "sparse".to_string(),
            solver: "default".to_string(),
            precision: "0.001".to_string(),
            wall_clock: 1.0,
            mc_time: 0.5,
            timeout: false,
            execution_error: false,
            export: None,
            log: None,
            structure: [0; 4],
            reachable: 0,
        }
    }

    pub fn configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    pub fn solver(mut self, solver: impl Into<String>) -> Self {
        self.solver = solver.into();
        self
    }

    pub fn precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = precision.into();
        self
    }

    pub fn wall_clock(mut self, seconds: f64) -> Self {
        self.wall_clock = seconds;
        self
    }

    pub fn mc_time(mut self, seconds: f64) -> Self {
        self.mc_time = seconds;
        self
    }

    pub fn timeout(mut self, timeout: bool) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn execution_error(mut self, execution_error: bool) -> Self {
        self.execution_error = execution_error;
        self
    }

    /// Export path, relative to the run directory.
    pub fn export(mut self, path: impl Into<String>) -> Self {
        self.export = Some(path.into());
        self
    }

    pub fn log(mut self, path: impl Into<String>) -> Self {
        self.log = Some(path.into());
        self
    }

    /// Structure counts, only rendered in the plain format.
    pub fn structure(mut self, states: u64, sccs: u64, bsccs: u64, non_bsccs: u64) -> Self {
        self.structure = [states, sccs, bsccs, non_bsccs];
        self.reachable = states.saturating_sub(non_bsccs);
        self
    }

    /// `tool.configuration.solver.precision.benchmark`
    pub fn file_stem(&self) -> String {
        format!(
            "{}.{}.{}.{}.{}",
            self.tool, self.configuration, self.solver, self.precision, self.benchmark
        )
    }

    /// Render in the structured runner format.
    pub fn structured(&self) -> String {
        let export = match &self.export {
            Some(path) => format!("\"{}\"", path),
            None => "null".to_string(),
        };
        let log = match &self.log {
            Some(path) => format!("\"{}\"", path),
            None => "null".to_string(),
        };
        format!(
            "{{\n    \"benchmark-id\": \"{}\",\n    \"tool\": \"{}\",\n    \
             \"configuration-id\": \"{}\",\n    \"solver-id\": \"{}\",\n    \
             \"precision\": \"{}\",\n    \"wallclock-time\": {:?},\n    \
             \"mc-time\": {:?},\n    \"timeout\": {},\n    \
             \"execution-error\": {},\n    \"export-value-file\": {},\n    \
             \"log\": {},\n    \"return-codes\": [ 0 ]\n}}\n",
            self.benchmark,
            self.tool,
            self.configuration,
            self.solver,
            self.precision,
            self.wall_clock,
            self.mc_time,
            self.timeout,
            self.execution_error,
            export,
            log,
        )
    }

    /// Render in the plain `key: value` format.
    pub fn plain(&self) -> String {
        let [states, sccs, bsccs, non_bsccs] = self.structure;
        format!(
            "wallclock-time: {:?}\ntool: {}\nconfiguration-id: {}\nsolver-id: {}\n\
             export-value-file: {}\nlog: {}\nstates: {}\nmc-time: {:?}\nprecision: {}\n\
             timeout: {}\nexecution-error: {}\nname: {}\nreachable-recurrent-states: {}\n\
             SCCs: {}\nBSCCs: {}\nnonBSCCs: {}\n",
            self.wall_clock,
            self.tool,
            self.configuration,
            self.solver,
            self.export.as_deref().unwrap_or("null"),
            self.log.as_deref().unwrap_or("null"),
            states,
            self.mc_time,
            self.precision,
            self.timeout,
            self.execution_error,
            self.benchmark,
            self.reachable,
            sccs,
            bsccs,
            non_bsccs,
        )
    }
}
