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

//! Pipeline configuration.
//!
//! The run directory is threaded explicitly through every pipeline call;
//! nothing is read from global state apart from the limits override in
//! `STATEVAL_MAX_FILE_SIZE`.

use stateval_core::{Limits, ToolRoles, DEFAULT_STRUCTURE_LOG_PREFIXES};
use std::path::{Path, PathBuf};

/// Raw records, solver logs and exports, relative to the run directory.
pub const LOGS_SUBDIR: &str = "results/logs";

/// Persisted plain records and report tables, relative to the run directory.
pub const PROCESSED_SUBDIR: &str = "results/postprocess";

/// Number of benchmarks in the full scenario; ranking tables are only
/// written for reports of exactly this many rows by default.
pub const DEFAULT_RANKING_BENCHMARKS: usize = 73;

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the benchmark run. Export paths in records are relative to it.
    pub run_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub processed_dir: PathBuf,
    /// Where report tables are written (default: the processed directory).
    pub report_dir: PathBuf,
    pub roles: ToolRoles,
    /// Report size that triggers the ranking tables; `None` ranks every report.
    pub ranking_benchmarks: Option<usize>,
    /// Evaluate benchmarks on the rayon thread pool.
    pub parallel: bool,
    pub limits: Limits,
    /// File-name prefixes of solver logs carrying structure counts.
    pub structure_log_prefixes: Vec<String>,
}

impl PipelineConfig {
    /// Default configuration for the run rooted at `run_dir`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateval_cli::config::PipelineConfig;
    /// use std::path::Path;
    ///
    /// let config = PipelineConfig::new("run");
    /// assert_eq!(config.logs_dir, Path::new("run/results/logs"));
    /// assert_eq!(config.report_dir, config.processed_dir);
    /// assert_eq!(config.ranking_benchmarks, Some(73));
    /// ```
    pub fn new(run_dir: impl Into<PathBuf>) -> Self {
        let run_dir = run_dir.into();
        let logs_dir = run_dir.join(LOGS_SUBDIR);
        let processed_dir = run_dir.join(PROCESSED_SUBDIR);
        Self {
            report_dir: processed_dir.clone(),
            logs_dir,
            processed_dir,
            run_dir,
            roles: ToolRoles::default(),
            ranking_benchmarks: Some(DEFAULT_RANKING_BENCHMARKS),
            parallel: false,
            limits: Limits::from_env(),
            structure_log_prefixes: DEFAULT_STRUCTURE_LOG_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    pub fn with_ranking(mut self, ranking_benchmarks: Option<usize>) -> Self {
        self.ranking_benchmarks = ranking_benchmarks;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_roles(mut self, roles: ToolRoles) -> Self {
        self.roles = roles;
        self
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }
}
