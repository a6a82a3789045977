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

//! Command-line argument definitions.

use crate::commands::{self, OutputFormat};
use crate::config::{PipelineConfig, DEFAULT_RANKING_BENCHMARKS};
use crate::error::CliError;
use clap::{Args, Subcommand};
use stateval_core::Limits;
use std::path::PathBuf;

/// Options shared by the commands that write report tables.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Write the ranking tables only for reports with exactly N benchmarks
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RANKING_BENCHMARKS)]
    pub ranking: usize,

    /// Write the ranking tables for every report
    #[arg(long, conflicts_with = "ranking")]
    pub rank_all: bool,

    /// Directory for the report tables (defaults to <RUN_DIR>/results/postprocess)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    fn ranking_benchmarks(&self) -> Result<Option<usize>, CliError> {
        if self.rank_all {
            return Ok(None);
        }
        if self.ranking == 0 {
            return Err(CliError::InvalidInput(
                "--ranking must be at least 1".to_string(),
            ));
        }
        Ok(Some(self.ranking))
    }

    /// Pipeline configuration for `run_dir` with these options applied.
    pub fn config(&self, run_dir: PathBuf) -> Result<PipelineConfig, CliError> {
        let mut config = PipelineConfig::new(run_dir).with_ranking(self.ranking_benchmarks()?);
        if let Some(output) = &self.output {
            config = config.with_report_dir(output);
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a raw benchmark run
    ///
    /// Reads the structured records and solver logs in
    /// <RUN_DIR>/results/logs, compares every exported distribution against
    /// the exact run of its benchmark, writes plain records to
    /// <RUN_DIR>/results/postprocess and builds the report tables.
    Evaluate {
        /// Root directory of the run
        #[arg(value_name = "RUN_DIR")]
        run_dir: PathBuf,

        /// Evaluate benchmarks in parallel
        #[arg(short, long)]
        parallel: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Rebuild the report tables from processed records
    ///
    /// Reads the plain records in <RUN_DIR>/results/postprocess and writes
    /// the report tables without re-reading any export.
    Report {
        /// Root directory of the run
        #[arg(value_name = "RUN_DIR")]
        run_dir: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Compare an exported distribution against an exact export
    Compare {
        /// Export of the approximate run
        #[arg(value_name = "APPROX")]
        approx: PathBuf,

        /// Export of the exact run
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// The approximate export holds bare numbers instead of tagged values
        #[arg(long)]
        bare: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print a parsed experiment record
    Inspect {
        /// Record file (.json structured, .txt plain)
        #[arg(value_name = "RECORD")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the arguments are invalid, the run directory is
    /// missing, or a single-file command cannot read its input. Per-record
    /// failures inside a pipeline run are reported in its summary instead.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Evaluate {
                run_dir,
                parallel,
                report,
            } => commands::evaluate(&report.config(run_dir)?.with_parallel(parallel)),
            Commands::Report { run_dir, report } => commands::report(&report.config(run_dir)?),
            Commands::Compare {
                approx,
                reference,
                bare,
                format,
            } => commands::compare(
                &approx,
                reference.as_deref(),
                bare,
                format.parse::<OutputFormat>()?,
            ),
            Commands::Inspect { file, format } => {
                commands::inspect(&file, format.parse::<OutputFormat>()?, &Limits::from_env())
            }
        }
    }
}
