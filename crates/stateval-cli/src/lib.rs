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

//! Stateval command-line interface.
//!
//! The `stateval` binary drives the evaluation of a benchmark run:
//!
//! - `evaluate <RUN_DIR>`: compare every exported distribution of a raw run
//!   against its exact reference, persist plain records and write reports
//! - `report <RUN_DIR>`: rebuild the reports from persisted plain records
//! - `compare <APPROX>`: compare a single export
//! - `inspect <RECORD>`: print a parsed record
//!
//! The pipeline stages are exposed in [`pipeline`] for callers that want to
//! drive a run programmatically.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::CliError;
pub use pipeline::{run, Mode, PipelineSummary};
