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

//! Error aggregation and report matrices for stationary-distribution
//! benchmarks.
//!
//! After evaluation ([`evaluate_benchmark`]) every record carries its error
//! metrics. [`build_report`] pivots records into benchmark by
//! tool-configuration matrices, one per [`Metric`], and [`save_report`] writes
//! them as semicolon-delimited tables.
//!
//! # Cell values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `[1e-7, 1]` | clamped error |
//! | `5` | no usable export |
//! | `-15` | no reference to compare against |
//! | `6000` | timed out, crashed or incorrect |
//! | `null` | no record for this cell |

mod aggregate;
mod error;
mod matrix;
mod rank;
mod table;

pub use aggregate::{
    aggregate, aggregate_mass, classify, evaluate_benchmark, normalized_error,
    BenchmarkEvaluation, Outcome, RecordOutcome, Verdict, CLAMP_MAX, CLAMP_MIN,
    CORRECTNESS_THRESHOLD, NO_REFERENCE,
};
pub use error::{AggregateError, ReportError, Result};
pub use matrix::{
    build_matrix, build_report, configurations, Cell, Metric, Partition, PivotContext, Report,
    ReportMatrix, Sentinel, Tally, LEADING_COLUMNS,
};
pub use rank::{rank_by_benchmark, sort_by_configuration};
pub use table::{
    ranking_applies, save_report, save_table, save_table_with_config, table_to_string,
    write_table, TableConfig, RANKED_TIME, SORTED_TIME,
};
