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

//! Record model, parsers and benchmark registry for stationary-distribution
//! benchmark runs.
//!
//! A benchmark run directory holds one record per (tool configuration,
//! benchmark) pair. This crate reads those records in either of the two
//! serialized formats, groups them by benchmark in a [`BenchmarkRegistry`],
//! fills in structural counts from solver logs and writes records back in the
//! plain format.
//!
//! # Example
//!
//! ```rust
//! use stateval_core::{parse_record_str, BenchmarkRegistry, RecordFormat};
//!
//! let record = parse_record_str(
//!     "name: B1\ntool: storm\nstates: 10\n",
//!     RecordFormat::Plain,
//! ).unwrap();
//!
//! let mut registry = BenchmarkRegistry::new();
//! let benchmark = registry.resolve(record);
//! assert_eq!(benchmark.name(), "B1");
//! assert_eq!(benchmark.states(), 10);
//! ```

mod benchmark;
mod error;
mod limits;
pub mod parser;
mod record;
mod registry;
mod roles;
pub mod structure;
mod token;
mod writer;

pub use benchmark::{Benchmark, StationaryCategory};
pub use error::{RecordError, RecordErrorKind, RecordResult};
pub use limits::{Limits, DEFAULT_MAX_RECORD_SIZE, DEFAULT_MAX_TOKEN_LENGTH};
pub use parser::{
    parse_record, parse_record_file, parse_record_str, parse_record_with_limits, read_record,
    Field, PlainSource, RecordFormat, RecordSource, StructuredSource,
};
pub use record::{ErrorMetrics, ExperimentRecord};
pub use registry::{BenchmarkRegistry, RecordId};
pub use roles::ToolRoles;
pub use structure::{
    resolve_structure, scan_structure_log, structure_log_benchmark, LegacyOverrides,
    StructureCounts, StructureResolution, DEFAULT_STRUCTURE_LOG_PREFIXES,
};
pub use token::TokenReader;
pub use writer::{record_file_name, record_to_string, save_record, write_record};
