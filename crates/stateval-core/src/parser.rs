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

//! Record parsing for the structured and plain formats.
//!
//! Both formats are a flat token stream in which a key token is followed by
//! its value token. They differ only in how keys are spelled and how values
//! are wrapped, which is what a [`RecordSource`] describes. A single scanning
//! loop drives either source.
//!
//! # Structured format
//!
//! ```text
//! {
//!   "benchmark-id": "haddad-monmege.20-0.7",
//!   "tool": "storm",
//!   "wallclock-time": 1.25,
//!   "timeout": false,
//!   ...
//! }
//! ```
//!
//! # Plain format
//!
//! ```text
//! name: haddad-monmege.20-0.7
//! tool: storm
//! wallclock-time: 1.25
//! ```
//!
//! The plain format is also what [`write_record`](crate::write_record) emits.

use crate::error::{RecordError, RecordResult};
use crate::limits::Limits;
use crate::record::ExperimentRecord;
use crate::token::TokenReader;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::warn;

/// Serialized record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// Brace/quote-delimited key/value stream written by the benchmark runner.
    Structured,
    /// `key: value` pairs, also the persisted output format.
    Plain,
}

impl RecordFormat {
    /// `.json` files are structured, `.txt` files are plain.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Structured),
            Some("txt") => Some(Self::Plain),
            _ => None,
        }
    }

    pub fn source(self) -> &'static dyn RecordSource {
        match self {
            Self::Structured => &StructuredSource,
            Self::Plain => &PlainSource,
        }
    }
}

/// A record field addressable by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BenchmarkName,
    Tool,
    WallClockTime,
    Precision,
    Timeout,
    ExecutionError,
    McTime,
    ConfigurationId,
    SolverId,
    ExportValueFile,
    Log,
    States,
    ReachableRecurrentStates,
    Sccs,
    Bsccs,
    NonBsccs,
    MaxErrorAbsolute,
    MaxErrorRelative,
    AverageErrorAbsolute,
    AverageErrorRelative,
}

impl Field {
    /// Every field, in the order the plain writer emits them.
    pub const ALL: [Field; 20] = [
        Field::WallClockTime,
        Field::Tool,
        Field::ConfigurationId,
        Field::SolverId,
        Field::ExportValueFile,
        Field::Log,
        Field::States,
        Field::MaxErrorAbsolute,
        Field::MaxErrorRelative,
        Field::AverageErrorAbsolute,
        Field::AverageErrorRelative,
        Field::McTime,
        Field::Precision,
        Field::Timeout,
        Field::ExecutionError,
        Field::BenchmarkName,
        Field::ReachableRecurrentStates,
        Field::Sccs,
        Field::Bsccs,
        Field::NonBsccs,
    ];

    /// Key label in the plain format, without the trailing colon.
    pub fn plain_key(self) -> &'static str {
        match self {
            Field::BenchmarkName => "name",
            Field::Tool => "tool",
            Field::WallClockTime => "wallclock-time",
            Field::Precision => "precision",
            Field::Timeout => "timeout",
            Field::ExecutionError => "execution-error",
            Field::McTime => "mc-time",
            Field::ConfigurationId => "configuration-id",
            Field::SolverId => "solver-id",
            Field::ExportValueFile => "export-value-file",
            Field::Log => "log",
            Field::States => "states",
            Field::ReachableRecurrentStates => "reachable-recurrent-states",
            Field::Sccs => "SCCs",
            Field::Bsccs => "BSCCs",
            Field::NonBsccs => "nonBSCCs",
            Field::MaxErrorAbsolute => "max-error-absolute",
            Field::MaxErrorRelative => "max-error-relative",
            Field::AverageErrorAbsolute => "average-error-absolute",
            Field::AverageErrorRelative => "average-error-relative",
        }
    }
}

/// How one serialized format spells keys and wraps values.
pub trait RecordSource: Sync {
    fn format(&self) -> RecordFormat;

    /// The field a key token introduces, if it is a key at all.
    fn field(&self, token: &str) -> Option<Field>;

    /// Strip format punctuation from a raw value token.
    fn unwrap_value<'a>(&self, raw: &'a str) -> &'a str;
}

/// Source for the structured (runner) format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredSource;

impl RecordSource for StructuredSource {
    fn format(&self) -> RecordFormat {
        RecordFormat::Structured
    }

    fn field(&self, token: &str) -> Option<Field> {
        match token {
            "\"benchmark-id\":" => Some(Field::BenchmarkName),
            "\"tool\":" => Some(Field::Tool),
            "\"wallclock-time\":" => Some(Field::WallClockTime),
            "\"precision\":" => Some(Field::Precision),
            "\"timeout\":" => Some(Field::Timeout),
            "\"execution-error\":" => Some(Field::ExecutionError),
            "\"mc-time\":" => Some(Field::McTime),
            "\"configuration-id\":" => Some(Field::ConfigurationId),
            "\"solver-id\":" => Some(Field::SolverId),
            "\"export-value-file\":" => Some(Field::ExportValueFile),
            "\"log\":" => Some(Field::Log),
            _ => None,
        }
    }

    fn unwrap_value<'a>(&self, raw: &'a str) -> &'a str {
        raw.trim_end_matches(',').trim_matches('"')
    }
}

/// Source for the plain (persisted) format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSource;

impl RecordSource for PlainSource {
    fn format(&self) -> RecordFormat {
        RecordFormat::Plain
    }

    fn field(&self, token: &str) -> Option<Field> {
        let key = token.strip_suffix(':')?;
        Field::ALL.iter().copied().find(|f| f.plain_key() == key)
    }

    fn unwrap_value<'a>(&self, raw: &'a str) -> &'a str {
        raw
    }
}

const NULL: &str = "null";

fn text(value: &str) -> String {
    if value == NULL {
        String::new()
    } else {
        value.to_string()
    }
}

fn optional(value: &str) -> Option<String> {
    if value == NULL {
        None
    } else {
        Some(value.to_string())
    }
}

fn float(field: Field, value: &str) -> f64 {
    value.parse::<f64>().unwrap_or_else(|_| {
        warn!(key = field.plain_key(), value, "malformed number, using 0");
        0.0
    })
}

fn count(field: Field, value: &str) -> u64 {
    value.parse::<u64>().unwrap_or_else(|_| {
        warn!(key = field.plain_key(), value, "malformed count, using 0");
        0
    })
}

fn apply(record: &mut ExperimentRecord, field: Field, value: &str) {
    match field {
        Field::BenchmarkName => record.benchmark_name = text(value),
        Field::Tool => record.tool = text(value),
        Field::Precision => record.precision = text(value),
        Field::ConfigurationId => record.configuration_id = text(value),
        Field::SolverId => record.solver_id = text(value),
        Field::WallClockTime => record.wall_clock_time = float(field, value),
        Field::McTime => record.mc_time = float(field, value),
        Field::Timeout => record.timeout = value == "true",
        Field::ExecutionError => record.execution_error = value == "true",
        Field::ExportValueFile => record.export_value_file = optional(value),
        Field::Log => record.log = optional(value),
        Field::States => record.structure.states = count(field, value),
        Field::ReachableRecurrentStates => record.reachable_recurrent_states = count(field, value),
        Field::Sccs => record.structure.sccs = count(field, value),
        Field::Bsccs => record.structure.bsccs = count(field, value),
        Field::NonBsccs => record.structure.non_bsccs = count(field, value),
        Field::MaxErrorAbsolute => record.errors.max_absolute = float(field, value),
        Field::MaxErrorRelative => record.errors.max_relative = float(field, value),
        Field::AverageErrorAbsolute => record.errors.average_absolute = float(field, value),
        Field::AverageErrorRelative => record.errors.average_relative = float(field, value),
    }
}

/// Read one record from `tokens` as described by `source`.
///
/// Tokens that are not keys are skipped one at a time; a key at the very end
/// of the stream is ignored.
pub fn read_record<R: Read>(
    tokens: &mut TokenReader<R>,
    source: &dyn RecordSource,
) -> RecordResult<ExperimentRecord> {
    let mut record = ExperimentRecord::default();

    while let Some(token) = tokens.next_token()? {
        let Some(field) = source.field(&token) else {
            continue;
        };
        match tokens.next_token()? {
            Some(raw) => apply(&mut record, field, source.unwrap_value(&raw)),
            None => break,
        }
    }

    Ok(record)
}

/// Parse a record from a reader.
///
/// # Examples
///
/// ```rust
/// use stateval_core::{parse_record, RecordFormat};
/// use std::io::Cursor;
///
/// let input = r#"{ "benchmark-id": "B1", "tool": "storm", "timeout": false, }"#;
/// let record = parse_record(Cursor::new(input), RecordFormat::Structured).unwrap();
///
/// assert_eq!(record.benchmark_name, "B1");
/// assert_eq!(record.tool, "storm");
/// assert!(record.export_value_file.is_none());
/// ```
pub fn parse_record<R: Read>(reader: R, format: RecordFormat) -> RecordResult<ExperimentRecord> {
    parse_record_with_limits(reader, format, &Limits::default())
}

/// Parse a record from a reader, enforcing `limits` on token length.
pub fn parse_record_with_limits<R: Read>(
    reader: R,
    format: RecordFormat,
    limits: &Limits,
) -> RecordResult<ExperimentRecord> {
    let mut tokens = TokenReader::with_limit(reader, limits.max_token_length);
    read_record(&mut tokens, format.source())
}

/// Parse a record held in memory.
pub fn parse_record_str(input: &str, format: RecordFormat) -> RecordResult<ExperimentRecord> {
    parse_record(Cursor::new(input.as_bytes()), format)
}

/// Parse a record file, choosing the format from its extension.
pub fn parse_record_file(path: &Path, limits: &Limits) -> RecordResult<ExperimentRecord> {
    let context = path.display().to_string();
    let format = RecordFormat::from_path(path).ok_or_else(|| {
        RecordError::malformed("unsupported record file extension", 0).with_context(&context)
    })?;

    let metadata =
        std::fs::metadata(path).map_err(|e| RecordError::from(e).with_context(&context))?;
    if metadata.len() > limits.max_record_size {
        return Err(RecordError::security(
            format!(
                "record is {} bytes, maximum allowed is {} bytes",
                metadata.len(),
                limits.max_record_size
            ),
            0,
        )
        .with_context(&context));
    }

    let file = File::open(path).map_err(|e| RecordError::from(e).with_context(&context))?;
    parse_record_with_limits(file, format, limits).map_err(|e| e.with_context(&context))
}
