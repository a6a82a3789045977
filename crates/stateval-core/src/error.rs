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

//! Error types for record parsing and registry operations.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while reading a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordErrorKind {
    /// The source could not be tokenized at all.
    Malformed,
    /// A token was not valid UTF-8.
    Encoding,
    /// Security limit exceeded (record size, token length).
    Security,
    /// A benchmark was addressed that the registry does not know.
    UnknownBenchmark,
    /// I/O error (file operations).
    IO,
}

impl fmt::Display for RecordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "MalformedRecordError"),
            Self::Encoding => write!(f, "EncodingError"),
            Self::Security => write!(f, "SecurityError"),
            Self::UnknownBenchmark => write!(f, "UnknownBenchmarkError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error raised while tokenizing, parsing or persisting records.
#[derive(Debug, Clone, Error)]
#[error("{kind} at token {token}: {message}")]
pub struct RecordError {
    /// The kind of error.
    pub kind: RecordErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Number of tokens read before the failure (0 when not applicable).
    pub token: usize,
    /// Additional context, usually the file the record came from.
    pub context: Option<String>,
}

impl RecordError {
    /// Create a new error.
    pub fn new(kind: RecordErrorKind, message: impl Into<String>, token: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            token,
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn malformed(message: impl Into<String>, token: usize) -> Self {
        Self::new(RecordErrorKind::Malformed, message, token)
    }

    pub fn encoding(message: impl Into<String>, token: usize) -> Self {
        Self::new(RecordErrorKind::Encoding, message, token)
    }

    pub fn security(message: impl Into<String>, token: usize) -> Self {
        Self::new(RecordErrorKind::Security, message, token)
    }

    pub fn unknown_benchmark(name: &str) -> Self {
        Self::new(
            RecordErrorKind::UnknownBenchmark,
            format!("no benchmark named '{}'", name),
            0,
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(RecordErrorKind::IO, message, 0)
    }
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
