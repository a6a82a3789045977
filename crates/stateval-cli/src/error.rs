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

//! Error types for CLI operations.
//!
//! Every error carries enough context (usually a path) to be printed on its
//! own. Errors are `Clone` so per-file failures can be collected into a
//! pipeline summary and printed after the batch has finished.

use stateval_core::RecordError;
use stateval_report::ReportError;
use stateval_stream::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the `stateval` binary.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (directory listing, file read or write).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The run directory, or one of its subdirectories, does not exist.
    #[error("Directory '{}' does not exist", path.display())]
    MissingDirectory {
        /// The missing directory
        path: PathBuf,
    },

    /// A record file could not be read or parsed.
    ///
    /// The wrapped error already names the file.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Reading an exported distribution failed.
    #[error("Comparison error: {0}")]
    Comparison(String),

    /// Evaluation or table output failed.
    #[error("Report error: {0}")]
    Report(String),

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use stateval_cli::error::CliError;
    /// use std::fs;
    ///
    /// let result = fs::read_dir("run/results/logs")
    ///     .map_err(|e| CliError::io_error("run/results/logs", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        Self::MissingDirectory { path: path.into() }
    }
}

impl From<StreamError> for CliError {
    fn from(err: StreamError) -> Self {
        Self::Comparison(err.to_string())
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        Self::Report(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
