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

//! Error types for aggregation and report output.

use stateval_stream::StreamError;
use thiserror::Error;

/// Errors raised while writing error metrics onto a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The benchmark has no reachable recurrent states, so averages are undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// use stateval_report::AggregateError;
    ///
    /// let err = AggregateError::DivisionByZero { benchmark: "B1".to_string() };
    /// assert!(err.to_string().contains("B1"));
    /// ```
    #[error("benchmark '{benchmark}' has no reachable recurrent states")]
    DivisionByZero {
        /// Name of the benchmark.
        benchmark: String,
    },
}

/// Errors that can occur while evaluating runs or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing a table failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stateval_report::ReportError;
    ///
    /// let err = ReportError::Write {
    ///     table: "all-time".to_string(),
    ///     message: "disk full".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Failed to write table 'all-time': disk full");
    /// ```
    #[error("Failed to write table '{table}': {message}")]
    Write {
        /// Table name.
        table: String,
        /// Underlying failure.
        message: String,
    },

    /// Table output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// Where the bytes came from.
        context: String,
    },

    /// Reading an export failed.
    #[error("Comparison failed for '{record}': {source}")]
    Comparison {
        /// File stem of the record.
        record: String,
        #[source]
        source: StreamError,
    },

    /// Averages could not be computed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
