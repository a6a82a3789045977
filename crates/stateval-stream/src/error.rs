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

//! Error types for value streams and comparisons.

use stateval_core::RecordError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading exported distributions.
///
/// # Examples
///
/// ```rust
/// use stateval_stream::StreamError;
/// use std::io;
///
/// let err = StreamError::open("exports/a.json", io::Error::new(io::ErrorKind::NotFound, "gone"));
/// assert!(err.to_string().contains("exports/a.json"));
/// ```
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An export file could not be opened.
    #[error("Cannot open export {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying token stream failed.
    #[error("Token error: {0}")]
    Token(#[from] RecordError),
}

impl StreamError {
    #[inline]
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;
