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

//! Resource limits for record and export ingestion.

/// Default maximum record file size in bytes (64 MB).
pub const DEFAULT_MAX_RECORD_SIZE: u64 = 64 * 1024 * 1024;

/// Default maximum length of a single token in bytes (1 MB).
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 1024 * 1024;

/// Configurable limits for ingestion.
///
/// Exported distributions can be many gigabytes and are only ever streamed,
/// so there is no limit on export size. Records are small key/value files;
/// anything much larger is a sign of a wrong file being picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum record file size in bytes (default: 64MB).
    pub max_record_size: u64,
    /// Maximum token length in bytes (default: 1MB).
    pub max_token_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_record_size: u64::MAX,
            max_token_length: usize::MAX,
        }
    }

    /// Default limits with the record size taken from `STATEVAL_MAX_FILE_SIZE`
    /// when it is set to a valid byte count.
    pub fn from_env() -> Self {
        let max_record_size = std::env::var("STATEVAL_MAX_FILE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_RECORD_SIZE);
        Self {
            max_record_size,
            ..Self::default()
        }
    }
}
