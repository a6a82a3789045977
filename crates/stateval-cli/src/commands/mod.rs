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

//! Command implementations.
//!
//! Each command takes its parsed arguments and returns `Result<(), CliError>`;
//! printing happens here, the work happens in [`crate::pipeline`] and the
//! library crates.

mod compare;
mod evaluate;
mod inspect;
mod report;

pub use compare::compare;
pub use evaluate::evaluate;
pub use inspect::inspect;
pub use report::report;

use crate::error::CliError;
use std::str::FromStr;

/// Output format of the `compare` and `inspect` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidInput(format!(
                "unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}
