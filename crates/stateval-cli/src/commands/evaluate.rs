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

use crate::config::PipelineConfig;
use crate::error::CliError;
use crate::pipeline::{self, Mode};

/// Evaluate a raw run: ingest, repair structure, compare, persist, report.
pub fn evaluate(config: &PipelineConfig) -> Result<(), CliError> {
    let summary = pipeline::run(config, Mode::Raw)?;
    summary.print(&config.run_dir.display().to_string());
    Ok(())
}
