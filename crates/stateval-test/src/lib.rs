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

//! Shared test fixtures for the stateval crates.
//!
//! Fixtures produce serialized text (record files, exports, solver logs)
//! and on-disk run directories, so that every crate can feed them through
//! its own public parsing entry points.
//!
//! # Example
//!
//! ```
//! use stateval_test::{RecordBuilder, marked_export};
//!
//! let record = RecordBuilder::new("B1", "storm")
//!     .precision("ignored")
//!     .export("results/logs/exports/B1.json")
//!     .structured();
//! assert!(record.contains("\"benchmark-id\": \"B1\","));
//!
//! let export = marked_export(&[0.5, 0.5]);
//! assert_eq!(export.matches("\"v\":").count(), 2);
//! ```

pub mod fixtures;
mod run_dir;

pub use fixtures::*;
pub use run_dir::{
    b1_builder, b1_scenario, RunDir, RunDirBuilder, B1_APPROX_EXPORT, B1_EXACT_EXPORT, LOGS_DIR,
    PROCESSED_DIR,
};

/// Named fixture producing record text.
pub type FixtureList = Vec<(&'static str, fn() -> String)>;
