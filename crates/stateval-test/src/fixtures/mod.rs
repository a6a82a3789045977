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

//! Record, export and log fixtures.

pub mod builders;
mod exports;
mod records;

pub use builders::RecordBuilder;
pub use exports::*;
pub use records::*;

use crate::FixtureList;

pub fn all() -> FixtureList {
    vec![
        ("exact_storm", exact_storm),
        ("approx_storm", approx_storm),
        ("prism_sparse", prism_sparse),
        ("sds_run", sds_run),
        ("timed_out", timed_out),
        ("crashed", crashed),
        ("plain_processed", plain_processed),
    ]
}
