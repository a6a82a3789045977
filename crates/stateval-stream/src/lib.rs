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

//! Streaming comparison of exported stationary distributions.
//!
//! Exports can hold millions of states, so values are read lazily from a
//! token stream and never collected. A [`ValueStream`] yields the
//! probabilities of one export; [`compare`] walks an approximation and an
//! optional reference in lockstep and produces a [`ComparisonResult`].
//!
//! # Examples
//!
//! ```rust
//! use stateval_stream::{compare, ValueEncoding, ValueStream};
//! use std::io::Cursor;
//!
//! let approx = r#"[ { "v": 0.41 }, { "v": 0.34 }, { "v": 0.25 } ]"#;
//! let exact = r#"[ { "v": 0.4 }, { "v": 0.35 }, { "v": 0.25 } ]"#;
//!
//! let mut approx = ValueStream::new(Cursor::new(approx), ValueEncoding::Marked);
//! let mut exact = ValueStream::new(Cursor::new(exact), ValueEncoding::Marked);
//! let result = compare(&mut approx, Some(&mut exact)).unwrap();
//!
//! assert_eq!(result.referenced_count, 3);
//! assert!(result.max_relative_error > 0.028);
//! ```

mod compare;
mod error;
mod values;

pub use compare::{
    compare, compare_files, total_mass, total_mass_file, ComparisonResult, TERMINATION_THRESHOLD,
};
pub use error::{StreamError, StreamResult};
pub use values::{ValueEncoding, ValueStream, VALUE_MARKER};
