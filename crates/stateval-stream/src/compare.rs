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

//! Pairwise comparison of an approximate distribution against a reference.

use crate::error::{StreamError, StreamResult};
use crate::values::{ValueEncoding, ValueStream};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// An approximate value above this ends the comparison.
pub const TERMINATION_THRESHOLD: f64 = 1.5;

/// Error accumulators from one comparison pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonResult {
    /// Largest `|ref - approx|`, only tracked against a genuine reference.
    pub max_absolute_error: f64,
    pub max_relative_error: f64,
    pub sum_absolute_error: f64,
    pub sum_relative_error: f64,
    /// Pairs whose reference value was strictly positive.
    pub referenced_count: usize,
    /// Sum of the approximate values of counted pairs.
    pub approximate_mass: f64,
    pub reference_supplied: bool,
    /// Tokens were left in the approximate stream.
    pub approximate_residual: bool,
    /// Tokens were left in the reference stream.
    pub reference_residual: bool,
}

impl ComparisonResult {
    #[inline]
    pub fn has_residual(&self) -> bool {
        self.approximate_residual || self.reference_residual
    }
}

/// Walk both streams in lockstep and accumulate error statistics.
///
/// The approximate stream is advanced first. Its exhaustion, or a value above
/// [`TERMINATION_THRESHOLD`], ends the pass; the reference is then advanced
/// once more. A reference that runs out first also ends the pass. Without a
/// reference each approximate value is compared against itself, so only the
/// mass is meaningful.
///
/// # Examples
///
/// ```rust
/// use stateval_stream::{compare, ValueEncoding, ValueStream};
/// use std::io::Cursor;
///
/// let mut approx = ValueStream::new(Cursor::new("0.5 0.5"), ValueEncoding::Bare);
/// let mut exact = ValueStream::new(Cursor::new("0.4 0.6"), ValueEncoding::Bare);
///
/// let result = compare(&mut approx, Some(&mut exact)).unwrap();
/// assert_eq!(result.referenced_count, 2);
/// assert!((result.max_relative_error - 0.25).abs() < 1e-12);
/// assert!((result.approximate_mass - 1.0).abs() < 1e-12);
/// ```
pub fn compare<A: Read, B: Read>(
    approx: &mut ValueStream<A>,
    mut reference: Option<&mut ValueStream<B>>,
) -> StreamResult<ComparisonResult> {
    let mut result = ComparisonResult {
        reference_supplied: reference.is_some(),
        ..ComparisonResult::default()
    };

    loop {
        let approximate = match approx.next_value()? {
            Some(value) if value <= TERMINATION_THRESHOLD => value,
            ended => {
                if let Some(value) = ended {
                    debug!(value, "approximate value above threshold, stopping");
                }
                if let Some(reference) = reference.as_deref_mut() {
                    reference.next_value()?;
                }
                break;
            }
        };

        let exact = match reference.as_deref_mut() {
            Some(reference) => match reference.next_value()? {
                Some(value) => value,
                None => {
                    warn!(
                        compared = result.referenced_count,
                        "reference distribution ended before the approximation"
                    );
                    break;
                }
            },
            None => approximate,
        };

        if exact > 0.0 {
            let absolute = (exact - approximate).abs();
            let relative = absolute / exact;
            result.sum_absolute_error += absolute;
            if result.reference_supplied && absolute > result.max_absolute_error {
                result.max_absolute_error = absolute;
            }
            result.sum_relative_error += relative;
            if relative > result.max_relative_error {
                result.max_relative_error = relative;
            }
            result.referenced_count += 1;
            result.approximate_mass += approximate;
        }
    }

    result.approximate_residual = approx.has_more_tokens()?;
    if result.approximate_residual {
        warn!(
            values = approx.values_read(),
            "approximate distribution has unread values"
        );
    }
    if let Some(reference) = reference {
        result.reference_residual = reference.has_more_tokens()?;
        if result.reference_residual {
            warn!(
                values = reference.values_read(),
                "reference distribution has unread values"
            );
        }
    }

    Ok(result)
}

/// Compare two export files.
///
/// The reference is always marker-tagged. A reference that cannot be opened
/// degrades to a comparison without reference; an approximate export that
/// cannot be opened is an error.
pub fn compare_files(
    approx_path: &Path,
    reference_path: Option<&Path>,
    encoding: ValueEncoding,
) -> StreamResult<ComparisonResult> {
    let approx_file =
        File::open(approx_path).map_err(|e| StreamError::open(approx_path, e))?;
    let mut approx = ValueStream::new(approx_file, encoding);

    let reference_file = reference_path.and_then(|path| match File::open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reference export unreadable, comparing without it");
            None
        }
    });
    let mut reference = reference_file.map(|file| ValueStream::new(file, ValueEncoding::Marked));

    compare(&mut approx, reference.as_mut())
}

/// Sum of every value in the stream.
pub fn total_mass<R: Read>(stream: &mut ValueStream<R>) -> StreamResult<f64> {
    let mut mass = 0.0;
    while let Some(value) = stream.next_value()? {
        mass += value;
    }
    Ok(mass)
}

/// Sum of every value in an export file.
pub fn total_mass_file(path: &Path, encoding: ValueEncoding) -> StreamResult<f64> {
    let file = File::open(path).map_err(|e| StreamError::open(path, e))?;
    total_mass(&mut ValueStream::new(file, encoding))
}
