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

use super::OutputFormat;
use crate::error::CliError;
use colored::Colorize;
use serde_json::json;
use stateval_stream::{compare_files, ComparisonResult, ValueEncoding};
use std::path::Path;

/// Compare one exported distribution against an optional exact export.
///
/// The reference is always read in the marker-tagged encoding. An unreadable
/// reference degrades to a comparison without reference; an unreadable
/// approximation is an error.
pub fn compare(
    approx: &Path,
    reference: Option<&Path>,
    bare: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let encoding = if bare {
        ValueEncoding::Bare
    } else {
        ValueEncoding::Marked
    };
    let result = compare_files(approx, reference, encoding)?;

    match format {
        OutputFormat::Text => print_text(approx, &result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&result))?),
    }
    Ok(())
}

fn to_json(result: &ComparisonResult) -> serde_json::Value {
    json!({
        "max_absolute_error": result.max_absolute_error,
        "max_relative_error": result.max_relative_error,
        "sum_absolute_error": result.sum_absolute_error,
        "sum_relative_error": result.sum_relative_error,
        "referenced_count": result.referenced_count,
        "approximate_mass": result.approximate_mass,
        "reference_supplied": result.reference_supplied,
        "approximate_residual": result.approximate_residual,
        "reference_residual": result.reference_residual,
    })
}

fn print_text(approx: &Path, result: &ComparisonResult) {
    println!("{}", "Comparison".bold().underline());
    println!();
    println!("{}  {}", "Export:".cyan(), approx.display());
    let reference = if result.reference_supplied {
        "exact export".green()
    } else {
        "none".yellow()
    };
    println!("{}  {}", "Reference:".cyan(), reference);
    println!("{}  {}", "Values:".cyan(), result.referenced_count);
    println!("{}  {:?}", "Mass:".cyan(), result.approximate_mass);
    println!();
    println!("  {} {:?}", "max absolute:".yellow(), result.max_absolute_error);
    println!("  {} {:?}", "max relative:".yellow(), result.max_relative_error);
    println!("  {} {:?}", "sum absolute:".yellow(), result.sum_absolute_error);
    println!("  {} {:?}", "sum relative:".yellow(), result.sum_relative_error);

    if result.has_residual() {
        println!();
        if result.approximate_residual {
            println!("{} export has values past the compared range", "!".yellow().bold());
        }
        if result.reference_residual {
            println!("{} reference has values past the compared range", "!".yellow().bold());
        }
    }
}
