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
use stateval_core::{parse_record_file, ExperimentRecord, Limits};
use std::path::Path;

/// Print a parsed record, in either format.
pub fn inspect(file: &Path, format: OutputFormat, limits: &Limits) -> Result<(), CliError> {
    let record = parse_record_file(file, limits)?;
    match format {
        OutputFormat::Text => print_record(&record),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn print_record(record: &ExperimentRecord) {
    println!("{}", "Experiment Record".bold().underline());
    println!();
    println!("{}  {}", "Benchmark:".cyan(), record.benchmark_name.green());
    println!("{}  {}", "Configuration:".cyan(), record.tool_configuration());
    println!(
        "{}  {:?}s (model checking {:?}s)",
        "Wall clock:".cyan(),
        record.wall_clock_time,
        record.mc_time
    );

    let status = if record.timeout {
        "timeout".red()
    } else if record.execution_error {
        "execution error".red()
    } else {
        "finished".green()
    };
    println!("{}  {}", "Status:".cyan(), status);
    println!(
        "{}  {}",
        "Export:".cyan(),
        optional(record.export_value_file.as_deref())
    );
    println!("{}  {}", "Log:".cyan(), optional(record.log.as_deref()));

    println!();
    println!("{}", "Structure:".cyan());
    let s = &record.structure;
    println!("  {}: {}", "states".yellow(), s.states);
    println!("  {}: {}", "SCCs".yellow(), s.sccs);
    println!("  {}: {}", "BSCCs".yellow(), s.bsccs);
    println!("  {}: {}", "non-BSCC states".yellow(), s.non_bsccs);
    println!(
        "  {}: {}",
        "reachable recurrent".yellow(),
        record.reachable_recurrent_states
    );

    println!();
    println!("{}", "Errors:".cyan());
    let e = &record.errors;
    println!("  {}: {:?}", "max absolute".yellow(), e.max_absolute);
    println!("  {}: {:?}", "max relative".yellow(), e.max_relative);
    println!("  {}: {:?}", "average absolute".yellow(), e.average_absolute);
    println!("  {}: {:?}", "average relative".yellow(), e.average_relative);
}
