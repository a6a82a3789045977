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

//! Semicolon-delimited table output.

use crate::error::{ReportError, Result};
use crate::matrix::{Metric, Report, ReportMatrix};
use crate::rank::{rank_by_benchmark, sort_by_configuration};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Table name suffix of the ranked correct-time matrix.
pub const RANKED_TIME: &str = "rankedTime";

/// Table name suffix of the per-configuration sorted correct-time matrix.
pub const SORTED_TIME: &str = "sortedTime";

#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Field delimiter (default: ';')
    pub delimiter: u8,
    /// Quote style for fields (default: never)
    pub quote_style: csv::QuoteStyle,
    /// Text written for missing cells (default: "null")
    pub null_text: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            quote_style: csv::QuoteStyle::Never,
            null_text: "null".to_string(),
        }
    }
}

fn write_rows<W: Write>(
    matrix: &ReportMatrix,
    writer: W,
    config: &TableConfig,
) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);

    for row in matrix.rows() {
        let record: Vec<String> = row
            .iter()
            .map(|cell| cell.render().unwrap_or_else(|| config.null_text.clone()))
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `matrix` as delimited rows, one line per row.
pub fn write_table<W: Write>(matrix: &ReportMatrix, writer: W, config: &TableConfig) -> Result<()> {
    write_rows(matrix, writer, config).map_err(|e| ReportError::Write {
        table: "table".to_string(),
        message: e.to_string(),
    })
}

pub fn table_to_string(matrix: &ReportMatrix, config: &TableConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(matrix.height() * matrix.width() * 12);
    write_table(matrix, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| ReportError::InvalidUtf8 {
        context: "table output".to_string(),
    })
}

/// Write `matrix` to `<dir>/<name>.csv` with the default configuration.
pub fn save_table(dir: &Path, name: &str, matrix: &ReportMatrix) -> Result<PathBuf> {
    save_table_with_config(dir, name, matrix, &TableConfig::default())
}

pub fn save_table_with_config(
    dir: &Path,
    name: &str,
    matrix: &ReportMatrix,
    config: &TableConfig,
) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", name));
    let file = File::create(&path)?;
    write_rows(matrix, BufWriter::new(file), config).map_err(|e| ReportError::Write {
        table: name.to_string(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "wrote table");
    Ok(path)
}

/// Whether the ranking tables are produced for a report of `benchmarks` rows.
///
/// `None` ranks every report; `Some(n)` only reports with exactly `n` rows.
pub fn ranking_applies(ranking_benchmarks: Option<usize>, benchmarks: usize) -> bool {
    ranking_benchmarks.map_or(true, |n| n == benchmarks)
}

/// Write every matrix of `report`, plus the ranking tables when they apply.
pub fn save_report(
    dir: &Path,
    report: &Report,
    ranking_benchmarks: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(Metric::ALL.len() + 2);
    for (metric, matrix) in report.matrices() {
        written.push(save_table(dir, &report.table_name(metric), matrix)?);
    }

    if ranking_applies(ranking_benchmarks, report.benchmark_count) {
        let mut correct_time = report.matrix(Metric::CorrectTime).clone();
        let ranked = rank_by_benchmark(&mut correct_time);
        written.push(save_table(dir, &report.table_name(RANKED_TIME), &ranked)?);

        let mut correct_time = report.matrix(Metric::CorrectTime).clone();
        let sorted = sort_by_configuration(&mut correct_time);
        written.push(save_table(dir, &report.table_name(SORTED_TIME), &sorted)?);
    }
    Ok(written)
}
