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

//! Benchmark by tool-configuration report matrices.

use crate::aggregate::{classify, normalized_error, Verdict, NO_REFERENCE};
use stateval_core::{Benchmark, BenchmarkRegistry, ExperimentRecord, StationaryCategory, ToolRoles};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{info, warn};

/// Columns before the first tool configuration.
pub const LEADING_COLUMNS: usize = 3;

/// Fixed values written in place of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// The run exported nothing usable (`5`).
    Failed,
    /// Nothing to compare against (`-15`).
    NoReference,
    /// Timed out, crashed or incorrect (`6000`).
    Penalty,
}

impl Sentinel {
    pub fn value(self) -> f64 {
        match self {
            Sentinel::Failed => 5.0,
            Sentinel::NoReference => NO_REFERENCE,
            Sentinel::Penalty => 6000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::Failed => "5",
            Sentinel::NoReference => "-15",
            Sentinel::Penalty => "6000",
        }
    }
}

/// One matrix cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Never written; rendered as `null`.
    #[default]
    Missing,
    /// Deliberately empty.
    Blank,
    Text(String),
    Number(f64),
    Sentinel(Sentinel),
}

impl Cell {
    /// Numeric value of numbers and sentinels.
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Sentinel(s) => Some(s.value()),
            _ => None,
        }
    }

    /// Text written to a table, `None` for missing cells.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Blank => Some(String::new()),
            Cell::Text(text) => Some(text.clone()),
            Cell::Number(v) => Some(format!("{:?}", v)),
            Cell::Sentinel(s) => Some(s.as_str().to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

/// A rectangular grid; row 0 is the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportMatrix {
    rows: Vec<Vec<Cell>>,
}

impl ReportMatrix {
    /// A matrix with the given header and `rows` rows of missing cells.
    pub fn new(header: Vec<Cell>, rows: usize) -> Self {
        let width = header.len();
        let mut grid = Vec::with_capacity(rows + 1);
        grid.push(header);
        grid.extend((0..rows).map(|_| vec![Cell::Missing; width]));
        Self { rows: grid }
    }

    /// Header cells followed by one row per benchmark: name, states, category.
    pub fn with_benchmarks(configurations: &[String], benchmarks: &[&Benchmark]) -> Self {
        let mut header: Vec<Cell> = vec![
            "Benchmark-id".into(),
            "states".into(),
            "stationary-category".into(),
        ];
        header.extend(configurations.iter().map(|c| Cell::Text(c.clone())));

        let mut matrix = Self::new(header, benchmarks.len());
        for (i, benchmark) in benchmarks.iter().enumerate() {
            let row = &mut matrix.rows[i + 1];
            row[0] = benchmark.name().into();
            row[1] = Cell::Text(benchmark.states().to_string());
            row[2] = benchmark.category().as_str().into();
        }
        matrix
    }

    /// Rows including the header.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Overwrite a cell; out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *slot = cell;
        }
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut Vec<Cell>> {
        self.rows.get_mut(row)
    }
}

impl fmt::Display for ReportMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .map(|c| c.render().unwrap_or_else(|| "null".to_string()))
                .collect();
            writeln!(f, "{}", line.join(";"))?;
        }
        Ok(())
    }
}

/// Which value a matrix holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    MaxAbsolute,
    AverageAbsolute,
    MaxRelative,
    AverageRelative,
    Time,
    CorrectTime,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::MaxAbsolute,
        Metric::MaxRelative,
        Metric::AverageAbsolute,
        Metric::AverageRelative,
        Metric::Time,
        Metric::CorrectTime,
    ];

    /// File name suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Metric::MaxAbsolute => "maxAbsolute",
            Metric::AverageAbsolute => "averageAbsolute",
            Metric::MaxRelative => "maxRelative",
            Metric::AverageRelative => "averageRelative",
            Metric::Time => "time",
            Metric::CorrectTime => "correctTime",
        }
    }

    fn index(self) -> usize {
        match self {
            Metric::MaxAbsolute => 0,
            Metric::MaxRelative => 1,
            Metric::AverageAbsolute => 2,
            Metric::AverageRelative => 3,
            Metric::Time => 4,
            Metric::CorrectTime => 5,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Subset of benchmarks a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    All,
    OneStationary,
    AllStationary,
    SingletonBsccs,
    Mixed,
}

impl Partition {
    pub const ALL: [Partition; 5] = [
        Partition::All,
        Partition::OneStationary,
        Partition::AllStationary,
        Partition::SingletonBsccs,
        Partition::Mixed,
    ];

    /// Report name prefix.
    pub fn name(self) -> &'static str {
        match self {
            Partition::All => "all",
            Partition::OneStationary => "oneStationary",
            Partition::AllStationary => "allStationary",
            Partition::SingletonBsccs => "singletonBSCCs",
            Partition::Mixed => "mixed",
        }
    }

    /// Benchmarks without reachable recurrent states have no defined
    /// averages and belong to no partition.
    pub fn contains(self, benchmark: &Benchmark) -> bool {
        if benchmark.reachable_recurrent_states() == 0 {
            return false;
        }
        let category = benchmark.category();
        match self {
            Partition::All => true,
            Partition::OneStationary => category == StationaryCategory::OneSingletonRecurrent,
            Partition::AllStationary => category == StationaryCategory::FullyRecurrent,
            Partition::SingletonBsccs => category == StationaryCategory::SingletonRecurrent,
            Partition::Mixed => category == StationaryCategory::Mixed,
        }
    }

    /// Benchmarks of `registry` in this partition, in first-seen order.
    pub fn select<'a>(self, registry: &'a BenchmarkRegistry) -> Vec<&'a Benchmark> {
        registry.iter().filter(|b| self.contains(b)).collect()
    }
}

/// Role assignments plus the benchmarks that have an exact export.
#[derive(Debug, Clone)]
pub struct PivotContext<'a> {
    roles: &'a ToolRoles,
    exact: HashSet<String>,
}

impl<'a> PivotContext<'a> {
    pub fn new<'r, I>(roles: &'a ToolRoles, records: I) -> Self
    where
        I: IntoIterator<Item = &'r ExperimentRecord>,
    {
        let exact = records
            .into_iter()
            .filter(|r| roles.is_exact(&r.precision) && r.has_export())
            .map(|r| r.benchmark_name.clone())
            .collect();
        Self { roles, exact }
    }

    pub fn from_registry(roles: &'a ToolRoles, registry: &BenchmarkRegistry) -> Self {
        Self::new(roles, registry.records())
    }

    pub fn roles(&self) -> &ToolRoles {
        self.roles
    }

    pub fn exact_exists(&self, benchmark: &str) -> bool {
        self.exact.contains(benchmark)
    }
}

/// Per-configuration correctness counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
}

/// The six cells one record contributes, in [`Metric::index`] order.
struct RecordCells {
    cells: [Option<Cell>; 6],
    verdict: Option<Verdict>,
}

fn floored_time(record: &ExperimentRecord) -> Cell {
    Cell::Number(record.wall_clock_time.max(1.0))
}

/// The relative errors were measured against a readable exact export.
///
/// An exact run whose export could not be opened leaves the `-15` marker in
/// the relative fields.
fn has_relative_errors(record: &ExperimentRecord) -> bool {
    record.errors.max_relative != NO_REFERENCE
}

fn record_cells(record: &ExperimentRecord, ctx: &PivotContext<'_>) -> RecordCells {
    let roles = ctx.roles();
    let reference_tool = roles.is_reference_tool(&record.tool);
    let errors = &record.errors;
    let mut out = RecordCells {
        cells: Default::default(),
        verdict: None,
    };

    let error_cells = if record.has_export() && !record.failed() {
        let exact = roles.is_compared_tool(&record.tool)
            && ctx.exact_exists(&record.benchmark_name)
            && has_relative_errors(record);
        let relative = |value: f64| {
            if exact {
                Cell::Number(normalized_error(value, true))
            } else {
                Cell::Sentinel(Sentinel::NoReference)
            }
        };
        let verdict = classify(record, exact);
        out.verdict = Some(verdict);
        out.cells[Metric::CorrectTime.index()] = Some(match verdict {
            Verdict::Correct => floored_time(record),
            Verdict::Incorrect => Cell::Sentinel(Sentinel::Penalty),
        });
        [
            Cell::Number(normalized_error(errors.max_absolute, true)),
            relative(errors.max_relative),
            Cell::Number(normalized_error(errors.average_absolute, true)),
            relative(errors.average_relative),
        ]
    } else if !reference_tool || record.failed() {
        [(); 4].map(|_| Cell::Sentinel(Sentinel::Failed))
    } else {
        [(); 4].map(|_| Cell::Sentinel(Sentinel::NoReference))
    };
    for (slot, cell) in out.cells.iter_mut().zip(error_cells) {
        *slot = Some(cell);
    }

    if record.failed() {
        out.cells[Metric::Time.index()] = Some(Cell::Sentinel(Sentinel::Penalty));
        out.cells[Metric::CorrectTime.index()] = Some(Cell::Sentinel(Sentinel::Penalty));
    } else if record.has_export() || reference_tool {
        out.cells[Metric::Time.index()] = Some(floored_time(record));
        if reference_tool && out.verdict.is_none() {
            out.verdict = Some(Verdict::Correct);
            out.cells[Metric::CorrectTime.index()] = Some(floored_time(record));
        }
    } else {
        warn!(record = %record.file_stem(), "no export file and no errors");
    }

    out
}

/// Tool configurations in first-seen order.
pub fn configurations<'r, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'r ExperimentRecord>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for record in records {
        let configuration = record.tool_configuration();
        if seen.insert(configuration.clone()) {
            ordered.push(configuration);
        }
    }
    ordered
}

/// The six matrices of one benchmark selection plus correctness tallies.
#[derive(Debug, Clone)]
pub struct Report {
    pub name: String,
    pub configurations: Vec<String>,
    matrices: Vec<ReportMatrix>,
    pub tallies: Vec<Tally>,
    pub benchmark_count: usize,
}

impl Report {
    pub fn matrix(&self, metric: Metric) -> &ReportMatrix {
        &self.matrices[metric.index()]
    }

    /// Matrices paired with their metric, in [`Metric::ALL`] order.
    pub fn matrices(&self) -> impl Iterator<Item = (Metric, &ReportMatrix)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.matrix(m)))
    }

    /// Tally of one configuration.
    pub fn tally(&self, configuration: &str) -> Option<Tally> {
        self.configurations
            .iter()
            .position(|c| c == configuration)
            .map(|i| self.tallies[i])
    }

    /// `<name>-<metric>` table name.
    pub fn table_name(&self, suffix: impl fmt::Display) -> String {
        format!("{}-{}", self.name, suffix)
    }
}

/// Build all six matrices for `benchmarks` in one pass over `records`.
///
/// Columns come from every record, rows only from `benchmarks`; records of
/// other benchmarks are skipped.
pub fn build_report(
    name: &str,
    records: &[&ExperimentRecord],
    benchmarks: &[&Benchmark],
    ctx: &PivotContext<'_>,
) -> Report {
    let configurations = configurations(records.iter().copied());
    let columns: HashMap<&str, usize> = configurations
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();
    let rows: HashMap<&str, usize> = benchmarks
        .iter()
        .enumerate()
        .map(|(i, b)| (b.name(), i + 1))
        .collect();

    let template = ReportMatrix::with_benchmarks(&configurations, benchmarks);
    let mut matrices = vec![template; Metric::ALL.len()];
    let mut tallies = vec![Tally::default(); configurations.len()];

    for record in records {
        let Some(&row) = rows.get(record.benchmark_name.as_str()) else {
            continue;
        };
        let configuration = record.tool_configuration();
        let Some(&column) = columns.get(configuration.as_str()) else {
            continue;
        };

        let cells = record_cells(record, ctx);
        for (matrix, cell) in matrices.iter_mut().zip(cells.cells) {
            if let Some(cell) = cell {
                matrix.set(row, column + LEADING_COLUMNS, cell);
            }
        }
        match cells.verdict {
            Some(Verdict::Correct) => tallies[column].correct += 1,
            Some(Verdict::Incorrect) => tallies[column].incorrect += 1,
            None => {}
        }
    }

    for (configuration, tally) in configurations.iter().zip(&tallies) {
        info!(
            report = name,
            configuration = %configuration,
            correct = tally.correct,
            incorrect = tally.incorrect,
            benchmarks = benchmarks.len(),
            "solved"
        );
    }

    Report {
        name: name.to_string(),
        configurations,
        matrices,
        tallies,
        benchmark_count: benchmarks.len(),
    }
}

/// Build a single metric matrix.
pub fn build_matrix(
    records: &[&ExperimentRecord],
    benchmarks: &[&Benchmark],
    metric: Metric,
    ctx: &PivotContext<'_>,
) -> ReportMatrix {
    let mut report = build_report(metric.suffix(), records, benchmarks, ctx);
    report.matrices.swap_remove(metric.index())
}
