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

//! The evaluation pipeline.
//!
//! A run is processed in fixed stages: discovery, record ingestion,
//! structure repair, per-benchmark evaluation, persistence and report
//! output. Only evaluation may run in parallel; it works on disjoint
//! benchmarks, so the registry and the pivot stay single-writer.
//!
//! No single file aborts a run. Failures are logged, collected into the
//! [`PipelineSummary`] and the remaining files are processed.

use crate::config::PipelineConfig;
use crate::error::CliError;
use colored::Colorize;
use rayon::prelude::*;
use stateval_core::{
    parse_record_file, resolve_structure, save_record, scan_structure_log,
    structure_log_benchmark, BenchmarkRegistry, Limits, RecordFormat, StructureCounts,
    StructureResolution,
};
use stateval_report::{
    build_report, evaluate_benchmark, save_report, BenchmarkEvaluation, Outcome, Partition,
    PivotContext, Tally,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where records are read from and what happens to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Structured records and solver logs from the logs directory; runs are
    /// evaluated and persisted as plain records.
    Raw,
    /// Plain records from the processed directory; reports only.
    Processed,
}

impl Mode {
    pub fn record_format(self) -> RecordFormat {
        match self {
            Mode::Raw => RecordFormat::Structured,
            Mode::Processed => RecordFormat::Plain,
        }
    }

    fn source_dir(self, config: &PipelineConfig) -> &Path {
        match self {
            Mode::Raw => &config.logs_dir,
            Mode::Processed => &config.processed_dir,
        }
    }
}

/// Files found in a source directory, each list in file-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub records: Vec<PathBuf>,
    /// Solver logs paired with the benchmark they describe.
    pub structure_logs: Vec<(String, PathBuf)>,
}

/// A file or record the pipeline could not process.
#[derive(Debug, Clone)]
pub struct Failure {
    /// File path or record name.
    pub item: String,
    pub error: CliError,
}

impl Failure {
    fn new(item: impl Into<String>, error: CliError) -> Self {
        Self {
            item: item.into(),
            error,
        }
    }

    fn file(path: &Path, error: CliError) -> Self {
        Self::new(path.display().to_string(), error)
    }
}

/// What one pipeline run did.
#[derive(Debug, Clone, Default)]
pub struct PipelineSummary {
    pub records: usize,
    pub benchmarks: usize,
    /// Records whose errors were computed.
    pub evaluated: usize,
    pub persisted: usize,
    pub tables: Vec<PathBuf>,
    /// Benchmarks left without structure counts.
    pub unresolved: Vec<String>,
    /// Correct/incorrect counts of the `all` report per configuration.
    pub tallies: Vec<(String, Tally)>,
    pub failures: Vec<Failure>,
    pub elapsed_ms: u128,
}

impl PipelineSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Print the summary to stdout and every failure to stderr.
    pub fn print(&self, operation: &str) {
        for failure in &self.failures {
            eprintln!("{} {} - {}", "✗".red().bold(), failure.item, failure.error);
        }
        for name in &self.unresolved {
            eprintln!("{} {} - structure unresolved", "!".yellow().bold(), name);
        }

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!("{} {}", "Evaluation:".bright_blue().bold(), operation.bright_white());
        println!("{}", "═".repeat(60).bright_blue());
        println!("  {} {}", "Records:".bright_cyan(), self.records.to_string().bright_white());
        println!(
            "  {} {}",
            "Benchmarks:".bright_cyan(),
            self.benchmarks.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Evaluated:".green().bold(),
            self.evaluated.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Persisted:".green().bold(),
            self.persisted.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Tables:".green().bold(),
            self.tables.len().to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Failed:".red().bold(),
            self.failures.len().to_string().bright_white()
        );
        println!("  {} {:.2}s", "Elapsed:".bright_cyan(), self.elapsed_ms as f64 / 1000.0);

        if !self.tallies.is_empty() {
            println!();
            for (configuration, tally) in &self.tallies {
                println!(
                    "  {} {} {} {} {}",
                    "✓".green().bold(),
                    tally.correct.to_string().bright_white(),
                    "✗".red().bold(),
                    tally.incorrect.to_string().bright_white(),
                    configuration
                );
            }
        }
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// List `dir` and classify its files by extension.
///
/// Record files of `format` go into [`Discovery::records`]; `.log` files
/// whose name starts with one of `prefixes` are structure logs. Everything
/// else is ignored.
pub fn discover<S: AsRef<str>>(
    dir: &Path,
    format: RecordFormat,
    prefixes: &[S],
) -> Result<Discovery, CliError> {
    if !dir.is_dir() {
        return Err(CliError::missing_directory(dir));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CliError::io_error(dir, e))? {
        let entry = entry.map_err(|e| CliError::io_error(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut discovery = Discovery::default();
    for path in paths {
        if RecordFormat::from_path(&path) == Some(format) {
            discovery.records.push(path);
            continue;
        }
        let benchmark = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| structure_log_benchmark(name, prefixes));
        if let Some(benchmark) = benchmark {
            discovery.structure_logs.push((benchmark, path));
        }
    }

    debug!(
        dir = %dir.display(),
        records = discovery.records.len(),
        structure_logs = discovery.structure_logs.len(),
        "discovered files"
    );
    Ok(discovery)
}

/// Parse every record file into `registry`. Returns the number ingested.
pub fn ingest(
    registry: &mut BenchmarkRegistry,
    paths: &[PathBuf],
    limits: &Limits,
    failures: &mut Vec<Failure>,
) -> usize {
    let mut ingested = 0;
    for path in paths {
        match parse_record_file(path, limits) {
            Ok(record) => {
                registry.resolve(record);
                ingested += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping record");
                failures.push(Failure::file(path, e.into()));
            }
        }
    }
    ingested
}

fn scan_log(path: &Path) -> Result<StructureCounts, CliError> {
    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
    scan_structure_log(file).map_err(|e| e.with_context(path.display().to_string()).into())
}

fn apply_resolution(
    registry: &mut BenchmarkRegistry,
    name: &str,
    scanned: StructureCounts,
    unresolved: &mut Vec<String>,
) -> Result<(), CliError> {
    match resolve_structure(name, scanned) {
        StructureResolution::Unresolved => {
            warn!(benchmark = name, "structure unresolved, benchmark is flagged");
            if !unresolved.iter().any(|n| n == name) {
                unresolved.push(name.to_string());
            }
            Ok(())
        }
        resolution => {
            if let Some(counts) = resolution.counts() {
                registry.set_structure(name, counts)?;
            }
            Ok(())
        }
    }
}

/// Apply solver-log structure counts, then repair benchmarks still without
/// structure from the legacy override table.
///
/// Returns the benchmarks that remain unresolved.
pub fn repair_structure(
    registry: &mut BenchmarkRegistry,
    structure_logs: &[(String, PathBuf)],
    failures: &mut Vec<Failure>,
) -> Vec<String> {
    let mut unresolved = Vec::new();

    for (name, path) in structure_logs {
        if !registry.contains(name) {
            debug!(benchmark = %name, "structure log without records");
            continue;
        }
        let result = scan_log(path)
            .and_then(|scanned| apply_resolution(registry, name, scanned, &mut unresolved));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "skipping structure log");
            failures.push(Failure::file(path, e));
        }
    }

    let missing: Vec<String> = registry
        .iter()
        .filter(|b| b.structure().is_zero())
        .map(|b| b.name().to_string())
        .filter(|name| !unresolved.contains(name))
        .collect();
    for name in missing {
        if let Err(e) = apply_resolution(registry, &name, StructureCounts::default(), &mut unresolved)
        {
            failures.push(Failure::new(name, e));
        }
    }

    unresolved
}

/// Evaluate every benchmark against its exact run.
pub fn evaluate(registry: &mut BenchmarkRegistry, config: &PipelineConfig) -> Vec<BenchmarkEvaluation> {
    let run_dir = config.run_dir();
    let roles = &config.roles;
    if config.parallel {
        registry
            .benchmarks_mut()
            .par_iter_mut()
            .map(|benchmark| evaluate_benchmark(benchmark, run_dir, roles))
            .collect()
    } else {
        registry
            .benchmarks_mut()
            .iter_mut()
            .map(|benchmark| evaluate_benchmark(benchmark, run_dir, roles))
            .collect()
    }
}

/// Write every record as a plain record into `dir`. Returns the number written.
pub fn persist(registry: &BenchmarkRegistry, dir: &Path, failures: &mut Vec<Failure>) -> usize {
    let mut written = 0;
    for record in registry.records() {
        match save_record(dir, record) {
            Ok(_) => written += 1,
            Err(e) => {
                warn!(record = %record.file_stem(), error = %e, "cannot persist record");
                failures.push(Failure::new(record.file_stem(), e.into()));
            }
        }
    }
    written
}

/// Write the report tables of every partition into the report directory.
pub fn write_reports(
    registry: &BenchmarkRegistry,
    config: &PipelineConfig,
    summary: &mut PipelineSummary,
) -> Result<(), CliError> {
    fs::create_dir_all(&config.report_dir)
        .map_err(|e| CliError::io_error(&config.report_dir, e))?;

    for benchmark in registry.iter().filter(|b| b.reachable_recurrent_states() == 0) {
        warn!(
            benchmark = benchmark.name(),
            "no reachable recurrent states, excluded from reports"
        );
    }

    let ctx = PivotContext::from_registry(&config.roles, registry);
    let records: Vec<_> = registry.records().collect();
    for partition in Partition::ALL {
        let benchmarks = partition.select(registry);
        let report = build_report(partition.name(), &records, &benchmarks, &ctx);
        if partition == Partition::All {
            summary.tallies = report
                .configurations
                .iter()
                .cloned()
                .zip(report.tallies.iter().copied())
                .collect();
        }
        match save_report(&config.report_dir, &report, config.ranking_benchmarks) {
            Ok(tables) => summary.tables.extend(tables),
            Err(e) => {
                warn!(report = partition.name(), error = %e, "cannot write report");
                summary.failures.push(Failure::new(partition.name(), e.into()));
            }
        }
    }
    Ok(())
}

/// Run the whole pipeline in `mode`.
///
/// # Errors
///
/// Only a missing or unreadable source directory, or an unwritable report
/// directory, fails the run. Everything else is recorded in the summary.
pub fn run(config: &PipelineConfig, mode: Mode) -> Result<PipelineSummary, CliError> {
    let start = Instant::now();
    let source = mode.source_dir(config);
    let discovery = discover(source, mode.record_format(), &config.structure_log_prefixes)?;

    let mut summary = PipelineSummary::default();
    let mut registry = BenchmarkRegistry::new();
    summary.records = ingest(
        &mut registry,
        &discovery.records,
        &config.limits,
        &mut summary.failures,
    );
    summary.benchmarks = registry.len();
    info!(
        records = summary.records,
        benchmarks = summary.benchmarks,
        source = %source.display(),
        "ingested records"
    );

    if mode == Mode::Raw {
        summary.unresolved =
            repair_structure(&mut registry, &discovery.structure_logs, &mut summary.failures);

        for evaluation in evaluate(&mut registry, config) {
            summary.evaluated += evaluation.evaluated();
            for failed in evaluation.failures() {
                let error = match &failed.outcome {
                    Outcome::Failed(e) => CliError::Report(e.to_string()),
                    _ => continue,
                };
                summary.failures.push(Failure::new(failed.record.clone(), error));
            }
        }

        fs::create_dir_all(&config.processed_dir)
            .map_err(|e| CliError::io_error(&config.processed_dir, e))?;
        summary.persisted = persist(&registry, &config.processed_dir, &mut summary.failures);
    }

    write_reports(&registry, config, &mut summary)?;

    summary.elapsed_ms = start.elapsed().as_millis();
    info!(
        tables = summary.tables.len(),
        failures = summary.failures.len(),
        elapsed_ms = summary.elapsed_ms as u64,
        "pipeline finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateval_core::{ExperimentRecord, DEFAULT_STRUCTURE_LOG_PREFIXES};
    use stateval_test::{b1_builder, b1_scenario, RecordBuilder, B1_APPROX_EXPORT, B1_EXACT_EXPORT};

    fn config(run: &stateval_test::RunDir) -> PipelineConfig {
        PipelineConfig::new(run.path())
    }

    #[test]
    fn test_discover_sorted_and_classified() {
        let run = b1_builder()
            .file("results/logs/notes.md", "ignored")
            .file("results/logs/storm.x.y.z.B0.log", "not a structure log")
            .build()
            .unwrap();
        let discovery = discover(
            &run.logs_dir(),
            RecordFormat::Structured,
            DEFAULT_STRUCTURE_LOG_PREFIXES,
        )
        .unwrap();

        assert_eq!(discovery.records.len(), 2);
        let names: Vec<_> = discovery
            .records
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(discovery.structure_logs.len(), 1);
        assert_eq!(discovery.structure_logs[0].0, "B1");
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = discover(
            Path::new("/nonexistent/stateval/run"),
            RecordFormat::Plain,
            DEFAULT_STRUCTURE_LOG_PREFIXES,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::MissingDirectory { .. }));
    }

    #[test]
    fn test_oversize_record_is_counted_not_fatal() {
        let oversize = format!("{}\"benchmark-id\": \"B9\"", " ".repeat(8192));
        let run = b1_builder()
            .file("results/logs/oversize.json", oversize)
            .build()
            .unwrap();
        let mut config = config(&run);
        config.limits.max_record_size = 4096;
        let summary = run_pipeline(&config);

        assert_eq!(summary.records, 2);
        assert_eq!(summary.benchmarks, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].item.ends_with("oversize.json"));
    }

    fn run_pipeline(config: &PipelineConfig) -> PipelineSummary {
        run(config, Mode::Raw).unwrap()
    }

    #[test]
    fn test_raw_run_persists_and_reports() {
        let run = b1_scenario().unwrap();
        let summary = run_pipeline(&config(&run));

        assert_eq!(summary.records, 2);
        assert_eq!(summary.benchmarks, 1);
        assert_eq!(summary.evaluated, 1);
        assert_eq!(summary.persisted, 2);
        assert!(summary.unresolved.is_empty());
        assert!(!summary.has_failures());
        // Five partitions, six metrics, no ranking for a single benchmark.
        assert_eq!(summary.tables.len(), 30);

        let plain = run
            .read("results/postprocess/storm.sparse.classic-gmres-topo.0.001.B1.txt")
            .unwrap();
        assert!(plain.contains("states: 3\n"));
        assert!(run.join("results/postprocess/all-maxRelative.csv").is_file());
    }

    #[test]
    fn test_tallies_reported() {
        let run = b1_scenario().unwrap();
        let summary = run_pipeline(&config(&run));
        let (_, tally) = summary
            .tallies
            .iter()
            .find(|(c, _)| c == "storm.sparse.classic-gmres-topo.0.001")
            .unwrap();
        assert_eq!(tally.incorrect, 1);
        assert_eq!(tally.correct, 0);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let run = b1_builder()
            .record(&RecordBuilder::new("B2", "sds").wall_clock(2.0))
            .structure_log("B2", 4, 2, 1, 3)
            .build()
            .unwrap();
        run_pipeline(&config(&run));
        let serial = run.read("results/postprocess/all-maxAbsolute.csv").unwrap();
        run_pipeline(&config(&run).with_parallel(true));
        let parallel = run.read("results/postprocess/all-maxAbsolute.csv").unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_processed_mode_reports_only() {
        let run = b1_scenario().unwrap();
        let config = config(&run).with_ranking(None);
        run_pipeline(&config);
        let raw = run.read("results/postprocess/all-maxRelative.csv").unwrap();

        let summary = super::run(&config, Mode::Processed).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.evaluated, 0);
        assert_eq!(summary.persisted, 0);
        assert_eq!(summary.tables.len(), 40);
        let processed = run.read("results/postprocess/all-maxRelative.csv").unwrap();
        assert_eq!(raw, processed);
    }

    #[test]
    fn test_legacy_override_and_unresolved() {
        let run = stateval_test::RunDirBuilder::new()
            .record(&RecordBuilder::new("lumbroso.1000", "sds"))
            .record(&RecordBuilder::new("B7", "sds"))
            .build()
            .unwrap();
        let mut registry = BenchmarkRegistry::new();
        let discovery = discover(
            &run.logs_dir(),
            RecordFormat::Structured,
            DEFAULT_STRUCTURE_LOG_PREFIXES,
        )
        .unwrap();
        let mut failures = Vec::new();
        ingest(&mut registry, &discovery.records, &Limits::default(), &mut failures);
        let unresolved = repair_structure(&mut registry, &discovery.structure_logs, &mut failures);

        assert!(failures.is_empty());
        assert_eq!(unresolved, vec!["B7".to_string()]);
        let lumbroso = registry.get("lumbroso.1000").unwrap();
        assert!(!lumbroso.structure().is_zero());
        assert_eq!(
            lumbroso.experiments()[0].structure,
            lumbroso.structure()
        );
    }

    #[test]
    fn test_unreadable_exact_export_reports_no_reference() {
        let run = b1_builder()
            .marked_export(B1_APPROX_EXPORT, &[0.5, 0.3, 0.1])
            .build()
            .unwrap();
        fs::remove_file(run.join(B1_EXACT_EXPORT)).unwrap();
        let summary = run_pipeline(&config(&run));

        let max_relative = run.read("results/postprocess/all-maxRelative.csv").unwrap();
        let row = max_relative.lines().nth(1).unwrap();
        assert!(row.starts_with("B1;3;fully-recurrent;-15;"), "{}", row);

        // Classified on the absolute error: the mass is off by 0.1.
        let (_, tally) = summary
            .tallies
            .iter()
            .find(|(c, _)| c == "storm.sparse.classic-gmres-topo.0.001")
            .unwrap();
        assert_eq!(tally.correct, 0);
        assert_eq!(tally.incorrect, 1);
    }

    #[test]
    fn test_zero_reachable_benchmark_excluded_from_reports() {
        let export = "results/logs/exports/storm.sparse.default.0.001.B2.json";
        let run = stateval_test::RunDirBuilder::new()
            .record(&RecordBuilder::new("B2", "storm").export(export).wall_clock(3.0))
            .marked_export(export, &[0.5, 0.5])
            .build()
            .unwrap();
        let summary = run_pipeline(&config(&run));

        assert_eq!(summary.unresolved, vec!["B2".to_string()]);
        assert_eq!(summary.failures.len(), 1);
        assert!(matches!(summary.failures[0].error, CliError::Report(_)));

        for table in ["all-maxAbsolute", "all-correctTime", "singletonBSCCs-time"] {
            let text = run
                .read(format!("results/postprocess/{}.csv", table))
                .unwrap();
            assert_eq!(text.lines().count(), 1, "{}: {}", table, text);
        }
        let (_, tally) = summary
            .tallies
            .iter()
            .find(|(c, _)| c == "storm.sparse.default.0.001")
            .unwrap();
        assert_eq!(*tally, Tally::default());
    }

    #[test]
    fn test_recounted_reachable_survives_processed_mode() {
        let exact = "results/logs/exports/storm.sparse.classic-luexact-topo.ignored.B3.json";
        let run = stateval_test::RunDirBuilder::new()
            .record(
                &RecordBuilder::new("B3", "storm")
                    .solver("classic-luexact-topo")
                    .precision("ignored")
                    .export(exact),
            )
            .marked_export(exact, &[0.5, 0.0, 0.5])
            .build()
            .unwrap();
        let config = config(&run);

        run_pipeline(&config);
        let raw = run.read("results/postprocess/all-time.csv").unwrap();
        assert!(raw.contains("\nB3;3;mixed;"), "{}", raw);

        super::run(&config, Mode::Processed).unwrap();
        let processed = run.read("results/postprocess/all-time.csv").unwrap();
        assert_eq!(raw, processed);
    }

    #[test]
    fn test_persist_into_missing_dir_fails_per_record() {
        let mut registry = BenchmarkRegistry::new();
        registry.resolve(ExperimentRecord::new("B1"));
        let mut failures = Vec::new();
        let written = persist(&registry, Path::new("/nonexistent/stateval/out"), &mut failures);
        assert_eq!(written, 0);
        assert_eq!(failures.len(), 1);
    }
}
