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

//! Error aggregation, normalization and per-benchmark evaluation.

use crate::error::{AggregateError, ReportError};
use stateval_core::{Benchmark, ErrorMetrics, ExperimentRecord, ToolRoles};
use stateval_stream::{
    compare_files, total_mass_file, ComparisonResult, ValueEncoding, ValueStream,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Placed where no reference exists to measure against.
pub const NO_REFERENCE: f64 = -15.0;

/// Lower clamp bound, keeps log-scale plots finite.
pub const CLAMP_MIN: f64 = 0.000_000_1;

pub const CLAMP_MAX: f64 = 1.0;

/// A normalized error strictly below this is correct.
pub const CORRECTNESS_THRESHOLD: f64 = 0.001;

fn averaged(record: &ExperimentRecord, value: f64, reachable: u64) -> Result<f64, AggregateError> {
    if reachable == 0 {
        return Err(AggregateError::DivisionByZero {
            benchmark: record.benchmark_name.clone(),
        });
    }
    Ok(value / reachable as f64)
}

/// Write the error metrics of one comparison pass onto `record`.
///
/// The absolute error is the deviation of the counted approximate mass from
/// one, and its average divides that same total by `reachable`. Relative
/// fields are `-15` unless a reference was compared against. With
/// `reachable == 0` the record is left untouched.
pub fn aggregate(
    record: &mut ExperimentRecord,
    comparison: &ComparisonResult,
    reference_exists: bool,
    reachable: u64,
) -> Result<(), AggregateError> {
    let max_absolute = (comparison.approximate_mass - 1.0).abs();
    let average_absolute = averaged(record, max_absolute, reachable)?;
    let (max_relative, average_relative) = if reference_exists {
        (
            comparison.max_relative_error,
            averaged(record, comparison.sum_relative_error, reachable)?,
        )
    } else {
        (NO_REFERENCE, NO_REFERENCE)
    };

    record.set_errors(ErrorMetrics {
        max_absolute,
        max_relative,
        average_absolute,
        average_relative,
    });
    Ok(())
}

/// Mass-only variant for tools whose exports are bare numbers.
pub fn aggregate_mass(
    record: &mut ExperimentRecord,
    mass: f64,
    reachable: u64,
) -> Result<(), AggregateError> {
    let max_absolute = (mass - 1.0).abs();
    let average_absolute = averaged(record, max_absolute, reachable)?;
    record.set_errors(ErrorMetrics {
        max_absolute,
        max_relative: NO_REFERENCE,
        average_absolute,
        average_relative: NO_REFERENCE,
    });
    Ok(())
}

/// Clamp an error into `[CLAMP_MIN, CLAMP_MAX]`, or `-15` without a reference.
///
/// ```
/// use stateval_report::normalized_error;
///
/// assert_eq!(normalized_error(3.0, true), 1.0);
/// assert_eq!(normalized_error(0.0, true), 0.000_000_1);
/// assert_eq!(normalized_error(0.02, true), 0.02);
/// assert_eq!(normalized_error(0.02, false), -15.0);
/// ```
pub fn normalized_error(value: f64, reference_exists: bool) -> f64 {
    if !reference_exists {
        NO_REFERENCE
    } else if value > CLAMP_MAX {
        CLAMP_MAX
    } else if value < CLAMP_MIN {
        CLAMP_MIN
    } else {
        value
    }
}

/// Correctness of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[inline]
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Classify a run by its normalized error.
///
/// `reference_exists` means the record's relative error was measured against
/// an exact run; then the relative error decides, otherwise the absolute one.
pub fn classify(record: &ExperimentRecord, reference_exists: bool) -> Verdict {
    let error = if reference_exists {
        normalized_error(record.errors.max_relative, true)
    } else {
        normalized_error(record.errors.max_absolute, true)
    };
    if error < CORRECTNESS_THRESHOLD {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// What evaluation did with one record.
#[derive(Debug)]
pub enum Outcome {
    /// Compared value by value; errors written.
    Compared(ComparisonResult),
    /// Only the total mass was checked; errors written.
    MassChecked(f64),
    /// Nothing to evaluate: no export, the exact run itself, or a tool
    /// without a comparison role.
    Skipped,
    /// Evaluation failed; the record keeps its previous errors.
    Failed(ReportError),
}

#[derive(Debug)]
pub struct RecordOutcome {
    /// File stem of the record.
    pub record: String,
    pub outcome: Outcome,
}

/// Result of evaluating every run of one benchmark.
#[derive(Debug)]
pub struct BenchmarkEvaluation {
    pub benchmark: String,
    /// Export of the exact run, if one could be opened.
    pub reference: Option<PathBuf>,
    pub reachable_recurrent_states: u64,
    pub outcomes: Vec<RecordOutcome>,
}

impl BenchmarkEvaluation {
    pub fn evaluated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Compared(_) | Outcome::MassChecked(_)))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> + '_ {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed(_)))
    }
}

/// First exact run whose export can be opened.
fn find_reference(benchmark: &Benchmark, run_dir: &Path, roles: &ToolRoles) -> Option<PathBuf> {
    benchmark
        .experiments()
        .iter()
        .filter(|r| roles.is_exact(&r.precision))
        .filter_map(|r| r.export_value_file.as_deref())
        .map(|export| run_dir.join(export))
        .find(|path| match File::open(path) {
            Ok(_) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "exact export unreadable");
                false
            }
        })
}

/// Recount reachable recurrent states from the reference distribution.
fn recount_from_reference(benchmark: &mut Benchmark, reference: &Path) {
    match File::open(reference) {
        Ok(file) => {
            let values = ValueStream::new(file, ValueEncoding::Marked).map_while(|value| {
                value
                    .map_err(|e| warn!(error = %e, "reference export unreadable while recounting"))
                    .ok()
            });
            let reachable = benchmark.recount_reachable(values);
            info!(
                benchmark = benchmark.name(),
                reachable, "recounted reachable recurrent states from exact export"
            );
        }
        Err(e) => warn!(path = %reference.display(), error = %e, "cannot recount reachable states"),
    }
}

fn evaluate_record(
    record: &mut ExperimentRecord,
    export: &Path,
    reference: Option<&Path>,
    reachable: u64,
    roles: &ToolRoles,
) -> Outcome {
    let stem = record.file_stem();
    if roles.is_compared_tool(&record.tool) {
        match compare_files(export, reference, ValueEncoding::Marked) {
            Ok(comparison) => {
                match aggregate(record, &comparison, comparison.reference_supplied, reachable) {
                    Ok(()) => Outcome::Compared(comparison),
                    Err(e) => Outcome::Failed(e.into()),
                }
            }
            Err(source) => Outcome::Failed(ReportError::Comparison {
                record: stem,
                source,
            }),
        }
    } else if roles.is_bare_export_tool(&record.tool) {
        match total_mass_file(export, ValueEncoding::Bare) {
            Ok(mass) => match aggregate_mass(record, mass, reachable) {
                Ok(()) => Outcome::MassChecked(mass),
                Err(e) => Outcome::Failed(e.into()),
            },
            Err(source) => Outcome::Failed(ReportError::Comparison {
                record: stem,
                source,
            }),
        }
    } else {
        Outcome::Skipped
    }
}

/// Evaluate every run of `benchmark` against its exact run.
///
/// Export paths are resolved against `run_dir`. Runs of the compared tool are
/// compared value by value; runs of bare-export tools are mass-checked. The
/// exact run itself and runs without an export are skipped. A failing record
/// does not stop the others.
pub fn evaluate_benchmark(
    benchmark: &mut Benchmark,
    run_dir: &Path,
    roles: &ToolRoles,
) -> BenchmarkEvaluation {
    let reference = find_reference(benchmark, run_dir, roles);
    if reference.is_none() {
        debug!(benchmark = benchmark.name(), "no exact export, comparing without reference");
    }

    if benchmark.reachable_recurrent_states() == 0 {
        if let Some(reference) = reference.as_deref() {
            recount_from_reference(benchmark, reference);
        }
    }
    let reachable = benchmark.reachable_recurrent_states();

    let mut outcomes = Vec::with_capacity(benchmark.experiments().len());
    for record in benchmark.experiments_mut() {
        let outcome = match record.export_value_file.as_deref() {
            Some(export) if !roles.is_exact(&record.precision) => {
                let export = run_dir.join(export);
                evaluate_record(record, &export, reference.as_deref(), reachable, roles)
            }
            _ => Outcome::Skipped,
        };
        if let Outcome::Failed(e) = &outcome {
            warn!(record = %record.file_stem(), error = %e, "evaluation failed");
        }
        outcomes.push(RecordOutcome {
            record: record.file_stem(),
            outcome,
        });
    }

    let evaluation = BenchmarkEvaluation {
        benchmark: benchmark.name().to_string(),
        reference,
        reachable_recurrent_states: reachable,
        outcomes,
    };
    info!(
        benchmark = %evaluation.benchmark,
        states = benchmark.states(),
        reachable,
        evaluated = evaluation.evaluated(),
        "evaluated benchmark"
    );
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateval_core::{parse_record_file, BenchmarkRegistry, Limits, StructureCounts};
    use stateval_test::{b1_builder, b1_scenario, RecordBuilder, RunDir, B1_APPROX_EXPORT};

    fn comparison(mass: f64, max_relative: f64, sum_relative: f64) -> ComparisonResult {
        ComparisonResult {
            approximate_mass: mass,
            max_relative_error: max_relative,
            sum_relative_error: sum_relative,
            reference_supplied: true,
            ..ComparisonResult::default()
        }
    }

    fn load(run: &RunDir) -> BenchmarkRegistry {
        let mut names: Vec<_> = std::fs::read_dir(run.logs_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().map_or(false, |e| e == "json"))
            .collect();
        names.sort();
        let mut registry = BenchmarkRegistry::new();
        for path in names {
            registry.resolve(parse_record_file(&path, &Limits::default()).unwrap());
        }
        registry
    }

    // ==================== aggregate ====================

    #[test]
    fn test_aggregate_with_reference() {
        let mut record = ExperimentRecord::new("B1");
        aggregate(&mut record, &comparison(0.98, 0.05, 0.09), true, 3).unwrap();
        assert!((record.errors.max_absolute - 0.02).abs() < 1e-12);
        assert!((record.errors.average_absolute - 0.02 / 3.0).abs() < 1e-12);
        assert_eq!(record.errors.max_relative, 0.05);
        assert!((record.errors.average_relative - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_average_absolute_divides_mass_deviation() {
        let mut record = ExperimentRecord::new("B1");
        let mut result = comparison(1.5, 0.0, 0.0);
        result.sum_absolute_error = 42.0;
        aggregate(&mut record, &result, true, 5).unwrap();
        assert_eq!(record.errors.max_absolute, 0.5);
        assert_eq!(record.errors.average_absolute, 0.1);
    }

    #[test]
    fn test_aggregate_without_reference() {
        let mut record = ExperimentRecord::new("B1");
        aggregate(&mut record, &comparison(1.0, 0.5, 0.5), false, 3).unwrap();
        assert_eq!(record.errors.max_absolute, 0.0);
        assert_eq!(record.errors.max_relative, NO_REFERENCE);
        assert_eq!(record.errors.average_relative, NO_REFERENCE);
    }

    #[test]
    fn test_aggregate_division_by_zero_leaves_record() {
        let mut record = ExperimentRecord::new("B9");
        let err = aggregate(&mut record, &comparison(0.5, 0.1, 0.1), true, 0).unwrap_err();
        assert_eq!(
            err,
            AggregateError::DivisionByZero {
                benchmark: "B9".to_string()
            }
        );
        assert_eq!(record.errors, ErrorMetrics::default());
    }

    #[test]
    fn test_aggregate_mass() {
        let mut record = ExperimentRecord::new("B1");
        aggregate_mass(&mut record, 0.75, 5).unwrap();
        assert_eq!(record.errors.max_absolute, 0.25);
        assert_eq!(record.errors.average_absolute, 0.05);
        assert_eq!(record.errors.max_relative, NO_REFERENCE);
        assert!(aggregate_mass(&mut record, 0.75, 0).is_err());
    }

    // ==================== normalization and classification ====================

    #[test]
    fn test_normalized_error_bounds() {
        assert_eq!(normalized_error(1.0, true), 1.0);
        assert_eq!(normalized_error(CLAMP_MIN, true), CLAMP_MIN);
        assert_eq!(normalized_error(-3.0, true), CLAMP_MIN);
        assert_eq!(normalized_error(0.5, false), NO_REFERENCE);
    }

    #[test]
    fn test_classify_relative_threshold() {
        let mut record = ExperimentRecord::new("B1");
        record.errors.max_relative = 0.029;
        record.errors.max_absolute = 0.0;
        assert_eq!(classify(&record, true), Verdict::Incorrect);
        assert_eq!(classify(&record, false), Verdict::Correct);

        record.errors.max_relative = 0.0009;
        assert!(classify(&record, true).is_correct());
    }

    #[test]
    fn test_classify_sentinel_relative_uses_absolute() {
        let mut record = ExperimentRecord::new("B1");
        record.errors.max_relative = NO_REFERENCE;
        record.errors.max_absolute = 0.5;
        assert_eq!(classify(&record, false), Verdict::Incorrect);
    }

    // ==================== evaluate_benchmark ====================

    #[test]
    fn test_three_state_scenario_is_incorrect() {
        let run = b1_scenario().unwrap();
        let mut registry = load(&run);
        registry
            .set_structure("B1", StructureCounts::new(3, 1, 1, 0))
            .unwrap();

        let benchmark = registry.get_mut("B1").unwrap();
        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());
        assert!(evaluation.reference.is_some());
        assert_eq!(evaluation.evaluated(), 1);
        assert_eq!(evaluation.failures().count(), 0);

        let approx = benchmark
            .experiments()
            .iter()
            .find(|r| r.precision == "0.001")
            .unwrap();
        assert!(approx.errors.max_absolute < 1e-9);
        assert!((approx.errors.max_relative - 0.01 / 0.35).abs() < 1e-9);
        assert_eq!(classify(approx, true), Verdict::Incorrect);
    }

    #[test]
    fn test_missing_reference_export_degrades() {
        let run = b1_builder()
            .file(B1_APPROX_EXPORT, stateval_test::marked_export(&[0.5, 0.5]))
            .build()
            .unwrap();
        std::fs::remove_file(run.join(stateval_test::B1_EXACT_EXPORT)).unwrap();

        let mut registry = load(&run);
        registry
            .set_structure("B1", StructureCounts::new(2, 1, 1, 0))
            .unwrap();
        let benchmark = registry.get_mut("B1").unwrap();
        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());

        assert!(evaluation.reference.is_none());
        let approx = benchmark
            .experiments()
            .iter()
            .find(|r| r.precision == "0.001")
            .unwrap();
        assert_eq!(approx.errors.max_relative, NO_REFERENCE);
        assert_eq!(approx.errors.max_absolute, 0.0);
    }

    #[test]
    fn test_zero_reachable_recounted_from_reference() {
        let run = b1_scenario().unwrap();
        let mut registry = load(&run);
        let benchmark = registry.get_mut("B1").unwrap();
        assert_eq!(benchmark.reachable_recurrent_states(), 0);

        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());
        assert_eq!(evaluation.reachable_recurrent_states, 3);
        assert_eq!(benchmark.states(), 3);
        assert_eq!(evaluation.failures().count(), 0);
    }

    #[test]
    fn test_zero_reachable_without_reference_fails_record_only() {
        let run = stateval_test::RunDirBuilder::new()
            .record(
                &RecordBuilder::new("B2", "storm")
                    .export("results/logs/exports/b2.json"),
            )
            .record(&RecordBuilder::new("B2", "sds"))
            .marked_export("results/logs/exports/b2.json", &[1.0])
            .build()
            .unwrap();
        let mut registry = load(&run);
        let benchmark = registry.get_mut("B2").unwrap();
        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());

        assert_eq!(evaluation.failures().count(), 1);
        assert_eq!(evaluation.outcomes.len(), 2);
        assert!(matches!(
            evaluation.failures().next().unwrap().outcome,
            Outcome::Failed(ReportError::Aggregate(AggregateError::DivisionByZero { .. }))
        ));
    }

    #[test]
    fn test_bare_export_mass_checked() {
        let run = b1_builder()
            .record(
                &RecordBuilder::new("B1", "prism")
                    .configuration("sparse-rel")
                    .export("results/logs/exports/prism.B1.txt"),
            )
            .bare_export("results/logs/exports/prism.B1.txt", &[0.5, 0.25, 0.25])
            .build()
            .unwrap();
        let mut registry = load(&run);
        registry
            .set_structure("B1", StructureCounts::new(3, 1, 1, 0))
            .unwrap();
        let benchmark = registry.get_mut("B1").unwrap();
        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());
        assert_eq!(evaluation.evaluated(), 2);

        let prism = benchmark
            .experiments()
            .iter()
            .find(|r| r.tool == "prism")
            .unwrap();
        assert_eq!(prism.errors.max_absolute, 0.0);
        assert_eq!(prism.errors.max_relative, NO_REFERENCE);
    }

    #[test]
    fn test_missing_approx_export_is_record_failure() {
        let run = b1_scenario().unwrap();
        std::fs::remove_file(run.join(B1_APPROX_EXPORT)).unwrap();
        let mut registry = load(&run);
        registry
            .set_structure("B1", StructureCounts::new(3, 1, 1, 0))
            .unwrap();
        let benchmark = registry.get_mut("B1").unwrap();
        let evaluation = evaluate_benchmark(benchmark, run.path(), &ToolRoles::default());
        assert_eq!(evaluation.failures().count(), 1);
        assert!(matches!(
            evaluation.failures().next().unwrap().outcome,
            Outcome::Failed(ReportError::Comparison { .. })
        ));
    }
}
