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

//! Plain-format record writer.

use crate::error::{RecordError, RecordResult};
use crate::parser::Field;
use crate::record::ExperimentRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

fn text(value: &str) -> &str {
    if value.is_empty() {
        "null"
    } else {
        value
    }
}

fn write_field<W: Write>(writer: &mut W, record: &ExperimentRecord, field: Field) -> std::io::Result<()> {
    let key = field.plain_key();
    match field {
        Field::BenchmarkName => writeln!(writer, "{}: {}", key, text(&record.benchmark_name)),
        Field::Tool => writeln!(writer, "{}: {}", key, text(&record.tool)),
        Field::Precision => writeln!(writer, "{}: {}", key, text(&record.precision)),
        Field::ConfigurationId => writeln!(writer, "{}: {}", key, text(&record.configuration_id)),
        Field::SolverId => writeln!(writer, "{}: {}", key, text(&record.solver_id)),
        Field::WallClockTime => writeln!(writer, "{}: {:?}", key, record.wall_clock_time),
        Field::McTime => writeln!(writer, "{}: {:?}", key, record.mc_time),
        Field::Timeout => writeln!(writer, "{}: {}", key, record.timeout),
        Field::ExecutionError => writeln!(writer, "{}: {}", key, record.execution_error),
        Field::ExportValueFile => writeln!(
            writer,
            "{}: {}",
            key,
            record.export_value_file.as_deref().unwrap_or("null")
        ),
        Field::Log => writeln!(writer, "{}: {}", key, record.log.as_deref().unwrap_or("null")),
        Field::States => writeln!(writer, "{}: {}", key, record.structure.states),
        Field::ReachableRecurrentStates => {
            writeln!(writer, "{}: {}", key, record.reachable_recurrent_states)
        }
        Field::Sccs => writeln!(writer, "{}: {}", key, record.structure.sccs),
        Field::Bsccs => writeln!(writer, "{}: {}", key, record.structure.bsccs),
        Field::NonBsccs => writeln!(writer, "{}: {}", key, record.structure.non_bsccs),
        Field::MaxErrorAbsolute => writeln!(writer, "{}: {:?}", key, record.errors.max_absolute),
        Field::MaxErrorRelative => writeln!(writer, "{}: {:?}", key, record.errors.max_relative),
        Field::AverageErrorAbsolute => {
            writeln!(writer, "{}: {:?}", key, record.errors.average_absolute)
        }
        Field::AverageErrorRelative => {
            writeln!(writer, "{}: {:?}", key, record.errors.average_relative)
        }
    }
}

/// Write `record` in the plain format, one `key: value` pair per line.
///
/// Empty strings and absent paths are written as `null` so that every value
/// stays a single token. Reading the output back with
/// [`parse_record`](crate::parse_record) in plain mode yields an equal record.
pub fn write_record<W: Write>(mut writer: W, record: &ExperimentRecord) -> RecordResult<()> {
    for field in Field::ALL {
        write_field(&mut writer, record, field)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render a record to a string.
pub fn record_to_string(record: &ExperimentRecord) -> RecordResult<String> {
    let mut buffer = Vec::new();
    write_record(&mut buffer, record)?;
    String::from_utf8(buffer).map_err(|e| RecordError::encoding(e.to_string(), 0))
}

/// File name a record is persisted under: `<file stem>.txt`.
pub fn record_file_name(record: &ExperimentRecord) -> String {
    format!("{}.txt", record.file_stem())
}

/// Write `record` into `dir`, returning the created path.
pub fn save_record(dir: &Path, record: &ExperimentRecord) -> RecordResult<PathBuf> {
    let path = dir.join(record_file_name(record));
    let file = File::create(&path)
        .map_err(|e| RecordError::from(e).with_context(path.display().to_string()))?;
    write_record(BufWriter::new(file), record)
        .map_err(|e| e.with_context(path.display().to_string()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_record_str, RecordFormat};
    use crate::record::ErrorMetrics;
    use crate::structure::StructureCounts;

    fn sample() -> ExperimentRecord {
        ExperimentRecord {
            tool: "storm".to_string(),
            configuration_id: "sparse".to_string(),
            solver_id: "classic-gmres-topo".to_string(),
            precision: "0.001".to_string(),
            benchmark_name: "B1".to_string(),
            wall_clock_time: 12.0,
            timeout: false,
            execution_error: false,
            export_value_file: Some("exports/B1.json".to_string()),
            log: None,
            mc_time: 0.5,
            structure: StructureCounts::new(1000, 3, 2, 1),
            reachable_recurrent_states: 640,
            errors: ErrorMetrics {
                max_absolute: 1.0e-9,
                max_relative: 0.002,
                average_absolute: 0.0,
                average_relative: -15.0,
            },
        }
    }

    #[test]
    fn test_field_order() {
        let text = record_to_string(&sample()).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .map(|line| line.split(": ").next().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                "wallclock-time",
                "tool",
                "configuration-id",
                "solver-id",
                "export-value-file",
                "log",
                "states",
                "max-error-absolute",
                "max-error-relative",
                "average-error-absolute",
                "average-error-relative",
                "mc-time",
                "precision",
                "timeout",
                "execution-error",
                "name",
                "reachable-recurrent-states",
                "SCCs",
                "BSCCs",
                "nonBSCCs",
            ]
        );
    }

    #[test]
    fn test_values_rendered() {
        let text = record_to_string(&sample()).unwrap();
        assert!(text.contains("wallclock-time: 12.0\n"));
        assert!(text.contains("log: null\n"));
        assert!(text.contains("max-error-absolute: 1e-9\n"));
        assert!(text.contains("average-error-relative: -15.0\n"));
        assert!(text.contains("timeout: false\n"));
        assert!(text.contains("states: 1000\n"));
    }

    #[test]
    fn test_round_trip() {
        let record = sample();
        let text = record_to_string(&record).unwrap();
        let parsed = parse_record_str(&text, RecordFormat::Plain).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_empty_identity_round_trip() {
        let record = ExperimentRecord::new("B2");
        let text = record_to_string(&record).unwrap();
        assert!(text.contains("tool: null\n"));
        let parsed = parse_record_str(&text, RecordFormat::Plain).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_file_name() {
        assert_eq!(
            record_file_name(&sample()),
            "storm.sparse.classic-gmres-topo.0.001.B1.txt"
        );
    }

    #[test]
    fn test_save_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_record(dir.path(), &sample()).unwrap();
        assert!(path.ends_with("storm.sparse.classic-gmres-topo.0.001.B1.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, record_to_string(&sample()).unwrap());
    }

    #[test]
    fn test_save_record_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = save_record(&missing, &sample()).unwrap_err();
        assert!(err.context.is_some());
    }
}
