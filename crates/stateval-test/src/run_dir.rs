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

//! On-disk run directories.

use crate::fixtures::{bare_export, marked_export, structure_log, RecordBuilder, B1_APPROX, B1_EXACT};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Raw records, exports and solver logs, relative to the run directory.
pub const LOGS_DIR: &str = "results/logs";

/// Processed plain records and reports, relative to the run directory.
pub const PROCESSED_DIR: &str = "results/postprocess";

/// A temporary run directory, removed on drop.
#[derive(Debug)]
pub struct RunDir {
    dir: TempDir,
}

impl RunDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.path().join(LOGS_DIR)
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.dir.path().join(PROCESSED_DIR)
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Contents of a file below the run directory.
    pub fn read(&self, relative: impl AsRef<Path>) -> io::Result<String> {
        fs::read_to_string(self.join(relative))
    }
}

/// Collects files and writes them into a fresh [`RunDir`] on [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use stateval_test::{RecordBuilder, RunDirBuilder};
///
/// let run = RunDirBuilder::new()
///     .record(&RecordBuilder::new("B1", "sds"))
///     .build()
///     .unwrap();
///
/// assert!(run.logs_dir().join("sds.sparse.default.0.001.B1.json").exists());
/// assert!(run.processed_dir().is_dir());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunDirBuilder {
    files: Vec<(PathBuf, String)>,
}

impl RunDirBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any file, relative to the run directory.
    pub fn file(mut self, relative: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((relative.into(), contents.into()));
        self
    }

    /// Raw structured record in the logs directory.
    pub fn record(self, record: &RecordBuilder) -> Self {
        let path = Path::new(LOGS_DIR).join(format!("{}.json", record.file_stem()));
        self.file(path, record.structured())
    }

    /// Plain record in the processed directory.
    pub fn processed(self, record: &RecordBuilder) -> Self {
        let path = Path::new(PROCESSED_DIR).join(format!("{}.txt", record.file_stem()));
        self.file(path, record.plain())
    }

    pub fn marked_export(self, relative: impl Into<PathBuf>, values: &[f64]) -> Self {
        self.file(relative, marked_export(values))
    }

    pub fn bare_export(self, relative: impl Into<PathBuf>, values: &[f64]) -> Self {
        self.file(relative, bare_export(values))
    }

    /// Solver log named after the sparse-rel configuration of `benchmark`.
    pub fn structure_log(
        self,
        benchmark: &str,
        states: u64,
        sccs: u64,
        bsccs: u64,
        non_bsccs: u64,
    ) -> Self {
        let path = Path::new(LOGS_DIR).join(format!("prism.sparse-rel.default.0.001.{}.log", benchmark));
        self.file(path, structure_log(states, sccs, bsccs, non_bsccs))
    }

    pub fn build(self) -> io::Result<RunDir> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join(LOGS_DIR))?;
        fs::create_dir_all(dir.path().join(PROCESSED_DIR))?;
        for (relative, contents) in self.files {
            let path = dir.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents)?;
        }
        Ok(RunDir { dir })
    }
}

/// Export path of the exact `B1` run.
pub const B1_EXACT_EXPORT: &str = "results/logs/exports/storm.sparse.classic-luexact-topo.ignored.B1.json";

/// Export path of the approximate `B1` run.
pub const B1_APPROX_EXPORT: &str = "results/logs/exports/storm.sparse.classic-gmres-topo.0.001.B1.json";

/// Three-state benchmark `B1` with an exact and an approximate storm run.
pub fn b1_scenario() -> io::Result<RunDir> {
    b1_builder().build()
}

/// Builder for [`b1_scenario`], open for further files.
pub fn b1_builder() -> RunDirBuilder {
    RunDirBuilder::new()
        .record(
            &RecordBuilder::new("B1", "storm")
                .solver("classic-luexact-topo")
                .precision("ignored")
                .export(B1_EXACT_EXPORT)
                .wall_clock(3.0),
        )
        .record(
            &RecordBuilder::new("B1", "storm")
                .solver("classic-gmres-topo")
                .export(B1_APPROX_EXPORT)
                .wall_clock(0.25),
        )
        .marked_export(B1_EXACT_EXPORT, &B1_EXACT)
        .marked_export(B1_APPROX_EXPORT, &B1_APPROX)
        .structure_log("B1", 3, 1, 1, 0)
}
