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

//! Transition-graph structure of a benchmark and its repair.
//!
//! Structure counts normally arrive from solver logs. Some legacy benchmarks
//! produce logs the scanner cannot read; for those a fixed table of
//! hand-verified counts is used instead. Any other benchmark whose counts
//! come back all zero is reported as unresolved.

use crate::error::RecordResult;
use crate::token::TokenReader;
use std::io::Read;
use tracing::{debug, warn};

/// State, SCC, BSCC and non-BSCC state counts of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureCounts {
    pub states: u64,
    pub sccs: u64,
    pub bsccs: u64,
    pub non_bsccs: u64,
}

impl StructureCounts {
    pub const fn new(states: u64, sccs: u64, bsccs: u64, non_bsccs: u64) -> Self {
        Self {
            states,
            sccs,
            bsccs,
            non_bsccs,
        }
    }

    /// All four counts are zero, i.e. nothing was recovered.
    pub fn is_zero(&self) -> bool {
        self.states == 0 && self.sccs == 0 && self.bsccs == 0 && self.non_bsccs == 0
    }

    /// States lying in some BSCC, clamped to `[0, states]`.
    pub fn reachable_recurrent_states(&self) -> u64 {
        self.states.saturating_sub(self.non_bsccs)
    }
}

/// Version of the [`LegacyOverrides`] table. Bump whenever an entry changes.
pub const LEGACY_OVERRIDES_VERSION: u32 = 1;

const LEGACY_OVERRIDES: &[(&str, StructureCounts)] = &[
    ("crafted-loop.1000000", StructureCounts::new(1_000_000, 1, 1, 0)),
    ("lumbroso.1000", StructureCounts::new(51_007, 0, 1_000, 50_007)),
    ("lumbroso.4000", StructureCounts::new(204_031, 0, 4_000, 200_031)),
    ("lumbroso.16000", StructureCounts::new(816_127, 0, 16_000, 800_127)),
    ("lumbroso.64000", StructureCounts::new(3_264_511, 0, 64_000, 3_200_511)),
];

/// Hand-verified structure of legacy benchmarks whose logs cannot be scanned.
///
/// Static data, never inferred.
pub struct LegacyOverrides;

impl LegacyOverrides {
    pub fn version() -> u32 {
        LEGACY_OVERRIDES_VERSION
    }

    pub fn lookup(name: &str) -> Option<StructureCounts> {
        LEGACY_OVERRIDES
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, counts)| *counts)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        LEGACY_OVERRIDES.iter().map(|(name, _)| *name)
    }
}

/// Outcome of [`resolve_structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureResolution {
    /// Counts recovered from the source as-is.
    Scanned(StructureCounts),
    /// Source yielded nothing; the legacy table supplied the counts.
    Override(StructureCounts),
    /// Source yielded nothing and the benchmark is not in the legacy table.
    Unresolved,
}

impl StructureResolution {
    pub fn counts(&self) -> Option<StructureCounts> {
        match self {
            Self::Scanned(counts) | Self::Override(counts) => Some(*counts),
            Self::Unresolved => None,
        }
    }
}

/// Decide which structure to apply for `name` given the scanned counts.
pub fn resolve_structure(name: &str, scanned: StructureCounts) -> StructureResolution {
    if !scanned.is_zero() {
        return StructureResolution::Scanned(scanned);
    }
    match LegacyOverrides::lookup(name) {
        Some(counts) => {
            debug!(benchmark = name, "using legacy structure override");
            StructureResolution::Override(counts)
        }
        None => StructureResolution::Unresolved,
    }
}

/// Default file-name prefixes of solver logs that carry structure counts.
pub const DEFAULT_STRUCTURE_LOG_PREFIXES: &[&str] = &[
    "prism.sparse-rel.default.0.001.",
    "prism.hybrid-rel.default.0.001.",
];

/// Benchmark name for a structure log file, if the file is one.
///
/// ```rust
/// use stateval_core::{structure_log_benchmark, DEFAULT_STRUCTURE_LOG_PREFIXES};
///
/// let name = structure_log_benchmark(
///     "prism.sparse-rel.default.0.001.lumbroso.1000.log",
///     DEFAULT_STRUCTURE_LOG_PREFIXES,
/// );
/// assert_eq!(name.as_deref(), Some("lumbroso.1000"));
/// ```
pub fn structure_log_benchmark<S: AsRef<str>>(file_name: &str, prefixes: &[S]) -> Option<String> {
    let stem = file_name.strip_suffix(".log")?;
    prefixes
        .iter()
        .find_map(|prefix| stem.strip_prefix(prefix.as_ref()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn parse_count(token: Option<String>) -> Option<u64> {
    token.and_then(|t| t.trim_end_matches(',').parse::<u64>().ok())
}

/// Scan a solver log for `States: N` and `SCCs: a, BSCCs: b, non-BSCC states: c`.
///
/// Pieces that cannot be parsed are logged and left at zero. Scanning stops
/// after the SCC summary has been read.
pub fn scan_structure_log<R: Read>(reader: R) -> RecordResult<StructureCounts> {
    let mut tokens = TokenReader::new(reader);
    let mut counts = StructureCounts::default();

    while let Some(token) = tokens.next_token()? {
        match token.as_str() {
            "States:" => match parse_count(tokens.next_token()?) {
                Some(states) => counts.states = states,
                None => warn!(token = tokens.tokens_read(), "unreadable state count"),
            },
            "SCCs:" => {
                let sccs = parse_count(tokens.next_token()?);
                tokens.skip_tokens(1)?;
                let bsccs = parse_count(tokens.next_token()?);
                tokens.skip_tokens(2)?;
                let non_bsccs = parse_count(tokens.next_token()?);
                match (sccs, bsccs, non_bsccs) {
                    (Some(sccs), Some(bsccs), Some(non_bsccs)) => {
                        counts.sccs = sccs;
                        counts.bsccs = bsccs;
                        counts.non_bsccs = non_bsccs;
                        break;
                    }
                    _ => warn!(token = tokens.tokens_read(), "unreadable SCC summary"),
                }
            }
            _ => {}
        }
    }

    Ok(counts)
}
