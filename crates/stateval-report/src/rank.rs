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

//! Ranking transforms over correct-time matrices.
//!
//! Both transforms repeatedly extract the smallest value below the penalty
//! and overwrite its source cell with the penalty, so the input matrix is
//! consumed in the process.

use crate::matrix::{Cell, ReportMatrix, Sentinel, LEADING_COLUMNS};

fn penalty() -> f64 {
    Sentinel::Penalty.value()
}

/// Position and value of the smallest cell below the penalty.
fn lowest<'a, I>(cells: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, &'a Cell)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, cell) in cells {
        if let Some(value) = cell.value() {
            let bound = best.map_or(penalty(), |(_, v)| v);
            if value < bound {
                best = Some((index, value));
            }
        }
    }
    best
}

/// Per benchmark row, sort configuration times into rank columns.
///
/// Rank column `k` holds the `k`-th fastest time of the row; rows with fewer
/// usable times get blank cells. The benchmark columns are carried over.
///
/// ```
/// use stateval_report::{rank_by_benchmark, Cell, ReportMatrix};
///
/// let mut header: Vec<Cell> = vec!["Benchmark-id".into(), "states".into(), "stationary-category".into()];
/// header.extend([Cell::from("a"), Cell::from("b")]);
/// let mut times = ReportMatrix::new(header, 1);
/// times.set(1, 3, Cell::Number(7.0));
/// times.set(1, 4, Cell::Number(3.0));
///
/// let ranked = rank_by_benchmark(&mut times);
/// assert_eq!(ranked.get(1, 3), Some(&Cell::Number(3.0)));
/// assert_eq!(ranked.get(1, 4), Some(&Cell::Number(7.0)));
/// ```
pub fn rank_by_benchmark(matrix: &mut ReportMatrix) -> ReportMatrix {
    let width = matrix.width();
    let configurations = width.saturating_sub(LEADING_COLUMNS);

    let mut header: Vec<Cell> = matrix.header().iter().take(LEADING_COLUMNS).cloned().collect();
    header.extend((1..=configurations).map(|k| Cell::Text(format!("rank{}", k))));
    let mut ranked = ReportMatrix::new(header, matrix.height().saturating_sub(1));

    for row in 1..matrix.height() {
        let Some(source) = matrix.row_mut(row) else {
            continue;
        };
        for (column, cell) in source.iter().take(LEADING_COLUMNS).enumerate() {
            ranked.set(row, column, cell.clone());
        }
        for rank in 0..configurations {
            let found = lowest(source.iter().enumerate().skip(LEADING_COLUMNS));
            let cell = match found {
                Some((index, value)) => {
                    source[index] = Cell::Sentinel(Sentinel::Penalty);
                    Cell::Number(value)
                }
                None => Cell::Blank,
            };
            ranked.set(row, LEADING_COLUMNS + rank, cell);
        }
    }
    ranked
}

/// Per configuration column, sort times ascending across benchmarks.
///
/// The result has an `n` column counting solved instances and one
/// `<configuration>shifted` column per configuration.
pub fn sort_by_configuration(matrix: &mut ReportMatrix) -> ReportMatrix {
    let width = matrix.width();
    let height = matrix.height();

    let mut header: Vec<Cell> = vec!["n".into()];
    header.extend(matrix.header().iter().skip(LEADING_COLUMNS).map(|cell| {
        Cell::Text(format!("{}shifted", cell.render().unwrap_or_default()))
    }));
    let mut sorted = ReportMatrix::new(header, height.saturating_sub(1));

    for row in 1..height {
        sorted.set(row, 0, Cell::Text(row.to_string()));
    }
    for column in LEADING_COLUMNS..width {
        let target = column - LEADING_COLUMNS + 1;
        for row in 1..height {
            let found = lowest(
                (1..height).filter_map(|k| matrix.get(k, column).map(|cell| (k, cell))),
            );
            let cell = match found {
                Some((index, value)) => {
                    matrix.set(index, column, Cell::Sentinel(Sentinel::Penalty));
                    Cell::Number(value)
                }
                None => Cell::Blank,
            };
            sorted.set(row, target, cell);
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(rows: &[&[Cell]]) -> ReportMatrix {
        let width = rows.first().map_or(0, |r| r.len());
        let mut header: Vec<Cell> = vec![
            "Benchmark-id".into(),
            "states".into(),
            "stationary-category".into(),
        ];
        header.extend((0..width).map(|i| Cell::Text(format!("c{}", i))));
        let mut matrix = ReportMatrix::new(header, rows.len());
        for (r, row) in rows.iter().enumerate() {
            matrix.set(r + 1, 0, Cell::Text(format!("B{}", r + 1)));
            for (c, cell) in row.iter().enumerate() {
                matrix.set(r + 1, LEADING_COLUMNS + c, cell.clone());
            }
        }
        matrix
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    const PENALTY: Cell = Cell::Sentinel(Sentinel::Penalty);

    #[test]
    fn test_ranking_scenario() {
        let mut matrix = times(&[&[n(12.0), PENALTY, n(4.0)]]);
        let ranked = rank_by_benchmark(&mut matrix);

        assert_eq!(ranked.get(0, 3), Some(&Cell::from("rank1")));
        assert_eq!(ranked.get(1, 0), Some(&Cell::from("B1")));
        assert_eq!(ranked.get(1, 3), Some(&n(4.0)));
        assert_eq!(ranked.get(1, 4), Some(&n(12.0)));
        assert_eq!(ranked.get(1, 5), Some(&Cell::Blank));
        assert_eq!(matrix.get(1, 3), Some(&PENALTY));
        assert_eq!(matrix.get(1, 5), Some(&PENALTY));
    }

    #[test]
    fn test_first_extraction_only_overwrites_winner() {
        let mut matrix = times(&[&[n(12.0), PENALTY, n(4.0)]]);
        let row = matrix.row_mut(1).unwrap();
        let (index, value) = lowest(row.iter().enumerate().skip(LEADING_COLUMNS)).unwrap();
        assert_eq!((index, value), (5, 4.0));
        row[index] = PENALTY;
        assert_eq!(&row[LEADING_COLUMNS..], &[n(12.0), PENALTY, PENALTY]);
        let (_, second) = lowest(row.iter().enumerate().skip(LEADING_COLUMNS)).unwrap();
        assert_eq!(second, 12.0);
    }

    #[test]
    fn test_ranking_ties_keep_both() {
        let mut matrix = times(&[&[n(2.0), n(2.0)]]);
        let ranked = rank_by_benchmark(&mut matrix);
        assert_eq!(ranked.get(1, 3), Some(&n(2.0)));
        assert_eq!(ranked.get(1, 4), Some(&n(2.0)));
    }

    #[test]
    fn test_ranking_skips_missing_cells() {
        let mut matrix = times(&[&[Cell::Missing, n(3.0)]]);
        let ranked = rank_by_benchmark(&mut matrix);
        assert_eq!(ranked.get(1, 3), Some(&n(3.0)));
        assert_eq!(ranked.get(1, 4), Some(&Cell::Blank));
    }

    #[test]
    fn test_sort_by_configuration() {
        let mut matrix = times(&[
            &[n(9.0), PENALTY],
            &[n(1.0), n(5.0)],
            &[n(4.0), PENALTY],
        ]);
        let sorted = sort_by_configuration(&mut matrix);

        assert_eq!(sorted.width(), 3);
        assert_eq!(sorted.get(0, 0), Some(&Cell::from("n")));
        assert_eq!(sorted.get(0, 1), Some(&Cell::from("c0shifted")));
        assert_eq!(sorted.get(2, 0), Some(&Cell::from("2")));

        let column: Vec<_> = (1..4).map(|r| sorted.get(r, 1).cloned().unwrap()).collect();
        assert_eq!(column, vec![n(1.0), n(4.0), n(9.0)]);
        let column: Vec<_> = (1..4).map(|r| sorted.get(r, 2).cloned().unwrap()).collect();
        assert_eq!(column, vec![n(5.0), Cell::Blank, Cell::Blank]);
    }
}
