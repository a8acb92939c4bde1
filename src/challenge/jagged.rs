//! Sort ragged matrices by an aggregate of their rows
//!
//! Every row is sorted ascending on its own first. Afterwards the rows are reordered as whole units
//! by their sum, maximum or minimum, in ascending or descending order.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::interface::{get_any, get_matrix};
use crate::error::{Error, Result};
use crate::settings::Settings;

use super::{Action, Testcase};

/// A type alias for the ragged matrices.
///
/// The rows may have different lengths, including zero. The matrix is sorted in place.
pub type RaggedMatrix = Vec<Vec<i32>>;

/// Which aggregate of a row decides the order of the rows
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RowKey {
    Sum,
    Max,
    Min,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl RowKey {
    /// Compute the aggregate of `row`, which sits at index `idx` of its matrix.
    ///
    /// The sum of an empty row is 0. Max and min of an empty row fail with [Error::EmptyRow], a
    /// sum that leaves the range of [i32] fails with [Error::ArithmeticOverflow].
    pub fn aggregate(self, idx: usize, row: &[i32]) -> Result<i32> {
        match self {
            RowKey::Sum => row
                .iter()
                .try_fold(0i32, |acc, v| acc.checked_add(*v))
                .ok_or(Error::ArithmeticOverflow { row: idx }),
            RowKey::Max => row
                .iter()
                .max()
                .copied()
                .ok_or(Error::EmptyRow { row: idx, key: self }),
            RowKey::Min => row
                .iter()
                .min()
                .copied()
                .ok_or(Error::EmptyRow { row: idx, key: self }),
        }
    }
}

impl Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RowKey::Sum => "sum",
            RowKey::Max => "max",
            RowKey::Min => "min",
        };
        f.write_str(s)
    }
}

impl Order {
    /// Should the row at the outer index `a` trade places with the row at the inner index `b`?
    #[inline]
    fn should_swap(self, a: i32, b: i32) -> bool {
        match self {
            Order::Ascending => a < b,
            Order::Descending => a > b,
        }
    }
}

/// Bubble sort a single row ascending.
///
/// Rows with less than two elements are left alone.
pub fn bubble_sort_row(row: &mut [i32]) {
    for end in (1..row.len()).rev() {
        let mut swapped = false;
        for k in 0..end {
            if row[k] > row[k + 1] {
                row.swap(k, k + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Sort every row of `matrix` ascending, then order the rows by `key` in the given `order`.
///
/// Aggregates are taken over the sorted rows, so a sum only overflows if it does so when added up
/// in ascending order. All of them are computed before any row is moved: on error every row keeps
/// its position, though its elements are already sorted. Rows with equal aggregates may end up in
/// any relative order.
pub fn sort_rows(
    matrix: &mut RaggedMatrix,
    key: RowKey,
    order: Order,
) -> Result<&mut RaggedMatrix> {
    for row in matrix.iter_mut() {
        bubble_sort_row(row);
    }

    let mut aggregates: Vec<i32> = matrix
        .iter()
        .enumerate()
        .map(|(idx, row)| key.aggregate(idx, row))
        .collect::<Result<_>>()?;
    debug!(%key, ?order, ?aggregates, "computed row aggregates");

    // every (i, j) pair, not just i < j: this makes the pairwise swaps a full sort
    let n = matrix.len();
    for i in 0..n {
        for j in 0..n {
            if order.should_swap(aggregates[i], aggregates[j]) {
                matrix.swap(i, j);
                aggregates.swap(i, j);
            }
        }
    }
    debug!(?aggregates, "rows reordered");

    Ok(matrix)
}

pub fn sort_by_sum_ascending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Sum, Order::Ascending)
}

pub fn sort_by_sum_descending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Sum, Order::Descending)
}

pub fn sort_by_max_ascending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Max, Order::Ascending)
}

pub fn sort_by_max_descending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Max, Order::Descending)
}

pub fn sort_by_min_ascending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Min, Order::Ascending)
}

pub fn sort_by_min_descending(matrix: &mut RaggedMatrix) -> Result<&mut RaggedMatrix> {
    sort_rows(matrix, RowKey::Min, Order::Descending)
}

/** Interface *****************************************************************/

pub fn run_testcase(
    testcase: &Testcase,
    _settings: Settings,
) -> anyhow::Result<serde_json::Value> {
    let (key, order) = match testcase.action {
        Action::SortBySumAscending => (RowKey::Sum, Order::Ascending),
        Action::SortBySumDescending => (RowKey::Sum, Order::Descending),
        Action::SortByMaxAscending => (RowKey::Max, Order::Ascending),
        Action::SortByMaxDescending => (RowKey::Max, Order::Descending),
        Action::SortByMinAscending => (RowKey::Min, Order::Ascending),
        Action::SortByMinDescending => (RowKey::Min, Order::Descending),
        Action::SortRows => (
            get_any(&testcase.arguments, "key")?,
            get_any(&testcase.arguments, "order")?,
        ),
        _ => unreachable!(),
    };

    let mut matrix = get_matrix(&testcase.arguments, "matrix")?;
    sort_rows(&mut matrix, key, order)?;
    Ok(serde_json::json!({ "matrix": matrix }))
}
