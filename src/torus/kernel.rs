//! Stencil scan kernels for one row partition.
//!
//! Both kernels read the whole current grid and write only the rows of their
//! partition. `out` is the slice of the next grid covering exactly those rows.

use super::grid::{ALIVE, DEAD, Grid};
use super::partition::Partition;
use super::rules::{RuleTable, next_state, pack_key};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanKernel {
    /// Streaming 3x3 window, verdict by 512-entry table lookup.
    #[default]
    Table,
    /// Per-cell neighbor sum and direct rule evaluation.
    Direct,
}

#[inline(always)]
fn north_of(row: usize, rows: usize) -> usize {
    if row == 0 { rows - 1 } else { row - 1 }
}

#[inline(always)]
fn south_of(row: usize, rows: usize) -> usize {
    if row + 1 == rows { 0 } else { row + 1 }
}

/// Table-driven scan with streaming column reuse.
///
/// The window is primed with column `cols - 1` (west) and column 0 (center);
/// each step shifts it one column and loads only the new east column.
pub(crate) fn scan_rows(table: &RuleTable, current: &Grid, part: Partition, out: &mut [u8]) {
    let rows = current.rows();
    let cols = current.cols();
    debug_assert_eq!(out.len(), part.len() * cols);

    for (row, out_row) in part.range().zip(out.chunks_exact_mut(cols)) {
        let above = current.row(north_of(row, rows));
        let mid = current.row(row);
        let below = current.row(south_of(row, rows));

        let (mut nw, mut n) = (above[cols - 1], above[0]);
        let (mut w, mut c) = (mid[cols - 1], mid[0]);
        let (mut sw, mut s) = (below[cols - 1], below[0]);

        for (col, dst) in out_row.iter_mut().enumerate() {
            let east = if col + 1 == cols { 0 } else { col + 1 };
            let ne = above[east];
            let e = mid[east];
            let se = below[east];

            let key = pack_key(nw, n, ne, w, c, e, sw, s, se);
            *dst = if table.lookup(key) { ALIVE } else { DEAD };

            nw = n;
            n = ne;
            w = c;
            c = e;
            sw = s;
            s = se;
        }
    }
}

/// Reference scan: fetch all eight neighbors per cell and apply the rule.
pub(crate) fn scan_rows_direct(current: &Grid, part: Partition, out: &mut [u8]) {
    let rows = current.rows();
    let cols = current.cols();
    debug_assert_eq!(out.len(), part.len() * cols);

    for (row, out_row) in part.range().zip(out.chunks_exact_mut(cols)) {
        let above = current.row(north_of(row, rows));
        let mid = current.row(row);
        let below = current.row(south_of(row, rows));

        for (col, dst) in out_row.iter_mut().enumerate() {
            let west = if col == 0 { cols - 1 } else { col - 1 };
            let east = if col + 1 == cols { 0 } else { col + 1 };
            let neighbors = above[west]
                + above[col]
                + above[east]
                + mid[west]
                + mid[east]
                + below[west]
                + below[col]
                + below[east];
            *dst = next_state(mid[col] != DEAD, neighbors) as u8;
        }
    }
}

/// Run the selected kernel over one partition.
///
/// Panics unless `out` holds exactly the partition's rows.
#[inline]
pub fn scan_partition(
    kernel: ScanKernel,
    table: &RuleTable,
    current: &Grid,
    part: Partition,
    out: &mut [u8],
) {
    assert_eq!(
        out.len(),
        part.len() * current.cols(),
        "output slice does not match partition {part:?}"
    );
    if part.is_empty() {
        return;
    }
    match kernel {
        ScanKernel::Table => scan_rows(table, current, part, out),
        ScanKernel::Direct => scan_rows_direct(current, part, out),
    }
}
