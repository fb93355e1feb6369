//! Row partitioning for the worker pool.

use std::ops::Range;

/// Half-open row range `[start, end)` owned by one worker for one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `rows` into exactly `threads` contiguous ranges.
///
/// Every range but the last holds `rows / threads` rows and the last absorbs
/// the remainder. With more threads than rows each of the first `rows`
/// workers gets one row and the rest get empty ranges.
pub fn partition_rows(rows: usize, threads: usize) -> Vec<Partition> {
    assert!(threads >= 1, "partition_rows needs at least one thread");
    let chunk = (rows / threads).max(1);
    let parts: Vec<Partition> = (0..threads)
        .map(|i| {
            let start = (i * chunk).min(rows);
            let end = if i + 1 == threads {
                rows
            } else {
                ((i + 1) * chunk).min(rows)
            };
            Partition { start, end }
        })
        .collect();
    assert_exact_cover(&parts, rows);
    parts
}

/// Panics unless `parts` tile `[0, rows)` in order with no gap or overlap.
pub fn assert_exact_cover(parts: &[Partition], rows: usize) {
    let mut expected_start = 0usize;
    for (i, part) in parts.iter().enumerate() {
        assert!(
            part.start == expected_start && part.start <= part.end,
            "partition {i} is {part:?}, expected start {expected_start}"
        );
        expected_start = part.end;
    }
    assert_eq!(expected_start, rows, "partitions cover {expected_start} of {rows} rows");
}

#[cfg(test)]
mod tests {
    use super::{Partition, assert_exact_cover, partition_rows};

    #[test]
    fn last_partition_absorbs_remainder() {
        let parts = partition_rows(10, 3);
        assert_eq!(
            parts,
            vec![
                Partition { start: 0, end: 3 },
                Partition { start: 3, end: 6 },
                Partition { start: 6, end: 10 },
            ]
        );
    }

    #[test]
    fn excess_threads_get_empty_ranges() {
        let parts = partition_rows(3, 5);
        assert_eq!(parts.len(), 5);
        let lens: Vec<usize> = parts.iter().map(Partition::len).collect();
        assert_eq!(lens, vec![1, 1, 1, 0, 0]);
        assert!(parts[4].is_empty());
    }

    #[test]
    fn single_thread_owns_everything() {
        assert_eq!(partition_rows(7, 1), vec![Partition { start: 0, end: 7 }]);
    }

    #[test]
    fn exact_cover_holds_for_many_shapes() {
        for rows in 1..=40 {
            for threads in 1..=48 {
                let parts = partition_rows(rows, threads);
                assert_eq!(parts.len(), threads, "rows={rows} threads={threads}");
                let total: usize = parts.iter().map(Partition::len).sum();
                assert_eq!(total, rows, "rows={rows} threads={threads}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "partition 1")]
    fn overlapping_ranges_are_a_defect() {
        let parts = [Partition { start: 0, end: 4 }, Partition { start: 3, end: 8 }];
        assert_exact_cover(&parts, 8);
    }

    #[test]
    #[should_panic(expected = "partitions cover")]
    fn short_cover_is_a_defect() {
        let parts = [Partition { start: 0, end: 4 }];
        assert_exact_cover(&parts, 8);
    }
}
