//! dataset::split — sliding, contiguous train/validation/test partitions.
//!
//! Purpose
//! -------
//! Produce every placement of a fixed sequence of adjacent index segments
//! (e.g. train then test) along a time axis, moving one step at a time, for
//! walk-forward evaluation.
//!
//! Key behaviors
//! -------------
//! - [`SequentialSplit::split`] returns a lazy [`Splits`] iterator; calling it
//!   again restarts from the first placement. The iterator owns a copy of the
//!   sizes, so it may outlive the splitter.
//! - For each offset `t` in `0..=len − Σsizes`, one index list per size is
//!   emitted, consecutive and starting at `t`.
//! - With progress enabled, milestones are logged through `tracing` at `info`
//!   level (roughly every tenth of the partitions and at completion).
//!
//! Invariants & assumptions
//! ------------------------
//! - The number of partitions is `len − Σsizes + 1`, or zero when the sizes do
//!   not fit.
//! - Segments within one partition never overlap and are in ascending order.
use ndarray::{ArrayBase, Axis, Data, RemoveAxis};

/// `SequentialSplit` — walk-forward splitter over a fixed segment layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialSplit {
    sizes: Vec<usize>,
    show_progress: bool,
}

impl SequentialSplit {
    /// Create a splitter with the given segment sizes, in time order.
    pub fn new(sizes: impl Into<Vec<usize>>, show_progress: bool) -> Self {
        SequentialSplit { sizes: sizes.into(), show_progress }
    }

    /// Segment sizes.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total span covered by one partition.
    pub fn span(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Number of partitions available for `n_samples` observations.
    pub fn n_splits(&self, n_samples: usize) -> usize {
        (n_samples + 1).saturating_sub(self.span())
    }

    /// Iterate over all partitions of `0..n_samples`.
    pub fn split(&self, n_samples: usize) -> Splits {
        Splits {
            sizes: self.sizes.clone(),
            offset: 0,
            n_splits: self.n_splits(n_samples),
            show_progress: self.show_progress,
        }
    }

    /// Iterate over all partitions of the rows (first axis) of `data`.
    pub fn split_rows<S, D>(&self, data: &ArrayBase<S, D>) -> Splits
    where
        S: Data,
        D: RemoveAxis,
    {
        self.split(data.len_of(Axis(0)))
    }
}

/// Lazy iterator returned by [`SequentialSplit::split`].
#[derive(Debug, Clone)]
pub struct Splits {
    sizes: Vec<usize>,
    offset: usize,
    n_splits: usize,
    show_progress: bool,
}

impl Splits {
    fn report_progress(&self, done: usize) {
        let step = (self.n_splits / 10).max(1);
        if done % step == 0 || done == self.n_splits {
            tracing::info!(done, total = self.n_splits, "sequential split progress");
        }
    }
}

impl Iterator for Splits {
    type Item = Vec<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.n_splits {
            return None;
        }

        let mut start = self.offset;
        let segments = self
            .sizes
            .iter()
            .map(|&size| {
                let segment: Vec<usize> = (start..start + size).collect();
                start += size;
                segment
            })
            .collect();

        self.offset += 1;
        if self.show_progress {
            self.report_progress(self.offset);
        }
        Some(segments)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_splits - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Splits {}

impl std::iter::FusedIterator for Splits {}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    // Purpose
    // -------
    // Reproduce the canonical two-segment walk-forward layout.
    //
    // Given
    // -----
    // - `sizes = (2, 1)`, 5 samples.
    //
    // Expect
    // ------
    // - `[[0,1],[2]]`, `[[1,2],[3]]`, `[[2,3],[4]]`.
    fn split_walks_forward_one_step_at_a_time() {
        let splitter = SequentialSplit::new([2, 1], false);

        let parts: Vec<_> = splitter.split(5).collect();

        assert_eq!(
            parts,
            vec![
                vec![vec![0, 1], vec![2]],
                vec![vec![1, 2], vec![3]],
                vec![vec![2, 3], vec![4]],
            ]
        );
    }

    #[test]
    fn split_count_is_exact_and_restartable() {
        let splitter = SequentialSplit::new(vec![3, 2, 1], true);

        let mut iter = splitter.split(10);
        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);

        assert_eq!(splitter.split(10).count(), 5);
        assert_eq!(splitter.n_splits(10), 5);
    }

    #[test]
    // Purpose
    // -------
    // Sizes that do not fit yield no partitions; an exact fit yields one.
    fn split_handles_tight_and_oversized_layouts() {
        let splitter = SequentialSplit::new([4, 2], false);

        assert_eq!(splitter.split(5).next(), None);
        assert_eq!(splitter.split(0).len(), 0);
        assert_eq!(
            splitter.split(6).collect::<Vec<_>>(),
            vec![vec![vec![0, 1, 2, 3], vec![4, 5]]]
        );
    }

    #[test]
    // Purpose
    // -------
    // A splitter built inline can be iterated after it is dropped.
    //
    // Given
    // -----
    // - `SequentialSplit::new([3, 1], false).split(6)` without binding the
    //   splitter.
    //
    // Expect
    // ------
    // - Three partitions, the last one `[[2, 3, 4], [5]]`.
    fn split_iterator_outlives_inline_splitter() {
        let parts = SequentialSplit::new([3, 1], false).split(6);
        assert_eq!(parts.len(), 3);

        let last = parts.last();
        assert_eq!(last, Some(vec![vec![2, 3, 4], vec![5]]));
    }

    #[test]
    fn split_rows_uses_first_axis() {
        let data = Array2::<f64>::zeros((7, 3));
        let splitter = SequentialSplit::new([2, 2], false);
        assert_eq!(splitter.split_rows(&data).len(), 4);
    }
}
