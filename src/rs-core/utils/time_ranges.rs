use std::slice::Iter;

/// Represent a range of time, from a start to an end, generally in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    start: f64,
    end: f64,
}

impl TimeRange {
    /// Returns the start time of the range
    #[cfg(test)]
    pub(crate) fn start(&self) -> f64 {
        self.start
    }
    /// Returns the end time of the range
    #[cfg(test)]
    pub(crate) fn end(&self) -> f64 {
        self.end
    }
    /// Returns the amount of time, in seconds, covered by this range.
    pub(crate) fn len(&self) -> f64 {
        self.end - self.start
    }
    /// Returns `true` if `pos` lies inside this range, bounds included.
    pub(crate) fn contains(&self, pos: f64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// Abstracts non-contiguous chronological ranges of time, generally expressed in seconds.
///
/// Ranges are kept ordered and disjoint whatever the order in which they were added.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimeRanges {
    ranges: Vec<TimeRange>,
}

impl TimeRanges {
    /// Create a new empty `TimeRanges` object
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build a `TimeRanges` from a flat buffered report as sent by the JavaScript-side:
    /// `[start0, end0, start1, end1, ...]`.
    ///
    /// A trailing unpaired value as well as empty, inverted or non-finite couples are
    /// ignored.
    pub(crate) fn from_flat_report(report: &[f64]) -> Self {
        let mut ranges = Self::new();
        for couple in report.chunks_exact(2) {
            ranges.add(couple[0], couple[1]);
        }
        ranges
    }

    /// Add a range of time to that `TimeRanges` object, merging it with the ranges that are
    /// already there.
    pub(crate) fn add(&mut self, start: f64, end: f64) {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return;
        }
        let mut new_range = TimeRange { start, end };

        // First range which is not entirely before the new one
        let first_idx = self
            .ranges
            .iter()
            .position(|r| r.end >= new_range.start)
            .unwrap_or(self.ranges.len());

        // Amount of ranges, starting at `first_idx`, overlapping or touching the new one
        let overlapping = self.ranges[first_idx..]
            .iter()
            .take_while(|r| r.start <= new_range.end)
            .count();

        if overlapping > 0 {
            let last_idx = first_idx + overlapping - 1;
            new_range.start = new_range.start.min(self.ranges[first_idx].start);
            new_range.end = new_range.end.max(self.ranges[last_idx].end);
            self.ranges.drain(first_idx..=last_idx);
        }
        self.ranges.insert(first_idx, new_range);
    }

    /// Returns the number of non-contiguous ranges in this `TimeRanges` object
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns the range containing the given position.
    ///
    /// Returns `None` if no range in this `TimeRanges` object contains it.
    pub(crate) fn range_for(&self, pos: f64) -> Option<&TimeRange> {
        self.ranges.iter().find(|r| r.contains(pos))
    }
}

impl<'a> IntoIterator for &'a TimeRanges {
    type Item = &'a TimeRange;
    type IntoIter = Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
