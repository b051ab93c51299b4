use super::range::Range;
use super::RemapError;

/// How a range sits relative to a rule's source interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// No shared values
    Disjoint,
    /// The range lies entirely inside the source interval
    Contained,
    /// The source interval lies strictly inside the range, with values left over on both sides
    Encloses,
    /// The range starts inside the source interval and ends past it
    Right,
    /// The range starts before the source interval and ends inside it
    Left,
}

/// Shifts every value of `source` by `dest_start - source.start()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    source: Range,
    offset: i64,
}

impl MappingRule {
    /// Arguments follow the puzzle text order: destination, source, length.
    pub fn new(dest_start: i64, source_start: i64, length: i64) -> Result<Self, RemapError> {
        let source = Range::new(source_start, length)?;
        // destination side must not overflow either
        Range::new(dest_start, length)?;
        let offset = dest_start
            .checked_sub(source_start)
            .ok_or(RemapError::OffsetOverflow {
                dest_start,
                source_start,
            })?;

        Ok(Self { source, offset })
    }

    pub fn source(&self) -> Range {
        self.source
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The translated value, or `None` when `value` is outside the source interval
    pub fn translate(&self, value: i64) -> Option<i64> {
        self.source
            .contains(value)
            .then_some(value + self.offset)
    }

    pub fn overlap(&self, range: Range) -> Overlap {
        let (start, end) = (range.start(), range.end());
        let (src_start, src_end) = (self.source.start(), self.source.end());

        if end <= src_start || src_end <= start {
            Overlap::Disjoint
        } else if src_start <= start && end <= src_end {
            Overlap::Contained
        } else if start < src_start && src_end < end {
            Overlap::Encloses
        } else if src_start <= start {
            Overlap::Right
        } else {
            Overlap::Left
        }
    }

    /// Cut `range` at this rule's boundaries, in ascending source order.
    ///
    /// Translated pieces come back settled; the rest stay pending for later rules.
    pub(super) fn split(&self, range: Range) -> [Option<Piece>; 3] {
        let (start, end) = (range.start(), range.end());
        let (src_start, src_end) = (self.source.start(), self.source.end());

        let pending = |from, to| Range::from_bounds(from, to).map(Piece::pending);
        let mapped = |from, to| {
            Range::from_bounds(from, to).map(|r| Piece::settled(r.shifted(self.offset)))
        };

        match self.overlap(range) {
            Overlap::Disjoint => [Some(Piece::pending(range)), None, None],
            Overlap::Contained => [Some(Piece::settled(range.shifted(self.offset))), None, None],
            Overlap::Encloses => [
                pending(start, src_start),
                mapped(src_start, src_end),
                pending(src_end, end),
            ],
            Overlap::Right => [mapped(start, src_end), pending(src_end, end), None],
            Overlap::Left => [pending(start, src_start), mapped(src_start, end), None],
        }
    }
}

/// Piece of a range being pushed through one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Piece {
    pub(super) range: Range,
    pub(super) settled: bool,
}

impl Piece {
    pub(super) fn pending(range: Range) -> Self {
        Self {
            range,
            settled: false,
        }
    }

    pub(super) fn settled(range: Range) -> Self {
        Self {
            range,
            settled: true,
        }
    }
}
