use super::RemapError;
use std::fmt;

/// Half-open interval `[start, start + length)` with `length > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    start: i64,
    length: i64,
}

impl Range {
    /// Validated constructor: rejects empty ranges and ends past `i64::MAX`
    pub fn new(start: i64, length: i64) -> Result<Self, RemapError> {
        if length <= 0 {
            return Err(RemapError::EmptyRange { start, length });
        }
        start
            .checked_add(length)
            .ok_or(RemapError::EndOverflow { start, length })?;
        Ok(Self { start, length })
    }

    /// `[start, end)`, or `None` when that interval holds no values.
    ///
    /// Only used on sub-intervals of already validated ranges.
    pub(super) fn from_bounds(start: i64, end: i64) -> Option<Self> {
        (end > start).then(|| Self {
            start,
            length: end - start,
        })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Exclusive end
    pub fn end(&self) -> i64 {
        self.start + self.length
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end()
    }

    /// The same range moved by `offset`
    pub fn shifted(self, offset: i64) -> Self {
        Self {
            start: self.start + offset,
            length: self.length,
        }
    }

    /// Every value in the range, in ascending order
    pub fn values(&self) -> std::ops::Range<i64> {
        self.start..self.end()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
