use super::range::Range;
use super::stage::Stage;

/// Map `value` through every stage in order.
pub fn lookup_point(value: i64, stages: &[Stage]) -> i64 {
    stages
        .iter()
        .fold(value, |value, stage| stage.lookup_point(value))
}

/// Map `ranges` through every stage in order and return the smallest start
/// of the final working set.
///
/// `None` only when `ranges` is empty; a non-empty input never maps to an
/// empty output.
pub fn run_pipeline(ranges: &[Range], stages: &[Stage]) -> Option<i64> {
    map_ranges(ranges, stages).iter().map(Range::start).min()
}

/// All ranges left after the final stage
pub(super) fn map_ranges(ranges: &[Range], stages: &[Stage]) -> Vec<Range> {
    stages
        .iter()
        .enumerate()
        .fold(ranges.to_vec(), |working, (index, stage)| {
            let next: Vec<Range> = working
                .into_iter()
                .flat_map(|range| stage.split_range(range))
                .collect();
            tracing::debug!(stage = index, ranges = next.len(), "stage applied");
            next
        })
}

/// Owned, ordered sequence of stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn lookup_point(&self, value: i64) -> i64 {
        lookup_point(value, &self.stages)
    }

    pub fn run(&self, ranges: &[Range]) -> Option<i64> {
        run_pipeline(ranges, &self.stages)
    }
}

impl FromIterator<Stage> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Stage>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
