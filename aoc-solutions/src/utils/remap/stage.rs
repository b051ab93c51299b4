use super::range::Range;
use super::rule::{MappingRule, Piece};

/// One layer of the pipeline, e.g. seed-to-soil
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    rules: Vec<MappingRule>,
}

impl Stage {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    /// First matching rule wins; unmatched values map to themselves.
    pub fn lookup_point(&self, value: i64) -> i64 {
        self.rules
            .iter()
            .find_map(|rule| rule.translate(value))
            .unwrap_or(value)
    }

    /// Map `range` through this stage, splitting it wherever a rule boundary
    /// falls inside it.
    ///
    /// Pieces come back in ascending order of the input values they cover.
    pub fn split_range(&self, range: Range) -> Vec<Range> {
        let mut pieces = vec![Piece::pending(range)];

        for rule in &self.rules {
            if pieces.iter().all(|piece| piece.settled) {
                break;
            }
            pieces = pieces
                .into_iter()
                .flat_map(|piece| {
                    if piece.settled {
                        [Some(piece), None, None]
                    } else {
                        rule.split(piece.range)
                    }
                })
                .flatten()
                .collect();
        }

        let output: Vec<Range> = pieces.into_iter().map(|piece| piece.range).collect();
        tracing::trace!(input = %range, ?output, "split range");
        output
    }

    /// Indices `(i, j)` with `i < j` of two rules whose source intervals share values.
    ///
    /// Rule order only matters when this returns `Some`.
    pub fn find_overlap(&self) -> Option<(usize, usize)> {
        let mut order: Vec<usize> = (0..self.rules.len()).collect();
        order.sort_by_key(|&i| self.rules[i].source().start());

        order
            .windows(2)
            .find(|pair| self.rules[pair[0]].source().end() > self.rules[pair[1]].source().start())
            .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
    }
}

impl FromIterator<MappingRule> for Stage {
    fn from_iter<T: IntoIterator<Item = MappingRule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
