//! Property-based tests for the AocSolver derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SpreadSolver;

impl AocParser for SpreadSolver {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(s.to_string()))
            })
            .collect()
    }
}

impl PartSolver<1> for SpreadSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let min = shared.iter().min().copied().unwrap_or_default();
        let max = shared.iter().max().copied().unwrap_or_default();
        Ok((max - min).to_string())
    }
}

impl PartSolver<2> for SpreadSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.sort_unstable();
        Ok(shared
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(","))
    }
}

fn to_input(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// `solve_part(n)` is the same as calling `PartSolver<n>` directly
        #[test]
        fn solve_part_dispatches_to_part_solver(
            values in prop::collection::vec(-1000i64..1000, 1..20),
            part in 1u8..=2
        ) {
            let input = to_input(&values);
            let mut shared1 = SpreadSolver::parse(&input).unwrap();
            let mut shared2 = SpreadSolver::parse(&input).unwrap();

            let dispatched = SpreadSolver::solve_part(&mut shared1, part).unwrap();
            let direct = match part {
                1 => <SpreadSolver as PartSolver<1>>::solve(&mut shared2),
                2 => <SpreadSolver as PartSolver<2>>::solve(&mut shared2),
                _ => unreachable!(),
            }
            .unwrap();

            prop_assert_eq!(dispatched, direct);
        }

        /// Any part outside 1..=PARTS is rejected by the generated dispatch
        #[test]
        fn invalid_part_returns_not_implemented(part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = SpreadSolver::parse("1,2,3").unwrap();
            match SpreadSolver::solve_part(&mut shared, part) {
                Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
            }
        }
    }
}

mod shared_mutation {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Part 2 sorts the shared data in place; part 1 still sees the same multiset
        #[test]
        fn mutation_is_visible_to_later_parts(values in prop::collection::vec(-50i64..50, 1..20)) {
            let input = to_input(&values);
            let mut shared = SpreadSolver::parse(&input).unwrap();

            let before = SpreadSolver::solve_part(&mut shared, 1).unwrap();
            SpreadSolver::solve_part(&mut shared, 2).unwrap();
            prop_assert!(shared.windows(2).all(|w| w[0] <= w[1]));

            let after = SpreadSolver::solve_part(&mut shared, 1).unwrap();
            prop_assert_eq!(before, after);
        }
    }
}
