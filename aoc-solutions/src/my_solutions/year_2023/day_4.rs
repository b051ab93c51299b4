use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["counting"])]
pub struct Solver;

/// Winning numbers held, per card in input order
pub type MatchCounts = Vec<usize>;

impl AocParser for Solver {
    type SharedData<'a> = MatchCounts;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_card(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {:#}", line_idx + 1, e)))
            })
            .collect()
    }
}

fn parse_card(line: &str) -> anyhow::Result<usize> {
    let (header, numbers) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' after card header"))?;
    if !header.trim_start().starts_with("Card") {
        return Err(anyhow!("line must start with 'Card'"));
    }
    let (winning, held) = numbers
        .split_once('|')
        .ok_or_else(|| anyhow!("missing '|' between number lists"))?;

    let winning: HashSet<u32> = parse_numbers(winning).context("winning numbers")?;
    let held: Vec<u32> = parse_numbers(held).context("held numbers")?;

    Ok(held.iter().filter(|n| winning.contains(*n)).count())
}

fn parse_numbers<C: FromIterator<u32>>(list: &str) -> anyhow::Result<C> {
    list.split_whitespace()
        .map(|n| n.parse::<u32>().with_context(|| format!("invalid number {n:?}")))
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points = shared
            .iter()
            .filter(|&&matches| matches > 0)
            .try_fold(0u64, |total, &matches| {
                u32::try_from(matches - 1)
                    .ok()
                    .and_then(|shift| 1u64.checked_shl(shift))
                    .and_then(|score| total.checked_add(score))
            })
            .ok_or_else(|| SolveError::failed("points overflow u64"))?;
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total =
            total_cards(shared).ok_or_else(|| SolveError::failed("card count overflows u64"))?;
        Ok(total.to_string())
    }
}

/// Every card starts with one copy; each copy of card `i` with `m` matches
/// adds one copy to each of the next `m` cards. Copies past the table end
/// are dropped. `None` if a count overflows.
fn total_cards(matches: &[usize]) -> Option<u64> {
    let count = matches.len();
    let copies = matches
        .iter()
        .enumerate()
        .try_fold(vec![1u64; count], |mut copies, (idx, &won)| {
            let held = copies[idx];
            let end = idx.saturating_add(1).saturating_add(won).min(count);
            for later in &mut copies[idx + 1..end] {
                *later = later.checked_add(held)?;
            }
            Some(copies)
        })?;
    tracing::debug!(?copies, "card copies");
    copies.iter().try_fold(0u64, |total, &c| total.checked_add(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_match_counts() {
        assert_eq!(Solver::parse(EXAMPLE).unwrap(), vec![4, 2, 2, 1, 0, 0]);
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "13");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "30");
    }

    #[test]
    fn test_copies_past_the_end_are_dropped() {
        assert_eq!(total_cards(&[5, 0]), Some(3));
        assert_eq!(total_cards(&[]), Some(0));
    }

    #[test]
    fn test_points_overflow_is_an_error() {
        let held = vec!["1"; 70].join(" ");
        let mut shared = Solver::parse(&format!("Card 1: 1 | {held}")).unwrap();
        assert_eq!(shared, vec![70]);
        let err = <Solver as aoc_solver::Solver>::solve_part(&mut shared, 1).unwrap_err();
        assert!(matches!(err, SolveError::SolveFailed(_)), "{err:?}");

        // 64 matches still fits: 2^63
        let held = vec!["1"; 64].join(" ");
        assert_eq!(solve(&format!("Card 1: 1 | {held}"), 1), (1u64 << 63).to_string());
    }

    #[test]
    fn test_card_count_overflow_is_an_error() {
        // Each card wins a copy of every later card, doubling the count per card
        let mut shared: MatchCounts = (0..70).rev().collect();
        let err = <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2).unwrap_err();
        assert!(matches!(err, SolveError::SolveFailed(_)), "{err:?}");
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = Solver::parse("Card 1: 1 2 | 3\nCard 2: 1 x | 3").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("\"x\""), "{message}");

        assert!(Solver::parse("Card 1: 1 2 3").is_err());
        assert!(Solver::parse("Deck 1: 1 | 2").is_err());
    }
}
