use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"])]
pub struct Solver;

/// Card labels from weakest to strongest
const STANDARD_ORDER: &[u8; 13] = b"23456789TJQKA";
/// Same, with `J` demoted to a joker
const JOKER_ORDER: &[u8; 13] = b"J23456789TQKA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// With `jokers`, every `J` joins the most common other label.
    fn classify(cards: &[u8; 5], jokers: bool) -> Self {
        let joker_count = if jokers {
            cards.iter().filter(|&&c| c == b'J').count()
        } else {
            0
        };

        let mut counts: Vec<usize> = cards
            .iter()
            .filter(|&&c| !(jokers && c == b'J'))
            .counts()
            .into_values()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();
        match counts.first_mut() {
            Some(most) => *most += joker_count,
            None => counts.push(joker_count),
        }

        match counts.as_slice() {
            [5] => HandType::FiveOfAKind,
            [4, ..] => HandType::FourOfAKind,
            [3, 2] => HandType::FullHouse,
            [3, ..] => HandType::ThreeOfAKind,
            [2, 2, ..] => HandType::TwoPair,
            [2, ..] => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    cards: [u8; 5],
    bid: u64,
}

impl Hand {
    /// Sort key: hand type first, then card strengths left to right
    fn strength(&self, jokers: bool) -> (HandType, [usize; 5]) {
        let order = if jokers { JOKER_ORDER } else { STANDARD_ORDER };
        let ranks = self
            .cards
            .map(|card| order.iter().position(|&c| c == card).unwrap_or_default());
        (HandType::classify(&self.cards, jokers), ranks)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_hand(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {:#}", line_idx + 1, e)))
            })
            .collect()
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("expected '<cards> <bid>'"))?;

    let cards: [u8; 5] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("hand {cards:?} must have exactly 5 cards"))?;
    if let Some(&bad) = cards.iter().find(|&&c| !STANDARD_ORDER.contains(&c)) {
        return Err(anyhow!("unknown card label {:?}", char::from(bad)));
    }
    let bid = bid
        .parse()
        .with_context(|| format!("invalid bid {bid:?}"))?;

    Ok(Hand { cards, bid })
}

/// Sum of `bid * rank`, weakest hand ranked 1
fn total_winnings(hands: &[Hand], jokers: bool) -> u64 {
    hands
        .iter()
        .map(|hand| (hand.strength(jokers), hand.bid))
        .sorted_by_key(|(strength, _)| *strength)
        .enumerate()
        .map(|(idx, ((hand_type, _), bid))| {
            tracing::trace!(rank = idx + 1, ?hand_type, bid, "ranked hand");
            (idx as u64 + 1) * bid
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}
