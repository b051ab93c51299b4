use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["math", "binary-search"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn distance(&self, hold: u64) -> u128 {
        u128::from(hold) * u128::from(self.time - hold)
    }

    fn beats_record(&self, hold: u64) -> bool {
        self.distance(hold) > u128::from(self.record)
    }

    /// Number of hold times that beat the record.
    ///
    /// Distance is symmetric around `time / 2`, so only the shortest winning
    /// hold is searched for.
    fn ways_to_win(&self) -> u64 {
        let half = self.time / 2;
        if !self.beats_record(half) {
            return 0;
        }

        let (mut lo, mut hi) = (0, half);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.beats_record(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.time - 2 * lo + 1
    }
}

#[derive(Debug)]
pub struct RaceSheet {
    races: Vec<Race>,
    /// All columns read as one race with the spaces removed
    kerned: Race,
}

impl AocParser for Solver {
    type SharedData<'a> = RaceSheet;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_sheet(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

fn parse_sheet(input: &str) -> anyhow::Result<RaceSheet> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    let time_line = lines.next().ok_or_else(|| anyhow!("missing 'Time:' line"))?;
    let distance_line = lines.next().ok_or_else(|| anyhow!("missing 'Distance:' line"))?;

    let times = field_values(time_line, "Time:").context("(line 1)")?;
    let records = field_values(distance_line, "Distance:").context("(line 2)")?;
    if times.len() != records.len() {
        return Err(anyhow!(
            "{} times but {} distances",
            times.len(),
            records.len()
        ));
    }

    let races = times
        .iter()
        .zip(&records)
        .map(|(&time, &record)| Race { time, record })
        .collect();
    let kerned = Race {
        time: kerned_value(time_line).context("(line 1) kerned time")?,
        record: kerned_value(distance_line).context("(line 2) kerned distance")?,
    };

    Ok(RaceSheet { races, kerned })
}

fn field_values(line: &str, label: &str) -> anyhow::Result<Vec<u64>> {
    line.trim()
        .strip_prefix(label)
        .ok_or_else(|| anyhow!("expected line to start with {label:?}"))?
        .split_whitespace()
        .map(|n| n.parse::<u64>().with_context(|| format!("invalid number {n:?}")))
        .collect()
}

fn kerned_value(line: &str) -> anyhow::Result<u64> {
    let digits: String = line.chars().filter(char::is_ascii_digit).collect();
    digits
        .parse()
        .with_context(|| format!("{digits:?} is not a valid u64"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .races
            .iter()
            .map(|race| {
                let ways = race.ways_to_win();
                tracing::debug!(time = race.time, record = race.record, ways, "race");
                ways
            })
            .product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.kerned.ways_to_win().to_string())
    }
}
