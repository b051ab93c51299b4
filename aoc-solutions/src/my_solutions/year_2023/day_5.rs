//! If You Give A Seed A Fertilizer
//!
//! The almanac is a chain of category maps (`seed-to-soil`, `soil-to-fertilizer`,
//! ..., `humidity-to-location`). Each map becomes one [`Stage`] of a
//! [`Pipeline`]; part 1 pushes single seeds through it and part 2 pushes whole
//! seed ranges.

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::remap::{MappingRule, Pipeline, Range, Stage};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["remap", "ranges"])]
pub struct Solver;

const FIRST_CATEGORY: &str = "seed";
const LAST_CATEGORY: &str = "location";

#[derive(Debug)]
pub struct Almanac {
    seeds: Vec<i64>,
    pipeline: Pipeline,
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (seeds_line_no, seeds_line) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("seeds line".to_string()))?;
        let seeds = parse_seeds(seeds_line).map_err(|e| invalid(seeds_line_no, e))?;

        let mut categories: Vec<&str> = vec![FIRST_CATEGORY];
        let mut stages: Vec<Stage> = Vec::new();
        let mut current: Option<Vec<MappingRule>> = None;

        for (line_no, line) in lines {
            if let Some(header) = line.strip_suffix(" map:") {
                if let Some(rules) = current.take() {
                    stages.push(finish_stage(rules, &categories));
                }

                let (from, to) = header
                    .split_once("-to-")
                    .ok_or_else(|| invalid(line_no, anyhow!("malformed map header {header:?}")))?;
                let expected = categories.last().copied().unwrap_or(FIRST_CATEGORY);
                if from != expected {
                    return Err(invalid(
                        line_no,
                        anyhow!("map {header:?} starts at {from:?}, expected {expected:?}"),
                    ));
                }
                categories.push(to);
                current = Some(Vec::new());
            } else {
                let rules = current
                    .as_mut()
                    .ok_or_else(|| invalid(line_no, anyhow!("mapping line before any map header")))?;
                rules.push(parse_rule(line).map_err(|e| invalid(line_no, e))?);
            }
        }
        if let Some(rules) = current.take() {
            stages.push(finish_stage(rules, &categories));
        }

        match categories.last().copied() {
            Some(LAST_CATEGORY) => {}
            Some(FIRST_CATEGORY) | None => {
                return Err(ParseError::MissingData("no category maps".to_string()));
            }
            Some(other) => {
                return Err(ParseError::InvalidFormat(format!(
                    "map chain ends at {other:?}, expected {LAST_CATEGORY:?}"
                )));
            }
        }

        tracing::debug!(
            seeds = seeds.len(),
            stages = stages.len(),
            chain = %categories.join(" -> "),
            "parsed almanac"
        );
        Ok(Almanac {
            seeds,
            pipeline: Pipeline::new(stages),
        })
    }
}

fn invalid(line_no: usize, err: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("(line {line_no}) {err:#}"))
}

fn parse_seeds(line: &str) -> anyhow::Result<Vec<i64>> {
    let list = line
        .strip_prefix("seeds:")
        .ok_or_else(|| anyhow!("first line must start with 'seeds:'"))?;
    let seeds = list
        .split_whitespace()
        .map(|n| n.parse::<i64>().with_context(|| format!("invalid seed {n:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if seeds.is_empty() {
        return Err(anyhow!("no seeds listed"));
    }
    Ok(seeds)
}

fn parse_rule(line: &str) -> anyhow::Result<MappingRule> {
    let values = line
        .split_whitespace()
        .map(|n| n.parse::<i64>().with_context(|| format!("invalid number {n:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    match values.as_slice() {
        &[dest, source, length] => Ok(MappingRule::new(dest, source, length)?),
        _ => Err(anyhow!(
            "expected 'destination source length', found {} values",
            values.len()
        )),
    }
}

/// `categories` ends with the target category of the map being closed
fn finish_stage(rules: Vec<MappingRule>, categories: &[&str]) -> Stage {
    let stage = Stage::new(rules);
    if let Some((first, second)) = stage.find_overlap() {
        let name = match categories {
            [.., from, to] => format!("{from}-to-{to}"),
            _ => String::from("unknown"),
        };
        tracing::warn!(
            map = %name,
            first,
            second,
            "overlapping source ranges, earlier rule takes precedence"
        );
    }
    stage
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|&seed| shared.pipeline.lookup_point(seed))
            .min()
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("no seeds"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::failed(format!(
                "seed ranges need (start, length) pairs, found {} values",
                shared.seeds.len()
            )));
        }
        let ranges = shared
            .seeds
            .chunks_exact(2)
            .map(|pair| Range::new(pair[0], pair[1]))
            .collect::<Result<Vec<_>, _>>()
            .map_err(SolveError::failed)?;

        shared
            .pipeline
            .run(&ranges)
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("no seed ranges"))
    }
}
