use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Node names borrow from the input
#[derive(Debug)]
pub struct Network<'a> {
    instructions: Vec<Direction>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    /// Steps from `start` until `is_goal` holds, following the instructions
    /// cyclically.
    ///
    /// The walk state is `(node, instruction index)`, so after
    /// `instructions * nodes` steps without a goal it is looping forever.
    fn steps_until(&self, start: &'a str, is_goal: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let limit = self.instructions.len() * self.nodes.len().max(1);
        let mut node = start;

        for (step, direction) in self.instructions.iter().cycle().take(limit).enumerate() {
            if is_goal(node) {
                return Ok(step as u64);
            }
            let &(left, right) = self
                .nodes
                .get(node)
                .ok_or_else(|| SolveError::failed(format!("unknown node {node:?}")))?;
            node = match direction {
                Direction::Left => left,
                Direction::Right => right,
            };
        }

        if is_goal(node) {
            Ok(limit as u64)
        } else {
            Err(SolveError::failed(format!(
                "walk from {start:?} never reaches its goal"
            )))
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, instruction_line) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("instruction line".to_string()))?;
        let instructions = instruction_line
            .chars()
            .map(|c| match c {
                'L' => Ok(Direction::Left),
                'R' => Ok(Direction::Right),
                other => Err(ParseError::InvalidFormat(format!(
                    "(line 1) instruction must be 'L' or 'R', found {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut nodes = HashMap::new();
        for (line_no, line) in lines {
            let (name, left, right) = parse_node(line)
                .map_err(|e| ParseError::InvalidFormat(format!("(line {line_no}) {e}")))?;
            if nodes.insert(name, (left, right)).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {line_no}) duplicate node {name:?}"
                )));
            }
        }

        if nodes.is_empty() {
            return Err(ParseError::MissingData("node list".to_string()));
        }
        Ok(Network {
            instructions,
            nodes,
        })
    }
}

/// `AAA = (BBB, CCC)`
fn parse_node(line: &str) -> anyhow::Result<(&str, &str, &str)> {
    let (name, targets) = line
        .split_once(" = ")
        .ok_or_else(|| anyhow!("expected 'NAME = (LEFT, RIGHT)'"))?;
    let (left, right) = targets
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.split_once(", "))
        .ok_or_else(|| anyhow!("malformed targets {targets:?}"))?;
    Ok((name, left, right))
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.nodes.contains_key("AAA") {
            return Err(SolveError::failed("network has no AAA node"));
        }
        shared
            .steps_until("AAA", |node| node == "ZZZ")
            .map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut starts: Vec<&str> = shared
            .nodes
            .keys()
            .copied()
            .filter(|name| name.ends_with('A'))
            .collect();
        if starts.is_empty() {
            return Err(SolveError::failed("network has no node ending in 'A'"));
        }
        starts.sort_unstable();

        // Inputs are built so each ghost reaches a Z node on a fixed cycle
        starts.iter().try_fold(1, |acc, &start| {
            let steps = shared.steps_until(start, |node| node.ends_with('Z'))?;
            tracing::debug!(start, steps, "ghost cycle");
            Ok(lcm(acc, steps))
        })
        .map(|steps: u64| steps.to_string())
    }
}
