use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"])]
pub struct Solver;

/// A run of digits on one row, columns `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartNumber {
    value: u32,
    row: usize,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    ch: char,
    row: usize,
    col: usize,
}

impl PartNumber {
    /// 8-neighbour adjacency to any cell of the number
    fn touches(&self, symbol: &Symbol) -> bool {
        symbol.row + 1 >= self.row
            && symbol.row <= self.row + 1
            && symbol.col + 1 >= self.start
            && symbol.col <= self.end
    }
}

#[derive(Debug, Default)]
pub struct Schematic {
    numbers: Vec<PartNumber>,
    symbols: Vec<Symbol>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut schematic = Schematic::default();

        for (row, line) in input.lines().enumerate() {
            let bytes = line.trim_end().as_bytes();
            let mut col = 0;
            while col < bytes.len() {
                let byte = bytes[col];
                if byte.is_ascii_digit() {
                    let len = bytes[col..].iter().take_while(|b| b.is_ascii_digit()).count();
                    let text = &line[col..col + len];
                    let value = text.parse().map_err(|_| {
                        ParseError::InvalidFormat(format!("(line {}) number {text} is too large", row + 1))
                    })?;
                    schematic.numbers.push(PartNumber {
                        value,
                        row,
                        start: col,
                        end: col + len,
                    });
                    col += len;
                    continue;
                }

                match byte {
                    b'.' => {}
                    b if b.is_ascii_graphic() => schematic.symbols.push(Symbol {
                        ch: char::from(b),
                        row,
                        col,
                    }),
                    _ => {
                        return Err(ParseError::InvalidFormat(format!(
                            "(line {}) unexpected byte {:#04x} at column {}",
                            row + 1,
                            byte,
                            col + 1
                        )));
                    }
                }
                col += 1;
            }
        }

        if schematic.numbers.is_empty() {
            return Err(ParseError::MissingData("no part numbers in schematic".to_string()));
        }
        tracing::debug!(
            numbers = schematic.numbers.len(),
            symbols = schematic.symbols.len(),
            "parsed schematic"
        );
        Ok(schematic)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .numbers
            .iter()
            .filter(|number| shared.symbols.iter().any(|symbol| number.touches(symbol)))
            .map(|number| number.value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbols
            .iter()
            .filter(|symbol| symbol.ch == '*')
            .filter_map(|gear| {
                let adjacent = shared
                    .numbers
                    .iter()
                    .filter(|number| number.touches(gear))
                    .collect_vec();
                match adjacent.as_slice() {
                    [a, b] => Some(u64::from(a.value) * u64::from(b.value)),
                    _ => None,
                }
            })
            .sum();
        Ok(sum.to_string())
    }
}
