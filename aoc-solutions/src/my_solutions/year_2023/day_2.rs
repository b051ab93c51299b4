//! Cube Conundrum
//!
//! Each line is lexed into [`Token`]s and parsed with a small recursive
//! descent [`Parser`]:
//!
//! ```text
//! game := "Game" NUMBER ":" set (";" set)*
//! set  := draw ("," draw)*
//! draw := NUMBER COLOR
//! ```

use std::iter::Peekable;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["parsing"])]
pub struct Solver;

/// Bag contents part 1 asks about
const BAG: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unexpected character {ch:?} at column {column}")]
    UnexpectedChar { ch: char, column: usize },

    #[error("unknown word {word:?} at column {column}")]
    UnknownWord { word: String, column: usize },

    #[error("number {0:?} does not fit in u32")]
    NumberTooLarge(String),

    #[error("more than u32::MAX {0:?} cubes in one reveal")]
    CountOverflow(Color),

    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Game,
    Number(u32),
    Color(Color),
    Colon,
    Comma,
    Semicolon,
}

/// Splits one game line into tokens, skipping whitespace
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, GameError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();

        let ch = trimmed.chars().next()?;
        let column = self.pos + 1;

        let (token, len) = match ch {
            ':' => (Ok(Token::Colon), 1),
            ',' => (Ok(Token::Comma), 1),
            ';' => (Ok(Token::Semicolon), 1),
            c if c.is_ascii_digit() => {
                let len = trimmed.bytes().take_while(u8::is_ascii_digit).count();
                let text = &trimmed[..len];
                let token = text
                    .parse()
                    .map(Token::Number)
                    .map_err(|_| GameError::NumberTooLarge(text.to_string()));
                (token, len)
            }
            c if c.is_ascii_alphabetic() => {
                let len = trimmed.bytes().take_while(u8::is_ascii_alphabetic).count();
                let token = match &trimmed[..len] {
                    "Game" => Ok(Token::Game),
                    "red" => Ok(Token::Color(Color::Red)),
                    "green" => Ok(Token::Color(Color::Green)),
                    "blue" => Ok(Token::Color(Color::Blue)),
                    word => Err(GameError::UnknownWord {
                        word: word.to_string(),
                        column,
                    }),
                };
                (token, len)
            }
            c => (Err(GameError::UnexpectedChar { ch: c, column }), c.len_utf8()),
        };

        self.pos += len;
        Some(token)
    }
}

/// Recursive descent over a [`Lexer`]
struct Parser<'a> {
    tokens: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: Lexer::new(line).peekable(),
        }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<Token, GameError> {
        self.tokens.next().unwrap_or_else(|| {
            Err(GameError::Unexpected {
                expected,
                found: "end of line".to_string(),
            })
        })
    }

    fn expect(&mut self, want: Token, expected: &'static str) -> Result<(), GameError> {
        match self.next_token(expected)? {
            token if token == want => Ok(()),
            token => Err(unexpected(expected, token)),
        }
    }

    fn number(&mut self) -> Result<u32, GameError> {
        match self.next_token("a number")? {
            Token::Number(n) => Ok(n),
            token => Err(unexpected("a number", token)),
        }
    }

    fn color(&mut self) -> Result<Color, GameError> {
        match self.next_token("a color")? {
            Token::Color(color) => Ok(color),
            token => Err(unexpected("a color", token)),
        }
    }

    fn parse_game(mut self) -> Result<Game, GameError> {
        self.expect(Token::Game, "`Game`")?;
        let id = self.number()?;
        self.expect(Token::Colon, "`:`")?;

        let mut reveals = vec![self.parse_set()?];
        while let Some(token) = self.tokens.next() {
            match token? {
                Token::Semicolon => reveals.push(self.parse_set()?),
                token => return Err(unexpected("`;` or end of line", token)),
            }
        }

        Ok(Game { id, reveals })
    }

    fn parse_set(&mut self) -> Result<CubeSet, GameError> {
        let mut set = CubeSet::default();
        loop {
            let count = self.number()?;
            let color = self.color()?;
            set.add(color, count)?;

            if matches!(self.tokens.peek(), Some(Ok(Token::Comma))) {
                self.tokens.next();
            } else {
                return Ok(set);
            }
        }
    }
}

fn unexpected(expected: &'static str, token: Token) -> GameError {
    GameError::Unexpected {
        expected,
        found: format!("{token:?}"),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeSet {
    red: u32,
    green: u32,
    blue: u32,
}

impl CubeSet {
    fn add(&mut self, color: Color, count: u32) -> Result<(), GameError> {
        let slot = match color {
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Blue => &mut self.blue,
        };
        *slot = slot
            .checked_add(count)
            .ok_or(GameError::CountOverflow(color))?;
        Ok(())
    }

    fn fits_within(&self, bag: &CubeSet) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn max(self, other: CubeSet) -> CubeSet {
        CubeSet {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> Option<u64> {
        u64::from(self.red)
            .checked_mul(u64::from(self.green))?
            .checked_mul(u64::from(self.blue))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: u32,
    reveals: Vec<CubeSet>,
}

impl Game {
    /// Fewest cubes of each color that make every reveal possible
    fn minimum_set(&self) -> CubeSet {
        self.reveals
            .iter()
            .fold(CubeSet::default(), |acc, set| acc.max(*set))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                Parser::new(line)
                    .parse_game()
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .iter()
            .filter(|game| game.reveals.iter().all(|set| set.fits_within(&BAG)))
            .inspect(|game| tracing::debug!(id = game.id, "possible game"))
            .map(|game| u64::from(game.id))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = shared
            .iter()
            .try_fold(0u64, |total, game| {
                game.minimum_set()
                    .power()
                    .and_then(|power| total.checked_add(power))
            })
            .ok_or_else(|| SolveError::failed("cube power overflows u64"))?;
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "8");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "2286");
    }

    #[test]
    fn test_lexer_tokens() {
        let tokens: Result<Vec<Token>, _> = Lexer::new("Game 12: 3 blue, 4 red;").collect();
        assert_eq!(
            tokens.unwrap(),
            vec![
                Token::Game,
                Token::Number(12),
                Token::Colon,
                Token::Number(3),
                Token::Color(Color::Blue),
                Token::Comma,
                Token::Number(4),
                Token::Color(Color::Red),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_lexer_rejects_unknown_input() {
        let mut lexer = Lexer::new("Game 1: 3 purple");
        let err = lexer.find_map(Result::err).unwrap();
        assert_eq!(
            err,
            GameError::UnknownWord {
                word: "purple".to_string(),
                column: 11
            }
        );

        let mut lexer = Lexer::new("Game 1# 3 red");
        assert_eq!(
            lexer.find_map(Result::err),
            Some(GameError::UnexpectedChar { ch: '#', column: 7 })
        );
    }

    #[test]
    fn test_game_id_comes_from_the_record() {
        let games = Solver::parse("Game 7: 1 red\nGame 3: 20 red").unwrap();
        assert_eq!(games[0].id, 7);
        assert_eq!(games[1].id, 3);
        assert_eq!(solve("Game 7: 1 red\nGame 3: 20 red", 1), "7");
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = Solver::parse("Game 1: 1 red\nGame 2 1 red").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("`:`"), "{message}");

        assert!(Solver::parse("Game 1: 1 red,").is_err());
        assert!(Solver::parse("Game 1: red 1").is_err());
        assert!(Solver::parse("Game 1: 1 red 2 blue").is_err());
    }

    #[test]
    fn test_repeated_color_overflow_is_a_parse_error() {
        let err = Solver::parse("Game 1: 4294967295 red, 1 red").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 1"), "{message}");
        assert!(message.contains("Red"), "{message}");

        let games = Solver::parse("Game 1: 4294967294 red, 1 red").unwrap();
        assert_eq!(games[0].minimum_set().red, u32::MAX);
    }

    #[test]
    fn test_power_overflow_is_a_solve_error() {
        let mut shared =
            Solver::parse("Game 1: 4294967295 red, 4294967295 green, 4294967295 blue").unwrap();
        let err = <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2).unwrap_err();
        assert!(matches!(err, SolveError::SolveFailed(_)), "{err:?}");

        let mut shared = Solver::parse("Game 1: 4294967295 red, 4294967295 green, 1 blue").unwrap();
        assert_eq!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2).unwrap(),
            (u64::from(u32::MAX) * u64::from(u32::MAX)).to_string()
        );
    }
}
