//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No file at the expected location
    #[error("input file {} not found", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input for a year/day could not be loaded
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Parsing or solving failed
    #[error("{source}")]
    Solver {
        year: u16,
        day: u8,
        #[source]
        source: aoc_solver::SolverError,
    },

    /// Multiple errors collected during execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one
    /// 1. If first is singular and second is Multiple: prepend first to second's vec
    /// 2. If second is singular and first is Multiple: append second to first's vec
    /// 3. If both are Multiple: concat them
    /// 4. If both are singular: create new Multiple with both
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Number of leaf errors
    pub fn count(&self) -> usize {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.iter().map(ArcExecutorError::count).sum(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(day: u8) -> ArcExecutorError {
        ExecutorError::Input {
            year: 2023,
            day,
            source: InputError::Missing(PathBuf::from(format!("inputs/2023/day{day:02}.txt"))),
        }
        .into()
    }

    #[test]
    fn test_combine_flattens() {
        let two = ArcExecutorError::combine(missing(1), missing(2));
        assert_eq!(two.count(), 2);

        let three = ArcExecutorError::combine(two.clone(), missing(3));
        assert_eq!(three.count(), 3);
        assert!(matches!(three.inner(), ExecutorError::Multiple(v) if v.len() == 3));

        let five = ArcExecutorError::combine(two.clone(), three);
        assert!(matches!(five.inner(), ExecutorError::Multiple(v) if v.len() == 5));

        let prepended = ArcExecutorError::combine(missing(9), two);
        assert!(matches!(prepended.inner(), ExecutorError::Multiple(v) if v.len() == 3));
    }

    #[test]
    fn test_combine_opt() {
        let single = ArcExecutorError::combine_opt(None, missing(1));
        assert!(matches!(single.inner(), ExecutorError::Input { day: 1, .. }));
        assert_eq!(ArcExecutorError::combine_opt(Some(single), missing(2)).count(), 2);
    }

    proptest::proptest! {
        #[test]
        fn prop_combine_keeps_every_error(days in proptest::collection::vec(1u8..=25, 1..20)) {
            let combined = days
                .iter()
                .fold(None, |acc, &day| Some(ArcExecutorError::combine_opt(acc, missing(day))));
            let combined = combined.unwrap();
            proptest::prop_assert_eq!(combined.count(), days.len());
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            missing(5).to_string(),
            "Input unavailable for 2023/05: input file inputs/2023/day05.txt not found"
        );
        let err: ArcExecutorError = ExecutorError::Multiple(vec![missing(1), missing(2)]).into();
        assert_eq!(err.to_string(), "Multiple errors occurred (2 total)");
    }
}
