//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Root of the `{year}/day{day:02}.txt` input tree
    pub input_dir: PathBuf,
    /// Explicit input file for the single selected year/day
    pub input_file: Option<PathBuf>,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, expanding `~` in paths
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = expand_tilde(&args.input_dir);
        let input_file = args.input.as_deref().map(expand_tilde);

        if let Some(path) = &input_file
            && !path.is_file()
        {
            return Err(CliError::Config(format!(
                "Input file {} does not exist",
                path.display()
            )));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            input_file,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("aoc").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(parse(&[]).unwrap()).unwrap();
        assert_eq!(config.year_filter, None);
        assert_eq!(config.day_filter, None);
        assert_eq!(config.part_filter, None);
        assert!(config.tags.is_empty());
        assert_eq!(config.input_dir, PathBuf::from("inputs"));
        assert_eq!(config.input_file, None);
        assert!(!config.quiet);
    }

    #[test]
    fn test_filters_and_tags() {
        let args = parse(&["-y", "2023", "-d", "5", "-p", "2", "--tags", "remap,ranges"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.year_filter, Some(2023));
        assert_eq!(config.day_filter, Some(5));
        assert_eq!(config.part_filter, Some(2));
        assert_eq!(config.tags, vec!["remap", "ranges"]);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(parse(&["--day", "26"]).is_err());
        assert!(parse(&["--day", "0"]).is_err());
        assert!(parse(&["--part", "3"]).is_err());
    }

    #[test]
    fn test_input_file_requires_year_and_day() {
        assert!(parse(&["--input", "x.txt"]).is_err());
        assert!(parse(&["--input", "x.txt", "--year", "2023"]).is_err());
        assert!(parse(&["--input", "x.txt", "--year", "2023", "--day", "5"]).is_ok());
    }

    #[test]
    fn test_input_file_must_exist() {
        let args = parse(&["-i", "/definitely/not/here.txt", "-y", "2023", "-d", "5"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(CliError::Config(_))));

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let args = parse(&["-i", path, "-y", "2023", "-d", "5"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.input_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("/abs/~x")), PathBuf::from("/abs/~x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
