//! Local puzzle input files

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read-only view over puzzle inputs on disk
///
/// Directory structure: `{input_dir}/{year}/day{day:02}.txt`. An explicit
/// input file, when set, is used for every year/day instead.
pub struct InputStore {
    input_dir: PathBuf,
    explicit: Option<PathBuf>,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            explicit: None,
        }
    }

    /// Serve `path` regardless of year/day
    pub fn with_explicit_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Location of the input for a year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.explicit {
            Some(path) => path.clone(),
            None => self
                .input_dir
                .join(year.to_string())
                .join(format!("day{:02}.txt", day)),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        read(&self.input_path(year, day))
    }
}

fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::Missing(path.to_path_buf()),
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
