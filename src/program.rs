use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::vec;

use crate::processor::{Cycle, Instruction};

pub mod parse;

use parse::{ParseError, Parser};

/// Failure to turn an input source into a [`Program`]
#[derive(Debug)]
pub enum LoadError {
    /// The input could not be opened or read
    InputUnavailable { path: PathBuf, source: io::Error },
    /// A line of the input is not a valid instruction
    Parse(ParseError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InputUnavailable { path, .. } => {
                write!(f, "input `{}` is unavailable", path.display())
            }
            LoadError::Parse(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LoadError::InputUnavailable { source, .. } => Some(source),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

/// An ordered list of decoded instructions
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    /// The instructions in execution order
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Reads and decodes the program stored at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| LoadError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Read {} bytes from `{}`", data.len(), path.display());

        Ok(data.parse()?)
    }

    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Total number of cycles the program takes to execute
    pub fn cycles(&self) -> Cycle {
        self.iter().map(|instruction| instruction.cycles()).sum()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    /// Decodes one instruction per line, stopping at the first invalid line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s).parse()
    }
}

impl IntoIterator for Program {
    type Item = Instruction;
    type IntoIter = vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = Instruction;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Instruction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter().copied()
    }
}
