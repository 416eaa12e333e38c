//! noop
//! addx 3
//! addx -5

use std::borrow::Cow;
use std::error;
use std::str::FromStr;
use std::{fmt, str::Lines};

use crate::processor::{Instruction, Mnemonic, Register};

use super::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownMnemonic,
    MalformedInstruction { mnemonic: Mnemonic },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnknownMnemonic => f.write_str("unknown mnemonic"),
            ParseErrorKind::MalformedInstruction { mnemonic } => {
                write!(f, "malformed `{}` instruction", mnemonic)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    context: Cow<'static, str>,
    line_nr: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, context: impl Into<Cow<'static, str>>, line_nr: usize) -> Self {
        Self {
            kind,
            context: context.into(),
            line_nr,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// 1-based number of the offending line
    pub fn line_nr(&self) -> usize {
        self.line_nr
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_nr, self.kind, self.context)
    }
}

impl error::Error for ParseError {}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Decodes a single line into an instruction. `line_nr` is only used for
/// error reporting.
///
/// # Examples
///
/// - `noop`
/// - `addx -5`
pub fn decode_line(line: &str, line_nr: usize) -> Result<Instruction> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or_default();

    let mnemonic = *Mnemonic::ALL
        .iter()
        .find(|mnemonic| name == mnemonic.name())
        .ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownMnemonic,
                format!("no instruction named `{}`", name),
                line_nr,
            )
        })?;

    let malformed = |context: String| {
        ParseError::new(
            ParseErrorKind::MalformedInstruction { mnemonic },
            context,
            line_nr,
        )
    };

    let instruction = match mnemonic {
        Mnemonic::Noop => Instruction::Noop,
        Mnemonic::AddX => {
            let operand = tokens
                .next()
                .ok_or_else(|| malformed("an operand is required".to_owned()))?;
            let delta = operand.parse::<Register>().map_err(|_| {
                malformed(format!("operand `{}` is not a signed integer", operand))
            })?;
            Instruction::AddX(delta)
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(malformed(format!("unexpected operand `{}`", extra)));
    }

    Ok(instruction)
}

impl FromStr for Instruction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        decode_line(s, 1)
    }
}

#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Lines<'a>,
    line_nr: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for `data`.
    pub fn new(data: &'a str) -> Self {
        Self {
            lines: data.lines(),
            line_nr: 0,
        }
    }

    /// Consumes `self` and tries to decode all lines into a [`Program`].
    ///
    /// # Errors
    ///
    /// Decoding stops at the first invalid line, whose error is returned.
    pub fn parse(self) -> Result<Program> {
        let mut instructions = Vec::new();

        for res in self {
            match res {
                Ok(instruction) => instructions.push(instruction),
                Err(err) => {
                    log::error!("{}", err);
                    return Err(err);
                }
            }
        }

        log::debug!("Decoded {} instructions", instructions.len());

        Ok(Program::new(instructions))
    }

    /// Tries to decode the next non-blank line. Each instruction should be
    /// located on its own line.
    fn parse_next_line(&mut self) -> Option<Result<Instruction>> {
        loop {
            let line = self.lines.next()?.trim();
            self.line_nr += 1;

            if line.is_empty() {
                // Empty line; skip
                continue;
            }

            let res = decode_line(line, self.line_nr);
            if let Ok(instruction) = &res {
                log::trace!(
                    "[{}] Found {} instruction: {}",
                    self.line_nr,
                    instruction.mnemonic(),
                    instruction
                );
            }

            return Some(res);
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;

    #[test]
    fn decode_noop() -> Result<()> {
        assert_eq!("noop".parse::<Instruction>()?, Instruction::Noop);
        assert_eq!("  noop  ".parse::<Instruction>()?, Instruction::Noop);

        Ok(())
    }

    #[test]
    fn decode_add_x() -> Result<()> {
        assert_eq!("addx 3".parse::<Instruction>()?, Instruction::AddX(3));
        assert_eq!("addx -5".parse::<Instruction>()?, Instruction::AddX(-5));
        assert_eq!("addx\t+21".parse::<Instruction>()?, Instruction::AddX(21));

        Ok(())
    }

    #[test]
    fn decode_missing_operand() -> Result<()> {
        let err = "addx".parse::<Instruction>().unwrap_err();

        assert_eq!(
            err.kind(),
            ParseErrorKind::MalformedInstruction {
                mnemonic: Mnemonic::AddX
            }
        );

        Ok(())
    }

    #[test]
    fn decode_non_numeric_operand() -> Result<()> {
        let err = "addx five".parse::<Instruction>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "line 1: malformed `addx` instruction (operand `five` is not a signed integer)"
        );

        Ok(())
    }

    #[test]
    fn decode_extra_operands() -> Result<()> {
        let err = "noop 1".parse::<Instruction>().unwrap_err();
        assert_eq!(
            err.kind(),
            ParseErrorKind::MalformedInstruction {
                mnemonic: Mnemonic::Noop
            }
        );

        let err = "addx 1 2".parse::<Instruction>().unwrap_err();
        assert_eq!(
            err.kind(),
            ParseErrorKind::MalformedInstruction {
                mnemonic: Mnemonic::AddX
            }
        );

        Ok(())
    }

    #[test]
    fn decode_unknown_mnemonic() -> Result<()> {
        assert_eq!(
            "jmp 5".parse::<Instruction>().unwrap_err().kind(),
            ParseErrorKind::UnknownMnemonic
        );
        assert_eq!(
            "NOOP".parse::<Instruction>().unwrap_err().kind(),
            ParseErrorKind::UnknownMnemonic
        );

        Ok(())
    }

    #[test]
    fn parse_skips_blank_lines() -> Result<()> {
        let data = r#"
            noop

            addx 3
            addx -5
        "#;

        let program = Parser::new(data).parse()?;

        assert_eq!(
            program.instructions,
            vec![
                Instruction::Noop,
                Instruction::AddX(3),
                Instruction::AddX(-5)
            ]
        );

        Ok(())
    }

    #[test]
    fn decode_out_of_range_operand() -> Result<()> {
        let err = "addx 99999999999".parse::<Instruction>().unwrap_err();

        assert_eq!(
            err.kind(),
            ParseErrorKind::MalformedInstruction {
                mnemonic: Mnemonic::AddX
            }
        );

        Ok(())
    }

    #[test]
    fn parse_crlf_lines() -> Result<()> {
        let program = Parser::new("noop\r\naddx 3\r\naddx -5\r\n").parse()?;

        assert_eq!(
            program.instructions,
            vec![
                Instruction::Noop,
                Instruction::AddX(3),
                Instruction::AddX(-5)
            ]
        );

        Ok(())
    }

    #[test]
    fn error_names_line() -> Result<()> {
        let err = Parser::new("noop\n\nnoop 4\n").parse().unwrap_err();

        assert_eq!(err.line_nr(), 3);
        assert_eq!(
            err.to_string(),
            "line 3: malformed `noop` instruction (unexpected operand `4`)"
        );

        Ok(())
    }

    #[test]
    fn parse_stops_at_first_error() -> Result<()> {
        let data = "noop\naddx 1\nhcf\naddx\n";

        let err = Parser::new(data).parse().unwrap_err();

        assert_eq!(err.kind(), ParseErrorKind::UnknownMnemonic);
        assert_eq!(err.line_nr(), 3);

        Ok(())
    }

    #[test]
    fn parser_yields_lazily() -> Result<()> {
        let mut parser = Parser::new("addx 2\njmp 5\nnoop");

        assert_eq!(parser.next(), Some(Ok(Instruction::AddX(2))));
        assert!(matches!(parser.next(), Some(Err(_))));
        assert_eq!(parser.next(), Some(Ok(Instruction::Noop)));
        assert_eq!(parser.next(), None);

        Ok(())
    }
}
