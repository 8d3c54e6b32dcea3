//! Player input parsing.

use std::io::BufRead;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([nbrq])?$").expect("MOVE_RE regex should be valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("end of input")]
    EndOfInput,
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
}

/// A line typed by the human player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A move in coordinate notation, e.g. `e2e4` or `e7e8q`. Always lowercase.
    Move { notation: String },
    Undo,
    NewGame,
    Quit,
}

impl FromStr for PlayerInput {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim().to_lowercase();

        match trimmed.as_str() {
            "undo" | "u" => return Ok(PlayerInput::Undo),
            "new" | "n" => return Ok(PlayerInput::NewGame),
            "quit" | "q" | "exit" => return Ok(PlayerInput::Quit),
            _ => {}
        }

        if let Some(caps) = MOVE_RE.captures(&trimmed) {
            let promotion = caps.get(3).map_or("", |m| m.as_str());
            return Ok(PlayerInput::Move {
                notation: format!("{}{}{}", &caps[1], &caps[2], promotion),
            });
        }

        Err(InputError::InvalidInput {
            input: input.trim().to_string(),
        })
    }
}

/// Reads one line from `reader` and parses it. Blank lines are skipped.
pub fn read_player_input<R: BufRead>(reader: &mut R) -> Result<PlayerInput, InputError> {
    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|error| InputError::IOError {
                error: error.to_string(),
            })?;

        if read == 0 {
            return Err(InputError::EndOfInput);
        }
        if line.trim().is_empty() {
            continue;
        }

        return line.parse();
    }
}
