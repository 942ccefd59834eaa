//! Core types for the IR command code library
//!
//! This module defines the logical robot commands that raw IR codes resolve to,
//! together with the error type shared by table construction and remote loading.
//! Resolving a code never fails: an unknown code is simply `None`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Logical robot-movement command an IR code resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Drive straight ahead
    Forward,
    /// Drive straight back
    Backward,
    /// Rotate left in place
    TurnLeft,
    /// Rotate right in place
    TurnRight,
    /// Drive ahead while curving left
    ForwardLeft,
    /// Drive ahead while curving right
    ForwardRight,
    /// Reverse while curving left
    BackwardLeft,
    /// Reverse while curving right
    BackwardRight,
    /// Stop all motors
    Stop,
    /// Lowest speed level
    VerySlow,
    /// Low speed level
    Slow,
    /// High speed level
    Fast,
    /// Highest speed level
    VeryFast,
}

/// Broad category of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Direction or stop
    Motion,
    /// Speed level selection
    Speed,
}

impl Command {
    /// Every command in declaration order
    pub const ALL: [Command; 13] = [
        Command::Forward,
        Command::Backward,
        Command::TurnLeft,
        Command::TurnRight,
        Command::ForwardLeft,
        Command::ForwardRight,
        Command::BackwardLeft,
        Command::BackwardRight,
        Command::Stop,
        Command::VerySlow,
        Command::Slow,
        Command::Fast,
        Command::VeryFast,
    ];

    /// Canonical upper-case name, e.g. `TURN_LEFT`
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Forward => "FORWARD",
            Command::Backward => "BACKWARD",
            Command::TurnLeft => "TURN_LEFT",
            Command::TurnRight => "TURN_RIGHT",
            Command::ForwardLeft => "FORWARD_LEFT",
            Command::ForwardRight => "FORWARD_RIGHT",
            Command::BackwardLeft => "BACKWARD_LEFT",
            Command::BackwardRight => "BACKWARD_RIGHT",
            Command::Stop => "STOP",
            Command::VerySlow => "VERY_SLOW",
            Command::Slow => "SLOW",
            Command::Fast => "FAST",
            Command::VeryFast => "VERY_FAST",
        }
    }

    /// Whether this command steers the robot or selects a speed level
    pub const fn kind(&self) -> CommandKind {
        match self {
            Command::VerySlow | Command::Slow | Command::Fast | Command::VeryFast => {
                CommandKind::Speed
            }
            _ => CommandKind::Motion,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = TableError;

    /// Accepts `TURN_LEFT`, `turn_left` and `turn-left`
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Command::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name() == normalized)
            .ok_or_else(|| TableError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Motion => write!(f, "motion"),
            CommandKind::Speed => write!(f, "speed"),
        }
    }
}

/// A raw code that resolved to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCode {
    /// Raw 32-bit code as received
    pub code: u32,
    /// Command the code is bound to
    pub command: Command,
}

/// Parse a code written as decimal (`1086283935`) or hex (`0x40BF609F`)
pub fn parse_code(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let invalid = || TableError::InvalidCode(text.to_string());

    // Digits and '_' only; the std parsers would also take a leading '+'
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit() || c == '_') => (hex, 16),
        None if trimmed.chars().all(|c| c.is_ascii_digit() || c == '_') => (trimmed, 10),
        _ => return Err(invalid()),
    };

    u32::from_str_radix(&digits.replace('_', ""), radix).map_err(|_| invalid())
}

/// Errors raised while building a code table or loading remote profiles
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Code 0x{code:08X} already bound to {existing} by '{existing_source}', cannot bind it to {command} from '{source_name}'")]
    CodeCollision {
        code: u32,
        existing: Command,
        existing_source: String,
        command: Command,
        source_name: String,
    },

    #[error("Empty code set for {command} from '{source_name}'")]
    EmptyCodeSet {
        command: Command,
        source_name: String,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid IR code: {0}")]
    InvalidCode(String),

    #[error("Failed to parse remote profile: {0}")]
    RemoteParseError(String),

    #[error("Failed to read remote profile {path:?}: {source}")]
    RemoteReadError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.name().parse::<Command>().unwrap(), cmd);
        }
    }

    #[test]
    fn test_command_from_str_variants() {
        assert_eq!("turn-left".parse::<Command>().unwrap(), Command::TurnLeft);
        assert_eq!("backward_right".parse::<Command>().unwrap(), Command::BackwardRight);
        assert_eq!(" Very_Fast ".parse::<Command>().unwrap(), Command::VeryFast);
        assert!(matches!(
            "sideways".parse::<Command>(),
            Err(TableError::UnknownCommand(name)) if name == "sideways"
        ));
    }

    #[test]
    fn test_command_kind() {
        assert_eq!(Command::Stop.kind(), CommandKind::Motion);
        assert_eq!(Command::ForwardLeft.kind(), CommandKind::Motion);
        assert_eq!(Command::VerySlow.kind(), CommandKind::Speed);
        let speeds = Command::ALL
            .iter()
            .filter(|c| c.kind() == CommandKind::Speed)
            .count();
        assert_eq!(speeds, 4);
    }

    #[test]
    fn test_command_display_and_serde() {
        assert_eq!(format!("{}", Command::TurnRight), "TURN_RIGHT");
        assert_eq!(serde_json::to_string(&Command::VeryFast).unwrap(), "\"very_fast\"");
        let cmd: Command = serde_json::from_str("\"backward_left\"").unwrap();
        assert_eq!(cmd, Command::BackwardLeft);
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("1086283935").unwrap(), 1086283935);
        assert_eq!(parse_code("0x40BF609F").unwrap(), 0x40BF_609F);
        assert_eq!(parse_code("0xc03f_807f").unwrap(), 3225387135);
        assert_eq!(parse_code("0").unwrap(), 0);
        assert!(matches!(parse_code("0xZZ"), Err(TableError::InvalidCode(_))));
        assert!(matches!(parse_code("4294967296"), Err(TableError::InvalidCode(_))));
        assert!(matches!(parse_code("-1"), Err(TableError::InvalidCode(_))));
    }

    #[test]
    fn test_parse_code_rejects_signs() {
        for text in ["+5", "0x+5", "0X-5", "+0x5", "", "0x", "_"] {
            assert!(
                matches!(parse_code(text), Err(TableError::InvalidCode(_))),
                "'{}' should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_collision_error_message() {
        let err = TableError::CodeCollision {
            code: 0x40BF609F,
            existing: Command::Forward,
            existing_source: "builtin".to_string(),
            command: Command::Stop,
            source_name: "tv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Code 0x40BF609F already bound to FORWARD by 'builtin', cannot bind it to STOP from 'tv'"
        );
    }
}
