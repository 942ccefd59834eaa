//! IR Command Codes Library
//!
//! Maps raw 32-bit infrared remote-control codes to logical robot-movement
//! commands (forward, backward, turns, speed levels, stop).
//!
//! # Architecture
//!
//! The library is a lookup table and nothing more:
//! - A constant built-in table, checked at compile time for empty sets and
//!   codes bound to two commands
//! - An inverted `code -> command` index built once and shared read-only
//! - Remote profiles (TOML) that add the codes of further remotes, rejected
//!   as a whole if they clash with codes already bound
//! - NEC frame inspection for the 32-bit codes
//!
//! The library does NOT:
//! - Decode IR pulse trains
//! - Debounce or repeat held buttons
//! - Drive motors or dispatch commands
//!
//! # Example Usage
//!
//! ```
//! use ir_command_codes::{CodeTable, Command};
//!
//! let table = CodeTable::builtin();
//! assert_eq!(table.resolve(1086283935), Some(Command::Forward));
//! assert_eq!(table.resolve(3225387135), Some(Command::Slow));
//!
//! // Noise and unknown remotes are not errors
//! assert_eq!(table.resolve(0), None);
//! ```

// Public modules
pub mod codes;
pub mod config;
pub mod nec;
pub mod resolver;
pub mod types;

// Re-export main types for convenience
pub use codes::{
    CodeTable, CommandCodeSet, RemoteProfile, TableEntry, TableStats, BUILTIN_CODE_SETS,
    BUILTIN_SOURCE,
};
pub use config::ResolverConfig;
pub use nec::{NecFrame, NEC_REPEAT_CODE};
pub use resolver::{CommandResolver, ResolvingIterator};
pub use types::{parse_code, Command, CommandKind, ResolvedCode, Result, TableError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve a raw code against the built-in table
pub fn resolve(code: u32) -> Option<Command> {
    CodeTable::builtin().resolve(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        assert_eq!(resolve(1086283935), Some(Command::Forward));
        assert_eq!(resolve(3225387135), Some(Command::Slow));
        assert_eq!(resolve(0), None);
    }
}
