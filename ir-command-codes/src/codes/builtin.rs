//! Built-in command codes
//!
//! One command may be bound to several codes, so codes from more than one
//! remote can live side by side. Two NEC remotes are covered here: address
//! `0x40` for the motion and most speed buttons, address `0xC0` for `SLOW`
//! and `VERY_FAST`.
//!
//! The grouped table is checked at compile time: every set must be non-empty
//! and no code may appear under two commands.

use crate::types::Command;

/// One command and the raw codes that trigger it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandCodeSet {
    /// Command triggered by any of `codes`
    pub command: Command,
    /// Raw 32-bit codes, never empty
    pub codes: &'static [u32],
}

impl CommandCodeSet {
    /// Create a code set
    pub const fn new(command: Command, codes: &'static [u32]) -> Self {
        Self { command, codes }
    }
}

/// Source name recorded for built-in codes
pub const BUILTIN_SOURCE: &str = "builtin";

/// The grouped built-in table
pub const BUILTIN_CODE_SETS: &[CommandCodeSet] = &[
    CommandCodeSet::new(Command::Forward, &[1086283935]),
    CommandCodeSet::new(Command::Backward, &[1086288015]),
    CommandCodeSet::new(Command::TurnLeft, &[1086296175]),
    CommandCodeSet::new(Command::TurnRight, &[1086312495]),
    CommandCodeSet::new(Command::ForwardLeft, &[1086300255]),
    CommandCodeSet::new(Command::ForwardRight, &[1086316575]),
    CommandCodeSet::new(Command::BackwardLeft, &[1086304335]),
    CommandCodeSet::new(Command::BackwardRight, &[1086320655]),
    CommandCodeSet::new(Command::Stop, &[1086279855]),
    CommandCodeSet::new(Command::VerySlow, &[1086306375]),
    CommandCodeSet::new(Command::Slow, &[3225387135]),
    CommandCodeSet::new(Command::Fast, &[1086273735]),
    CommandCodeSet::new(Command::VeryFast, &[3225354495]),
];

const _: () = assert!(
    sets_are_non_empty(BUILTIN_CODE_SETS),
    "built-in table has a command without codes"
);
const _: () = assert!(
    sets_are_disjoint(BUILTIN_CODE_SETS),
    "built-in table binds one code to two commands"
);

/// True if every set carries at least one code
pub const fn sets_are_non_empty(sets: &[CommandCodeSet]) -> bool {
    let mut i = 0;
    while i < sets.len() {
        if sets[i].codes.is_empty() {
            return false;
        }
        i += 1;
    }
    true
}

/// True if no code is shared by sets of different commands
///
/// A code repeated under the same command is tolerated, matching the runtime
/// table which treats such a rebinding as a no-op.
pub const fn sets_are_disjoint(sets: &[CommandCodeSet]) -> bool {
    let mut a = 0;
    while a < sets.len() {
        let mut b = a + 1;
        while b < sets.len() {
            if sets[a].command as u8 != sets[b].command as u8
                && shares_code(sets[a].codes, sets[b].codes)
            {
                return false;
            }
            b += 1;
        }
        a += 1;
    }
    true
}

const fn shares_code(left: &[u32], right: &[u32]) -> bool {
    let mut i = 0;
    while i < left.len() {
        let mut j = 0;
        while j < right.len() {
            if left[i] == right[j] {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}
