//! Code table, built-in codes and remote profiles
//!
//! This module holds the constant built-in table, the remote profile loader
//! and the inverted index both feed into.

pub mod builtin;
pub mod remote;
pub mod table;

// Re-export key types for convenience
pub use builtin::{CommandCodeSet, BUILTIN_CODE_SETS, BUILTIN_SOURCE};
pub use remote::RemoteProfile;
pub use table::{CodeTable, TableEntry, TableStats};
