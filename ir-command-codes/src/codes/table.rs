//! Inverted code table
//!
//! Turns grouped per-command code lists into a single `code -> command`
//! index so that resolving a received code is a hash lookup. Codes from
//! several remotes can be merged into one table; each code remembers which
//! remote contributed it.

use crate::codes::builtin::{CommandCodeSet, BUILTIN_CODE_SETS, BUILTIN_SOURCE};
use crate::codes::remote::RemoteProfile;
use crate::types::{Command, Result, TableError};
use std::collections::HashMap;
use std::sync::OnceLock;

static BUILTIN_TABLE: OnceLock<CodeTable> = OnceLock::new();

/// Where a code points to
#[derive(Debug, Clone, Copy)]
struct Binding {
    command: Command,
    /// Index into `CodeTable::sources`
    source: usize,
}

/// One row of the table, as returned by [`CodeTable::entries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry<'a> {
    pub code: u32,
    pub command: Command,
    pub source: &'a str,
}

/// The code table
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    /// Key: raw code, Value: bound command and its source
    by_code: HashMap<u32, Binding>,

    /// Reverse index, codes kept in insertion order
    by_command: HashMap<Command, Vec<u32>>,

    /// Names of the remotes that contributed codes
    sources: Vec<String>,
}

impl CodeTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table holding the built-in codes
    ///
    /// Built on first use and shared read-only afterwards.
    pub fn builtin() -> &'static CodeTable {
        BUILTIN_TABLE.get_or_init(|| {
            let mut table = CodeTable::new();
            let source = table.source_index(BUILTIN_SOURCE);
            // Non-empty and disjoint sets are asserted at compile time
            for set in BUILTIN_CODE_SETS {
                for &code in set.codes {
                    table.bind(code, set.command, source);
                }
            }
            log::debug!("Built-in code table ready: {} codes", table.len());
            table
        })
    }

    /// Build a table from grouped code sets, all attributed to `source`
    pub fn from_sets(sets: &[CommandCodeSet], source: &str) -> Result<Self> {
        let mut table = CodeTable::new();
        let groups: Vec<(Command, &[u32])> = sets.iter().map(|s| (s.command, s.codes)).collect();
        table.insert_groups(&groups, source)?;
        Ok(table)
    }

    /// Bind `codes` to `command`
    ///
    /// Fails without touching the table if `codes` is empty or any code is
    /// already bound to a different command. Binding a code again to the same
    /// command is a no-op.
    pub fn insert_set(&mut self, command: Command, codes: &[u32], source: &str) -> Result<()> {
        self.insert_groups(&[(command, codes)], source)
    }

    /// Merge every code group of a remote profile, all or nothing
    pub fn add_remote(&mut self, remote: &RemoteProfile) -> Result<()> {
        let groups: Vec<(Command, &[u32])> = remote.code_sets().collect();
        self.insert_groups(&groups, &remote.name)?;
        log::info!(
            "Added remote '{}': {} codes for {} commands",
            remote.name,
            remote.num_codes(),
            groups.len()
        );
        Ok(())
    }

    /// Resolve a raw code to its command
    ///
    /// Unknown codes (noise, other remotes, repeat frames) give `None`.
    pub fn resolve(&self, code: u32) -> Option<Command> {
        self.by_code.get(&code).map(|binding| binding.command)
    }

    /// True if the code is bound to any command
    pub fn contains(&self, code: u32) -> bool {
        self.by_code.contains_key(&code)
    }

    /// All codes bound to a command, in insertion order
    pub fn codes_for(&self, command: Command) -> &[u32] {
        self.by_command
            .get(&command)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Name of the remote that contributed a code
    pub fn source_of(&self, code: u32) -> Option<&str> {
        self.by_code
            .get(&code)
            .map(|binding| self.sources[binding.source].as_str())
    }

    /// Number of bound codes
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// True if no code is bound
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All rows sorted by code
    pub fn entries(&self) -> Vec<TableEntry<'_>> {
        let mut entries: Vec<TableEntry<'_>> = self
            .by_code
            .iter()
            .map(|(&code, binding)| TableEntry {
                code,
                command: binding.command,
                source: self.sources[binding.source].as_str(),
            })
            .collect();
        entries.sort_unstable_by_key(|entry| entry.code);
        entries
    }

    /// Get table statistics
    pub fn stats(&self) -> TableStats {
        TableStats {
            num_codes: self.by_code.len(),
            num_commands: self.by_command.len(),
            num_sources: self.sources.len(),
        }
    }

    /// Validate every group against the table and against each other, then
    /// insert them
    fn insert_groups(&mut self, groups: &[(Command, &[u32])], source: &str) -> Result<()> {
        let mut staged: HashMap<u32, Command> = HashMap::new();

        for &(command, codes) in groups {
            if codes.is_empty() {
                return Err(TableError::EmptyCodeSet {
                    command,
                    source_name: source.to_string(),
                });
            }

            for &code in codes {
                if let Some(binding) = self.by_code.get(&code) {
                    if binding.command != command {
                        return Err(TableError::CodeCollision {
                            code,
                            existing: binding.command,
                            existing_source: self.sources[binding.source].clone(),
                            command,
                            source_name: source.to_string(),
                        });
                    }
                }

                if let Some(&other) = staged.get(&code) {
                    if other != command {
                        return Err(TableError::CodeCollision {
                            code,
                            existing: other,
                            existing_source: source.to_string(),
                            command,
                            source_name: source.to_string(),
                        });
                    }
                }
                staged.insert(code, command);
            }
        }

        // Only remotes that bind at least one new code count as sources
        if staged.keys().all(|code| self.by_code.contains_key(code)) {
            log::debug!("Nothing new to bind from '{}'", source);
            return Ok(());
        }

        let source_idx = self.source_index(source);
        for &(command, codes) in groups {
            log::debug!("Binding {} code(s) to {} from '{}'", codes.len(), command, source);
            for &code in codes {
                self.bind(code, command, source_idx);
            }
        }

        Ok(())
    }

    /// Insert a single code, skipping codes already present
    fn bind(&mut self, code: u32, command: Command, source: usize) {
        if self.by_code.contains_key(&code) {
            return;
        }
        self.by_code.insert(code, Binding { command, source });
        self.by_command.entry(command).or_default().push(code);
    }

    fn source_index(&mut self, source: &str) -> usize {
        match self.sources.iter().position(|s| s == source) {
            Some(idx) => idx,
            None => {
                self.sources.push(source.to_string());
                self.sources.len() - 1
            }
        }
    }
}

/// Table statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Total number of bound codes
    pub num_codes: usize,
    /// Number of commands with at least one code
    pub num_commands: usize,
    /// Number of remotes that contributed codes
    pub num_sources: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = CodeTable::new();
        assert!(table.is_empty());
        assert_eq!(table.resolve(1086283935), None);
        assert_eq!(
            table.stats(),
            TableStats {
                num_codes: 0,
                num_commands: 0,
                num_sources: 0
            }
        );
    }

    #[test]
    fn test_builtin_examples() {
        let table = CodeTable::builtin();
        assert_eq!(table.resolve(1086283935), Some(Command::Forward));
        assert_eq!(table.resolve(3225387135), Some(Command::Slow));
        assert_eq!(table.resolve(0), None);
        assert_eq!(table.source_of(1086283935), Some(BUILTIN_SOURCE));
    }

    #[test]
    fn test_builtin_stats() {
        let stats = CodeTable::builtin().stats();
        assert_eq!(stats.num_codes, 13);
        assert_eq!(stats.num_commands, 13);
        assert_eq!(stats.num_sources, 1);
    }

    #[test]
    fn test_insert_set_and_reverse_lookup() {
        let mut table = CodeTable::new();
        table.insert_set(Command::Stop, &[10, 11], "tv").unwrap();
        table.insert_set(Command::Stop, &[12], "dvd").unwrap();

        assert_eq!(table.codes_for(Command::Stop), &[10, 11, 12]);
        assert_eq!(table.codes_for(Command::Fast), &[] as &[u32]);
        assert_eq!(table.source_of(12), Some("dvd"));
        assert_eq!(table.stats().num_sources, 2);
    }

    #[test]
    fn test_same_command_rebinding_is_noop() {
        let mut table = CodeTable::new();
        table.insert_set(Command::Forward, &[1, 2], "a").unwrap();
        table.insert_set(Command::Forward, &[2, 3], "b").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.codes_for(Command::Forward), &[1, 2, 3]);
        // First contributor keeps ownership of the shared code
        assert_eq!(table.source_of(2), Some("a"));
    }

    #[test]
    fn test_sources_count_only_contributing_remotes() {
        let mut table = CodeTable::builtin().clone();

        table.add_remote(&RemoteProfile::new("empty")).unwrap();
        let rebind_only = RemoteProfile::new("rebind").with_codes(Command::Forward, [1086283935]);
        table.add_remote(&rebind_only).unwrap();
        let blank = RemoteProfile::from_toml_str("name = \"blank\"\n[codes]\n").unwrap();
        table.add_remote(&blank).unwrap();

        assert_eq!(table.stats().num_codes, 13);
        assert_eq!(table.stats().num_sources, 1);
        assert_eq!(table.source_of(1086283935), Some(BUILTIN_SOURCE));

        let partial = RemoteProfile::new("partial").with_codes(Command::Forward, [1086283935, 99]);
        table.add_remote(&partial).unwrap();
        assert_eq!(table.stats().num_sources, 2);
        assert_eq!(table.source_of(99), Some("partial"));
    }

    #[test]
    fn test_collision_leaves_table_untouched() {
        let mut table = CodeTable::new();
        table.insert_set(Command::Forward, &[1], "a").unwrap();

        let err = table
            .insert_set(Command::Backward, &[5, 1], "b")
            .unwrap_err();
        match err {
            TableError::CodeCollision {
                code,
                existing,
                command,
                ..
            } => {
                assert_eq!(code, 1);
                assert_eq!(existing, Command::Forward);
                assert_eq!(command, Command::Backward);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(table.resolve(5), None);
        assert_eq!(table.len(), 1);
        assert_eq!(table.stats().num_sources, 1);
    }

    #[test]
    fn test_empty_set_rejected() {
        let mut table = CodeTable::new();
        assert!(matches!(
            table.insert_set(Command::Fast, &[], "a"),
            Err(TableError::EmptyCodeSet { command: Command::Fast, .. })
        ));
    }

    #[test]
    fn test_from_sets_detects_collision_within_batch() {
        const SETS: &[CommandCodeSet] = &[
            CommandCodeSet::new(Command::TurnLeft, &[42]),
            CommandCodeSet::new(Command::TurnRight, &[42]),
        ];
        let result = CodeTable::from_sets(SETS, "bad");
        assert!(matches!(result, Err(TableError::CodeCollision { code: 42, .. })));
    }

    #[test]
    fn test_entries_sorted() {
        let table = CodeTable::from_sets(BUILTIN_CODE_SETS, BUILTIN_SOURCE).unwrap();
        let entries = table.entries();
        assert_eq!(entries.len(), 13);
        assert!(entries.windows(2).all(|w| w[0].code < w[1].code));
        assert_eq!(entries.last().map(|e| e.command), Some(Command::Slow));
    }
}
