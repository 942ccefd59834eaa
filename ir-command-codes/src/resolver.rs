//! Main resolver API
//!
//! This module provides the primary interface for the library. The
//! `CommandResolver` owns a code table assembled from the built-in codes and
//! any number of remote profiles, and turns raw IR codes into commands.

use crate::codes::{CodeTable, RemoteProfile, TableStats};
use crate::config::ResolverConfig;
use crate::nec::NEC_REPEAT_CODE;
use crate::types::{Command, ResolvedCode, Result};
use std::path::Path;

/// The main resolver struct - entry point for all lookups
#[derive(Debug, Clone)]
pub struct CommandResolver {
    /// Merged code table
    table: CodeTable,
    /// See [`ResolverConfig::ignore_repeat_codes`]
    ignore_repeat_codes: bool,
}

impl CommandResolver {
    /// Create a resolver holding the built-in codes
    pub fn new() -> Self {
        Self {
            table: CodeTable::builtin().clone(),
            ignore_repeat_codes: true,
        }
    }

    /// Create a resolver with an empty table
    pub fn empty() -> Self {
        Self {
            table: CodeTable::new(),
            ignore_repeat_codes: true,
        }
    }

    /// Build a resolver from a configuration, loading every listed remote
    ///
    /// # Example
    /// ```no_run
    /// use ir_command_codes::{CommandResolver, ResolverConfig};
    ///
    /// let config = ResolverConfig::new().add_remote("remotes/car-mp3.toml");
    /// let resolver = CommandResolver::from_config(&config).unwrap();
    /// println!("{:?}", resolver.resolve(0x00FF18E7));
    /// ```
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let mut resolver = if config.include_builtin {
            Self::new()
        } else {
            Self::empty()
        };
        resolver.ignore_repeat_codes = config.ignore_repeat_codes;

        for path in &config.remotes {
            resolver.add_remote_file(path)?;
        }

        let stats = resolver.stats();
        log::info!(
            "Resolver ready: {} codes, {} commands, {} sources",
            stats.num_codes,
            stats.num_commands,
            stats.num_sources
        );
        Ok(resolver)
    }

    /// Load a remote profile file and merge its codes
    ///
    /// On collision the table is left as it was.
    pub fn add_remote_file(&mut self, path: &Path) -> Result<()> {
        let profile = RemoteProfile::load(path)?;
        self.add_remote(&profile)
    }

    /// Merge a remote profile's codes
    pub fn add_remote(&mut self, profile: &RemoteProfile) -> Result<()> {
        self.table.add_remote(profile)
    }

    /// Resolve a raw code; `None` for codes no remote defines
    pub fn resolve(&self, code: u32) -> Option<Command> {
        self.table.resolve(code)
    }

    /// Resolve a stream of raw codes, skipping the ones with no command
    ///
    /// # Example
    /// ```
    /// use ir_command_codes::{Command, CommandResolver};
    ///
    /// let resolver = CommandResolver::new();
    /// let commands: Vec<Command> = resolver
    ///     .resolve_all([1086283935, 0, 1086279855])
    ///     .map(|resolved| resolved.command)
    ///     .collect();
    /// assert_eq!(commands, vec![Command::Forward, Command::Stop]);
    /// ```
    pub fn resolve_all<I>(&self, codes: I) -> ResolvingIterator<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u32>,
    {
        ResolvingIterator::new(codes.into_iter(), self)
    }

    /// The merged code table
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Get statistics about the merged table
    pub fn stats(&self) -> TableStats {
        self.table.stats()
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that resolves raw codes into commands
///
/// Unknown codes are dropped; the caller only sees codes that mean something.
pub struct ResolvingIterator<'a, I>
where
    I: Iterator<Item = u32>,
{
    codes: I,
    resolver: &'a CommandResolver,
}

impl<'a, I> ResolvingIterator<'a, I>
where
    I: Iterator<Item = u32>,
{
    fn new(codes: I, resolver: &'a CommandResolver) -> Self {
        Self { codes, resolver }
    }
}

impl<'a, I> Iterator for ResolvingIterator<'a, I>
where
    I: Iterator<Item = u32>,
{
    type Item = ResolvedCode;

    fn next(&mut self) -> Option<Self::Item> {
        for code in self.codes.by_ref() {
            if let Some(command) = self.resolver.resolve(code) {
                return Some(ResolvedCode { code, command });
            }

            if code == NEC_REPEAT_CODE && self.resolver.ignore_repeat_codes {
                continue;
            }
            log::trace!("Unknown IR code: 0x{:08X}, skipping", code);
        }
        None
    }
}
