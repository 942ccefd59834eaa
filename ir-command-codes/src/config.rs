//! Resolver configuration types
//!
//! This module defines the configuration needed to assemble a code table: which
//! remotes contribute codes and how repeat frames are treated by the resolving
//! iterator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for building a [`CommandResolver`](crate::CommandResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Whether the built-in codes are part of the table
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Remote profile files merged into the table, in order
    #[serde(default)]
    pub remotes: Vec<PathBuf>,

    /// Skip NEC repeat frames silently instead of logging them as unknown
    #[serde(default = "default_true")]
    pub ignore_repeat_codes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            remotes: Vec::new(),
            ignore_repeat_codes: true,
        }
    }
}

impl ResolverConfig {
    /// Create a new resolver configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: include or leave out the built-in codes
    pub fn with_builtin(mut self, enabled: bool) -> Self {
        self.include_builtin = enabled;
        self
    }

    /// Builder method: add a remote profile file
    pub fn add_remote(mut self, path: impl Into<PathBuf>) -> Self {
        self.remotes.push(path.into());
        self
    }

    /// Builder method: choose how repeat frames are reported
    pub fn with_ignore_repeat_codes(mut self, enabled: bool) -> Self {
        self.ignore_repeat_codes = enabled;
        self
    }
}
