//! Remote profile loader
//!
//! A remote profile adds the codes of one more IR remote to a table. Profiles
//! are TOML files keyed by command name:
//!
//! ```toml
//! name = "car-mp3"
//! protocol = "nec"
//!
//! [codes]
//! forward = [0x00FF18E7]
//! stop = [0x00FF38C7, 0x00FF02FD]
//! ```

use crate::types::{Command, Result, TableError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk layout of a profile, before command names are checked
#[derive(Debug, Deserialize)]
struct RawProfile {
    name: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    codes: BTreeMap<String, Vec<i64>>,
}

/// Codes of a single IR remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfile {
    /// Remote name, recorded as the source of its codes
    pub name: String,
    /// Protocol label (informational only)
    pub protocol: Option<String>,
    codes: BTreeMap<Command, Vec<u32>>,
}

impl RemoteProfile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol: None,
            codes: BTreeMap::new(),
        }
    }

    /// Builder method: add codes for a command
    pub fn with_codes(mut self, command: Command, codes: impl IntoIterator<Item = u32>) -> Self {
        self.codes.entry(command).or_default().extend(codes);
        self
    }

    /// Builder method: set the protocol label
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Parse a profile from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "unnamed")
    }

    /// Load a profile file; the file stem names the remote if the file does not
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading remote profile: {:?}", path);

        let content =
            std::fs::read_to_string(path).map_err(|source| TableError::RemoteReadError {
                path: path.to_path_buf(),
                source,
            })?;
        let fallback = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");

        let profile = Self::parse(&content, fallback).map_err(|e| match e {
            TableError::RemoteParseError(msg) => {
                TableError::RemoteParseError(format!("{:?}: {}", path, msg))
            }
            other => other,
        })?;

        log::info!(
            "Parsed remote '{}' with {} codes from {:?}",
            profile.name,
            profile.num_codes(),
            path
        );
        Ok(profile)
    }

    /// Code groups per command, ordered by command
    pub fn code_sets(&self) -> impl Iterator<Item = (Command, &[u32])> + '_ {
        self.codes.iter().map(|(command, codes)| (*command, codes.as_slice()))
    }

    /// Total number of codes in the profile
    pub fn num_codes(&self) -> usize {
        self.codes.values().map(Vec::len).sum()
    }

    fn parse(content: &str, fallback_name: &str) -> Result<Self> {
        let raw: RawProfile =
            toml::from_str(content).map_err(|e| TableError::RemoteParseError(e.to_string()))?;

        let name = raw.name.unwrap_or_else(|| fallback_name.to_string());
        let mut codes: BTreeMap<Command, Vec<u32>> = BTreeMap::new();

        for (key, values) in raw.codes {
            let command: Command = key.parse()?;
            if values.is_empty() {
                return Err(TableError::EmptyCodeSet {
                    command,
                    source_name: name,
                });
            }

            let entry = codes.entry(command).or_default();
            for value in values {
                let code = u32::try_from(value).map_err(|_| {
                    TableError::RemoteParseError(format!(
                        "code {} for '{}' does not fit in 32 bits",
                        value, key
                    ))
                })?;
                entry.push(code);
            }
        }

        Ok(Self {
            name,
            protocol: raw.protocol,
            codes,
        })
    }
}
