//! Output rendering
//!
//! Prints resolved codes and table listings as aligned text or JSON.

use crate::config::OutputFormat;
use anyhow::Result;
use ir_command_codes::{CodeTable, Command, NecFrame, TableStats};
use serde::Serialize;
use std::io::Write;

/// Outcome of resolving one code given by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub code: u32,
    pub hex: String,
    pub command: Option<Command>,
    pub source: Option<String>,
}

impl Resolution {
    pub fn new(table: &CodeTable, code: u32) -> Self {
        Self {
            code,
            hex: format!("0x{:08X}", code),
            command: table.resolve(code),
            source: table.source_of(code).map(str::to_string),
        }
    }
}

/// One listed table row
#[derive(Debug, Clone, Serialize)]
struct TableRow<'a> {
    code: u32,
    hex: String,
    command: Command,
    source: &'a str,
    nec: Option<NecFrame>,
}

pub fn write_resolutions<W: Write>(
    out: &mut W,
    resolutions: &[Resolution],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, resolutions)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for r in resolutions {
                let command = r.command.map(|c| c.name()).unwrap_or("-");
                writeln!(out, "{}  {:>10}  {}", r.hex, r.code, command)?;
            }
        }
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, table: &CodeTable, format: OutputFormat) -> Result<()> {
    let rows: Vec<TableRow<'_>> = table
        .entries()
        .into_iter()
        .map(|entry| TableRow {
            code: entry.code,
            hex: format!("0x{:08X}", entry.code),
            command: entry.command,
            source: entry.source,
            nec: NecFrame::from_raw(entry.code),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "{:<10}  {:>10}  {:<14}  {:<10}  {}",
                "HEX", "CODE", "COMMAND", "SOURCE", "NEC"
            )?;
            for row in &rows {
                let nec = row
                    .nec
                    .map(|frame| frame.to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:<10}  {:>10}  {:<14}  {:<10}  {}",
                    row.hex,
                    row.code,
                    row.command.name(),
                    row.source,
                    nec
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &TableStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "codes": stats.num_codes,
                "commands": stats.num_commands,
                "sources": stats.num_sources,
            });
            writeln!(out, "{}", value)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Codes:    {}", stats.num_codes)?;
            writeln!(out, "Commands: {}", stats.num_commands)?;
            writeln!(out, "Sources:  {}", stats.num_sources)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_resolutions() {
        let table = CodeTable::builtin();
        let resolutions = vec![Resolution::new(table, 1086283935), Resolution::new(table, 0)];
        let text = render(|out| write_resolutions(out, &resolutions, OutputFormat::Text));

        assert_eq!(
            text,
            "0x40BF609F  1086283935  FORWARD\n0x00000000           0  -\n"
        );
    }

    #[test]
    fn test_json_resolutions() {
        let table = CodeTable::builtin();
        let resolutions = vec![Resolution::new(table, 3225387135)];
        let text = render(|out| write_resolutions(out, &resolutions, OutputFormat::Json));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["command"], "slow");
        assert_eq!(value[0]["hex"], "0xC03F807F");
        assert_eq!(value[0]["source"], "builtin");
    }

    #[test]
    fn test_text_table_listing() {
        let text = render(|out| write_table(out, CodeTable::builtin(), OutputFormat::Text));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 14);
        assert!(lines[0].starts_with("HEX"));
        assert!(lines[1].starts_with("0x40BF38C7"));
        assert!(lines[1].contains("FAST"));
        assert!(lines[1].ends_with("addr=0x40 cmd=0x38"));
    }

    #[test]
    fn test_json_stats() {
        let stats = CodeTable::builtin().stats();
        let text = render(|out| write_stats(out, &stats, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["codes"], 13);
        assert_eq!(value["sources"], 1);
    }
}
