//! IR Command Codes CLI Application
//!
//! Command-line front end for the ir-command-codes library:
//! - Resolve codes given as arguments or on stdin
//! - List the merged code table
//! - Check remote profiles for codes bound to two commands

use anyhow::{Context, Result};
use clap::Parser;
use ir_command_codes::{parse_code, CommandResolver, ResolverConfig};
use std::io::{self, Read};
use std::path::PathBuf;

mod config;
mod report;

use config::OutputFormat;
use report::Resolution;

/// IR Command Codes - Resolve infrared remote codes to robot commands
#[derive(Parser, Debug)]
#[command(name = "ir-command-cli")]
#[command(about = "Resolve IR remote codes to robot movement commands", long_about = None)]
#[command(version)]
struct Args {
    /// Codes to resolve, decimal or 0x-prefixed hex
    #[arg(value_name = "CODE")]
    codes: Vec<String>,

    /// Read whitespace-separated codes from stdin
    #[arg(long)]
    stdin: bool,

    /// Remote profile file(s) to merge (can be repeated)
    #[arg(short, long, value_name = "FILE")]
    remote: Vec<PathBuf>,

    /// Leave the built-in codes out of the table
    #[arg(long)]
    no_builtin: bool,

    /// Print the whole code table
    #[arg(short, long, conflicts_with_all = ["check", "codes", "stdin"])]
    list: bool,

    /// Load all remotes, report table statistics and fail on clashing codes
    #[arg(long, conflicts_with_all = ["codes", "stdin"])]
    check: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("IR Command CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using code library v{}", ir_command_codes::VERSION);

    let (resolver_config, format) = build_config(&args)?;
    let resolver = CommandResolver::from_config(&resolver_config)
        .context("Failed to build code table")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.check {
        report::write_stats(&mut out, &resolver.stats(), format)?;
    } else if args.list {
        report::write_table(&mut out, resolver.table(), format)?;
    } else if !args.codes.is_empty() || args.stdin {
        let input = args.stdin.then(io::stdin);
        resolve_mode(&args, &resolver, format, input, &mut out)?;
    } else {
        // No input - show help
        println!("IR Command Codes - No input specified");
        println!("\nQuick Start:");
        println!("  ir-command-cli 1086283935 0x40BF50AF");
        println!("  ir-command-cli --list");
        println!("  ir-command-cli --remote car-mp3.toml --check");
        println!("\nUse --help for more options");
    }

    Ok(())
}

/// Merge the config file (if any) with command line overrides
fn build_config(args: &Args) -> Result<(ResolverConfig, OutputFormat)> {
    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let mut resolver_config = app_config.resolver;
    if args.no_builtin {
        resolver_config = resolver_config.with_builtin(false);
    }
    for remote in &args.remote {
        resolver_config = resolver_config.add_remote(remote);
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        app_config.output.format
    };

    Ok((resolver_config, format))
}

/// Split everything readable from `input` into whitespace-separated words
fn read_code_words<R: Read>(mut input: R) -> Result<Vec<String>> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read codes from stdin")?;
    Ok(buf.split_whitespace().map(str::to_string).collect())
}

/// Resolve codes from arguments and/or `input` and print one line per code
fn resolve_mode<R: Read, W: io::Write>(
    args: &Args,
    resolver: &CommandResolver,
    format: OutputFormat,
    input: Option<R>,
    out: &mut W,
) -> Result<()> {
    let mut inputs: Vec<String> = args.codes.clone();

    if let Some(reader) = input {
        inputs.extend(read_code_words(reader)?);
    }

    let mut resolutions = Vec::with_capacity(inputs.len());
    for text in &inputs {
        let code = parse_code(text).with_context(|| format!("Bad code argument '{}'", text))?;
        resolutions.push(Resolution::new(resolver.table(), code));
    }

    let unknown = resolutions.iter().filter(|r| r.command.is_none()).count();
    if unknown > 0 {
        log::debug!("{} of {} codes did not resolve", unknown, resolutions.len());
    }

    report::write_resolutions(out, &resolutions, format)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
