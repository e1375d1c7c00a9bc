//! Shape Import CLI
//!
//! Usage:
//!   shape-import [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Import configuration (TOML format)
//!   -p, --pretty             Indent the JSON output
//!   --skip-hidden            Leave hidden shapes out
//!   --lenient                Accept documents without the penpot namespace
//!   --report-skipped         Include unrecognized nodes in the output
//!   -l, --log-level <LEVEL>  Log level (default: warn)
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::{debug, LevelFilter};

use shape_import::{import_document, ImportConfig, UuidIds};

#[derive(Parser)]
#[command(name = "shape-import")]
#[command(about = "Extract design shapes from exported SVG documents as JSON")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Import configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Leave hidden shapes, and their contents, out of the result
    #[arg(long)]
    skip_hidden: bool,

    /// Accept documents whose root lacks the penpot namespace
    #[arg(long)]
    lenient: bool,

    /// Include nodes that could not be classified in the output
    #[arg(long)]
    report_skipped: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    // Load configuration; flags only ever tighten or loosen on top of it
    let mut config = match &cli.config {
        Some(path) => match ImportConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ImportConfig::default(),
    };
    if cli.pretty {
        config = config.with_pretty(true);
    }
    if cli.skip_hidden {
        config = config.with_skip_hidden(true);
    }
    if cli.lenient {
        config = config.with_require_namespace(false);
    }
    if cli.report_skipped {
        config = config.with_report_skipped(true);
    }
    debug!("configuration: {:?}", config);

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut report = match import_document(&source, &config, &UuidIds) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if !config.output.report_skipped {
        report.skipped.clear();
    }

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}
