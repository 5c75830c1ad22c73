//! Formulary - browse a formula catalog and evaluate formulas safely.

mod command;
mod config;
mod export;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use formulary_core::{Formulary, HINT, load_catalog};
use std::path::PathBuf;
use std::process::ExitCode;

use command::{VarAssignment, parse_assignment};
use logging::{LogTarget, init_logging};

#[derive(Parser, Debug)]
#[command(name = "formulary", version)]
#[command(about = "Browse a formula catalog and evaluate arithmetic formulas over declared variables.")]
struct Cli {
    /// Catalog file to open (.json or .toml)
    catalog: Option<PathBuf>,

    /// Evaluate an expression and print the result (non-interactive)
    #[arg(short = 'c', long = "command", value_name = "EXPR")]
    command: Option<String>,

    /// Evaluate the catalog entry with this id (non-interactive)
    #[arg(short = 'e', long, value_name = "ID")]
    entry: Option<String>,

    /// Bind a variable, e.g. --var U=230 (can be repeated)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    vars: Vec<VarAssignment>,

    /// Print results as JSON ({"value": ...} or {"errorMessage": ...})
    #[arg(long)]
    json: bool,

    /// List the sections and entries of the catalog
    #[arg(long)]
    list: bool,

    /// Export every card to a markdown file (non-interactive)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: <config dir>/formulary/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ignore the user config file
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. info or formulary_core=debug (RUST_LOG takes precedence)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

impl Cli {
    fn is_interactive(&self) -> bool {
        self.command.is_none() && self.entry.is_none() && !self.list && self.output.is_none()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (config, warnings) = if cli.no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(cli.config.as_deref())
    };
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let log_level = cli.log_level.as_deref().or(config.log_level.as_deref());
    let log_file = cli.log_file.as_ref().or(config.log_file.as_ref());
    let target = match log_file {
        Some(path) => LogTarget::File(path.as_path()),
        None if cli.is_interactive() => LogTarget::Off,
        None => LogTarget::Stderr,
    };
    init_logging(log_level, target)?;

    tracing::debug!(
        catalog = ?cli.catalog.as_ref().or(config.catalog.as_ref()),
        interactive = cli.is_interactive(),
        "starting formulary"
    );

    let hint = config.hint.clone().unwrap_or_else(|| HINT.to_string());
    let catalog_path = cli.catalog.clone().or(config.catalog.clone());
    let formulary = match catalog_path.as_ref() {
        Some(path) => {
            let catalog = load_catalog(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            Some(Formulary::new(catalog))
        }
        None => None,
    };

    if let Some(entry_id) = cli.entry.as_deref() {
        let Some(mut formulary) = formulary else {
            bail!("--entry requires a catalog file");
        };
        let display =
            command::evaluate_entry(&mut formulary, entry_id, cli.command.as_deref(), &cli.vars)?;
        println!("{}", command::render(&display, cli.json)?);
        return Ok(exit_code(display.is_error()));
    }

    if let Some(expression) = cli.command.as_deref() {
        let display = command::evaluate_adhoc(expression, &cli.vars);
        println!("{}", command::render(&display, cli.json)?);
        return Ok(exit_code(display.is_error()));
    }

    if cli.list || cli.output.is_some() {
        let Some(formulary) = formulary else {
            bail!("a catalog file is required");
        };
        if cli.list {
            print!("{}", command::outline(&formulary));
        }
        if let Some(output_path) = cli.output.as_ref() {
            export::write_markdown(output_path, &formulary, &hint)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
            println!("Exported to {}", output_path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    run_interactive(formulary.unwrap_or_default(), hint)
}

fn exit_code(is_error: bool) -> ExitCode {
    if is_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(feature = "tui")]
fn run_interactive(formulary: Formulary, hint: String) -> Result<ExitCode> {
    let title = formulary
        .name
        .clone()
        .unwrap_or_else(|| "Formulas".to_string());
    let mut app = tui::App::new(formulary, hint, title);
    tui::run(&mut app).context("terminal UI failed")?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_formulary: Formulary, _hint: String) -> Result<ExitCode> {
    bail!("built without the tui feature; use -c, --entry, --list or --output")
}
