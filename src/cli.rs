use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use zcalc::calculator::{Calculator, copy_to_clipboard};
use zcalc::commands::CommandTable;
use zcalc::config::Config;
use zcalc::input::apply_keys;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "zcalc",
    version,
    about = "Four-function calculator with a running-operation display"
)]
pub struct Cli {
    /// Apply this key sequence, print the result and exit (e.g. "5+3=")
    #[arg(long, short)]
    pub keys: Option<String>,

    /// Print the calculator state as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Copy the final display content to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Path to a config file (defaults to <config_dir>/zcalc/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: Cli, config: Config) -> Result<()> {
    let mut calc = Calculator::with_format(config.number_format());
    let table = CommandTable::standard();

    match &args.keys {
        Some(keys) => {
            apply_keys(&mut calc, &table, keys)
                .with_context(|| format!("Failed to apply keys {:?}", keys))?;
            print_state(&calc, args.json)?;
        }
        None => interactive(&mut calc, &table, args.json)?,
    }

    if args.copy || config.clipboard.copy_on_exit {
        // Result is already printed; report and continue.
        if let Err(e) = copy_to_clipboard(calc.display_content()) {
            warn!(error = %e, "Could not copy result");
            eprintln!("{}", e);
        }
    }

    Ok(())
}

fn interactive(calc: &mut Calculator, table: &CommandTable, json: bool) -> Result<()> {
    info!("Interactive mode, reading key sequences from stdin");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        match apply_keys(calc, table, trimmed) {
            Ok(_) => print_state(calc, json)?,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

fn print_state(calc: &Calculator, json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        let text = serde_json::to_string(calc.state()).context("Failed to serialize state")?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", calc.operation_trail())?;
        writeln!(out, "{}", calc.display_content())?;
    }

    out.flush()?;
    Ok(())
}
