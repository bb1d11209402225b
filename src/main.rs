use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;

use tally::shell::{self, Console};
use tally::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Small record-keeping tools over CSV files")]
struct Cli {
    /// JSON config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the CSV files (overrides the config file)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Four-operation calculator
    Calc,
    /// Grade a batch of students per discipline
    Grades,
    /// Monthly payments and totals for a loan
    Loan,
    /// Squad measures, statistics and recommendations
    Squad,
    /// Sports group: athletes and evaluations
    Athletes,
    /// Products and prices
    Stock,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    info!("tally {} using data dir {}", tally::VERSION, config.data_dir.display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let mut console = Console::new(&mut input, &mut output);

    match cli.command {
        Command::Calc => shell::calc::run(&mut console)?,
        Command::Grades => shell::grades::run(&config, &mut console)?,
        Command::Loan => shell::loan::run(&mut console)?,
        Command::Squad => shell::squad::run(&config, &mut console)?,
        Command::Athletes => shell::athletes::run(&config, &mut console)?,
        Command::Stock => shell::stock::run(&config, &mut console)?,
    }

    Ok(())
}
