use clap::{Parser, Subcommand};
use colored::*;

use mdabbr_lib::exit_codes::exit;

mod cli_types;
mod cli_utils;
mod commands;
mod file_processor;
mod formatter;

use cli_types::{InitArgs, ListArgs, ScanArgs};

#[derive(Parser)]
#[command(author, version, about = "Find abbreviations in Markdown documents", long_about = None)]
struct Cli {
    /// Show detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan Markdown files and report abbreviations with their titles
    Scan(ScanArgs),
    /// List the abbreviations defined for each document
    List(ListArgs),
    /// Initialize a new configuration file
    Init(InitArgs),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Scan(args) => commands::scan::handle_scan(args),
        Commands::List(args) => commands::list::handle_list(args),
        Commands::Init(args) => commands::init::handle_init(args),
    };

    match result {
        Ok(code) => exit::with_code(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
