//! Dojang CLI - seal impressions and trademark specimens

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Stamp(args) => commands::stamp::run(args),
        Commands::Trademark(args) => commands::trademark::run(args),
        Commands::Info(args) => commands::info::run(args),
    };

    if let Err(err) = result {
        log::debug!("{err:?}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
