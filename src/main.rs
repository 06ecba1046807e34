//! Splicer CLI
//!
//! Command-line interface for the Splicer signal combination tools.

use clap::Parser;
use env_logger::Env;
use log::debug;

use splicer::cli::{commands, Cli, Commands};
use splicer::ops::OperationParams;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Splicer v{}", env!("CARGO_PKG_VERSION"));

    handle_command(cli.command, cli.json)
}

fn handle_command(cmd: Commands, json: bool) -> anyhow::Result<()> {
    match cmd {
        Commands::Combine {
            mode,
            base,
            add,
            output,
            position,
            balance,
            add_offset,
            normalize,
        } => {
            let params = OperationParams::new(mode.into(), position)
                .with_mix_balance(balance)
                .with_add_offset(add_offset)
                .with_normalize(normalize);
            commands::combine(&base, &add, &output, &params, json)
        }
        Commands::Separate {
            mode,
            combined,
            removal,
            output,
            position,
            balance,
        } => {
            let params = OperationParams::new(mode.into(), position).with_mix_balance(balance);
            commands::separate(&combined, &removal, &output, &params, json)
        }
        Commands::Batch { jobs, threads } => commands::batch(&jobs, threads, json),
        Commands::Generate {
            output,
            samples,
            sample_rate,
            seed,
        } => commands::generate(&output, samples, sample_rate, seed),
        Commands::Inspect { path } => commands::inspect(&path, json),
        Commands::Compare { a, b, tolerance } => commands::compare_files(&a, &b, tolerance, json),
    }
}
