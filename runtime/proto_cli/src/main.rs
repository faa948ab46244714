//! Protokit demo runner.

use std::process::ExitCode;

use proto_cli::{init_tracing, list_chapters, parse_args, run_chapters, Command};
use proto_func::stdout_handler;

fn print_usage() {
    eprintln!("Usage: proto <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                 List demo chapters");
    eprintln!("  run [chapter...]     Run chapters (all when none given)");
    eprintln!();
    eprintln!("Options for run:");
    eprintln!("  --seed=<n>           Seed for random values (default: $PROTO_SEED or 0)");
    eprintln!("  --log-tree           Render RUST_LOG output as a span tree");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let env_seed = std::env::var("PROTO_SEED").ok();

    let command = match parse_args(&args, env_seed.as_deref()) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_usage();
            ExitCode::SUCCESS
        }
        Command::List => {
            list_chapters(&stdout_handler());
            ExitCode::SUCCESS
        }
        Command::Run(config) => {
            init_tracing(config.log_tree);
            match run_chapters(&config, stdout_handler()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
