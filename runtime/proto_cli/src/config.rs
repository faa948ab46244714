//! Command-line parsing.

use proto_value::EvalError;

/// Seed used when neither `--seed` nor `PROTO_SEED` is given.
pub const DEFAULT_SEED: u64 = 0;

/// Everything that can stop the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("unknown chapter '{0}' (run `proto list` to see chapters)")]
    UnknownChapter(String),

    #[error("{}: {0}", .0.name())]
    Eval(#[from] EvalError),
}

/// Options for `proto run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Chapters to run in order; empty means all.
    pub chapters: Vec<String>,
    /// Seed for the random-value demos.
    pub seed: u64,
    /// Render logs as an indented tree instead of flat lines.
    pub log_tree: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Run(RunConfig),
}

fn parse_seed(text: &str, source: &str) -> Result<u64, CliError> {
    text.parse()
        .map_err(|_| CliError::Usage(format!("invalid seed '{text}' in {source}")))
}

/// Parse the arguments after the program name.
///
/// `env_seed` is the value of `PROTO_SEED`, used when `--seed` is absent.
pub fn parse_args(args: &[String], env_seed: Option<&str>) -> Result<Command, CliError> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "list" => Ok(Command::List),
        "run" => {
            let mut config = RunConfig {
                seed: match env_seed {
                    Some(text) => parse_seed(text, "PROTO_SEED")?,
                    None => DEFAULT_SEED,
                },
                ..RunConfig::default()
            };
            for arg in &args[1..] {
                if let Some(seed) = arg.strip_prefix("--seed=") {
                    config.seed = parse_seed(seed, "--seed")?;
                } else if arg == "--log-tree" {
                    config.log_tree = true;
                } else if arg.starts_with('-') {
                    return Err(CliError::Usage(format!("unknown option '{arg}'")));
                } else {
                    config.chapters.push(arg.clone());
                }
            }
            Ok(Command::Run(config))
        }
        other => Err(CliError::Usage(format!("unknown command '{other}'"))),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
