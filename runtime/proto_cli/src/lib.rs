//! Proto CLI - command-line runner for the protokit demos.
//!
//! `proto list` prints the chapters; `proto run [chapter...]` runs them.
//! Argument parsing lives in `config`, subscriber setup in `logging`.

mod config;
mod logging;

pub use config::{parse_args, CliError, Command, RunConfig, DEFAULT_SEED};
pub use logging::init_tracing;

use proto_demos::{find_chapter, Chapter, DemoContext, CHAPTERS};
use proto_func::SharedPrintHandler;

/// Print one line per chapter: its name and title.
pub fn list_chapters(printer: &SharedPrintHandler) {
    for chapter in &CHAPTERS {
        printer.println(&format!("{:<12} {}", chapter.name, chapter.title));
    }
}

/// Run the configured chapters (all of them when none are named).
///
/// Every name is resolved before anything runs, so an unknown chapter
/// produces no partial output.
pub fn run_chapters(config: &RunConfig, printer: SharedPrintHandler) -> Result<(), CliError> {
    let chapters: Vec<&'static Chapter> = if config.chapters.is_empty() {
        CHAPTERS.iter().collect()
    } else {
        config
            .chapters
            .iter()
            .map(|name| find_chapter(name).ok_or_else(|| CliError::UnknownChapter(name.clone())))
            .collect::<Result<_, _>>()?
    };

    tracing::debug!(seed = config.seed, chapters = chapters.len(), "starting run");
    let ctx = DemoContext::new(printer, config.seed);
    for chapter in chapters {
        chapter.run(&ctx)?;
    }
    Ok(())
}
