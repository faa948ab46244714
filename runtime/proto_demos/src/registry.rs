//! Chapter registry for looking up demos by name.

use proto_value::EvalResult;

use crate::{accessors, arrays, classes, closures, descriptors, functions, DemoContext};

/// Entry point of a single demo.
pub type DemoFn = fn(&DemoContext) -> EvalResult<()>;

/// A named demo.
pub struct Demo {
    pub name: &'static str,
    pub run: DemoFn,
}

/// A named group of demos, run in order.
pub struct Chapter {
    pub name: &'static str,
    pub title: &'static str,
    pub demos: &'static [Demo],
}

impl Chapter {
    /// Run every demo in the chapter, stopping at the first failure.
    pub fn run(&self, ctx: &DemoContext) -> EvalResult<()> {
        tracing::debug!(chapter = self.name, demos = self.demos.len(), "running chapter");
        ctx.println(&format!("== {} ==", self.title));
        for demo in self.demos {
            let _span = tracing::debug_span!("demo", chapter = self.name, name = demo.name).entered();
            ctx.println(&format!("-- {} --", demo.name));
            (demo.run)(ctx)?;
        }
        Ok(())
    }

    /// Look up a demo of this chapter by name.
    pub fn demo(&self, name: &str) -> Option<&'static Demo> {
        self.demos.iter().find(|demo| demo.name == name)
    }
}

/// All chapters in presentation order.
pub static CHAPTERS: [Chapter; 6] = [
    accessors::CHAPTER,
    descriptors::CHAPTER,
    arrays::CHAPTER,
    functions::CHAPTER,
    classes::CHAPTER,
    closures::CHAPTER,
];

pub fn find_chapter(name: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|chapter| chapter.name == name)
}

pub fn chapter_names() -> impl Iterator<Item = &'static str> {
    CHAPTERS.iter().map(|chapter| chapter.name)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
