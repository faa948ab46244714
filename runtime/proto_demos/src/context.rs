use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use proto_func::{buffer_handler, SharedPrintHandler};
use proto_value::{EvalResult, Value};

/// Everything a demo needs from its environment.
pub struct DemoContext {
    printer: SharedPrintHandler,
    rng: Rc<RefCell<StdRng>>,
}

impl DemoContext {
    /// Print through `printer`; random values come from a generator seeded
    /// with `seed`, so runs with the same seed print the same output.
    pub fn new(printer: SharedPrintHandler, seed: u64) -> Self {
        DemoContext {
            printer,
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// A context that captures output, for tests.
    pub fn buffered(seed: u64) -> Self {
        Self::new(buffer_handler(), seed)
    }

    pub fn printer(&self) -> &SharedPrintHandler {
        &self.printer
    }

    /// Shared handle to the random generator.
    pub fn rng(&self) -> Rc<RefCell<StdRng>> {
        Rc::clone(&self.rng)
    }

    pub fn println(&self, line: &str) {
        self.printer.println(line);
    }

    /// Print `label = value`, converting the value the way string
    /// concatenation would (records use their `toString`).
    pub fn show(&self, label: &str, value: &Value) -> EvalResult<()> {
        self.println(&format!("{label} = {}", value.to_js_string()?));
        Ok(())
    }

    /// Captured output lines; empty unless the printer buffers.
    pub fn lines(&self) -> Vec<String> {
        self.printer.lines()
    }
}
