//! Minimal TAP (Test Anything Protocol) emitter for suite runs.

use std::io::Write;

pub struct Tap<W: Write> {
    out: W,
    tests: usize,
    failures: usize,
}

impl Tap<std::io::Stdout> {
    pub fn new() -> Self {
        Tap::with_output(std::io::stdout())
    }
}

impl Default for Tap<std::io::Stdout> {
    fn default() -> Self {
        Tap::new()
    }
}

impl<W: Write> Tap<W> {
    pub fn with_output(out: W) -> Self {
        Tap {
            out,
            tests: 0,
            failures: 0,
        }
    }

    pub fn ok(&mut self, name: impl AsRef<str>) {
        self.tests += 1;
        let _ = writeln!(self.out, "ok {} - {}", self.tests, name.as_ref());
    }

    pub fn not_ok(&mut self, name: impl AsRef<str>, diagnostic: impl AsRef<str>) {
        self.tests += 1;
        self.failures += 1;
        let _ = writeln!(self.out, "not ok {} - {}", self.tests, name.as_ref());
        for line in diagnostic.as_ref().lines() {
            let _ = writeln!(self.out, "# {}", line);
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Emit the plan line and flush.
    pub fn finish(mut self) {
        let _ = writeln!(self.out, "1..{}", self.tests);
        let _ = self.out.flush();
    }
}
