//! `ConsoleReporter<W>` — prints progress lines to any `Write` sink.

use std::io::{self, Write};

use rd_env::Environment;

use crate::{ProgressReport, RunSummary, SimObserver};

pub const DEFAULT_PREFIX: &str = "[diffuse]";

/// Significant digits kept when printing times and runtimes.
const SIGNIFICANT_DIGITS: usize = 6;

/// Format `value` rounded to six significant digits, without trailing zeros.
///
/// Accumulated timesteps such as `0.1 + 0.2` print as `0.3` rather than
/// `0.30000000000000004`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded: f64 = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse()
        .unwrap_or(value);
    rounded.to_string()
}

/// A [`SimObserver`] that writes the startup banner, one line per report, and
/// the completion banner, each tagged with a fixed prefix.
///
/// Write errors are stored internally because `SimObserver` methods have no
/// return value.  After `sim.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct ConsoleReporter<W: Write> {
    out:        W,
    prefix:     String,
    last_error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self::with_prefix(out, DEFAULT_PREFIX)
    }

    pub fn with_prefix(out: W, prefix: &str) -> Self {
        Self {
            out,
            prefix:     prefix.to_owned(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn store_err(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> SimObserver for ConsoleReporter<W> {
    fn on_run_start(&mut self, env: &Environment) {
        let result = writeln!(
            self.out,
            "\n{} Running simulation for {} time units...",
            self.prefix,
            format_value(env.simulation_time())
        );
        self.store_err(result);
    }

    fn on_report(&mut self, report: &ProgressReport) {
        let result = writeln!(
            self.out,
            "{} t={} diffusion runtime: {} s serialization runtime: {} s",
            self.prefix,
            format_value(report.time),
            format_value(report.compute_runtime.as_secs_f64()),
            format_value(report.snapshot_runtime.as_secs_f64())
        );
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &RunSummary) {
        let result = writeln!(self.out, "\n{} Simulation completed successfully!", self.prefix)
            .and_then(|()| self.out.flush());
        self.store_err(result);
    }
}
