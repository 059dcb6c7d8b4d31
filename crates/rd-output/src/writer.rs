//! The `SnapshotWriter` trait implemented by all backends.

use rd_env::Environment;

use crate::OutputResult;

/// Persists the environment's host-visible state at a given simulated time.
///
/// The driver only calls [`write_snapshot`](Self::write_snapshot) after the
/// solver has transferred its results back, so implementations may read
/// `env.densities` freely.
pub trait SnapshotWriter {
    fn write_snapshot(&mut self, time: f64, env: &Environment) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: SnapshotWriter + ?Sized> SnapshotWriter for Box<W> {
    fn write_snapshot(&mut self, time: f64, env: &Environment) -> OutputResult<()> {
        (**self).write_snapshot(time, env)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// A [`SnapshotWriter`] that discards everything.
#[derive(Debug, Default)]
pub struct NoopWriter;

impl SnapshotWriter for NoopWriter {
    fn write_snapshot(&mut self, _time: f64, _env: &Environment) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
