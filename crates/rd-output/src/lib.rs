//! `rd-output` — snapshot serializers for the `rd` driver.
//!
//! | Backend             | Files created                                      |
//! |---------------------|----------------------------------------------------|
//! | [`CsvSnapshotWriter`] | `state_<index:06>.csv` per snapshot, `snapshots.csv` manifest |
//! | [`NoopWriter`]      | none                                               |
//!
//! All backends implement [`SnapshotWriter`], which the driver calls with the
//! current simulated time once the host buffer is in sync.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rd_output::{CsvSnapshotWriter, SnapshotWriter};
//!
//! let mut writer = CsvSnapshotWriter::new(Path::new("./output"))?;
//! writer.write_snapshot(0.0, &env)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvSnapshotWriter;
pub use error::{OutputError, OutputResult};
pub use row::ManifestRow;
pub use writer::{NoopWriter, SnapshotWriter};
