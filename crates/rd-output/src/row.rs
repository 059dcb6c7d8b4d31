//! Plain data row types written by output backends.

use serde::Serialize;

/// One line of the snapshot manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestRow {
    pub index: u64,
    pub time:  f64,
    /// File name of the snapshot, relative to the output directory.
    pub file:  String,
}
