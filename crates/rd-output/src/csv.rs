//! CSV output backend.
//!
//! Creates, in the configured output directory:
//! - `snapshots.csv` — manifest, one row per snapshot (`index,time,file`)
//! - `state_000000.csv`, `state_000001.csv`, … — one file per snapshot with
//!   columns `voxel,x,y,z,<substrate names…>`

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use rd_core::VoxelId;
use rd_env::Environment;

use crate::writer::SnapshotWriter;
use crate::{ManifestRow, OutputError, OutputResult};

pub const MANIFEST_FILE: &str = "snapshots.csv";

/// Writes each snapshot to its own CSV file and indexes them in a manifest.
pub struct CsvSnapshotWriter {
    dir:      PathBuf,
    manifest: Writer<File>,
    count:    u64,
    finished: bool,
}

impl CsvSnapshotWriter {
    /// Create `dir` if needed and open the manifest.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let manifest = Writer::from_path(dir.join(MANIFEST_FILE))?;
        Ok(Self {
            dir:      dir.to_owned(),
            manifest,
            count:    0,
            finished: false,
        })
    }

    /// Number of snapshots written so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// File name used for snapshot number `index`.
    pub fn file_name(index: u64) -> String {
        format!("state_{index:06}.csv")
    }
}

impl SnapshotWriter for CsvSnapshotWriter {
    fn write_snapshot(&mut self, time: f64, env: &Environment) -> OutputResult<()> {
        let host = &env.densities;
        if !host.is_resident() {
            return Err(OutputError::StaleState {
                time,
                expected: host.expected_len(),
                got:      host.as_slice().len(),
            });
        }

        let file = Self::file_name(self.count);
        let mut out = Writer::from_path(self.dir.join(&file))?;

        let mut header = vec!["voxel".to_owned(), "x".to_owned(), "y".to_owned(), "z".to_owned()];
        header.extend(env.substrates.iter().map(|s| s.name.clone()));
        out.write_record(&header)?;

        let mut record = Vec::with_capacity(header.len());
        for v in 0..env.mesh.voxel_count() {
            let voxel = VoxelId(v as u32);
            let [x, y, z] = env.mesh.voxel_center(voxel);
            record.clear();
            record.push(v.to_string());
            record.push(x.to_string());
            record.push(y.to_string());
            record.push(z.to_string());
            record.extend(host.voxel(voxel).iter().map(f64::to_string));
            out.write_record(&record)?;
        }
        out.flush()?;

        self.manifest.serialize(ManifestRow {
            index: self.count,
            time,
            file,
        })?;
        self.manifest.flush()?;
        self.count += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.manifest.flush()?;
        Ok(())
    }
}
