//! JSON configuration loader.
//!
//! # Document format
//!
//! ```json
//! {
//!   "name": "slice",
//!   "simulation_time": 250.0,
//!   "diffusion_timestep": 1.0,
//!   "output_interval": 100.0,
//!   "mesh": { "bounding_box": [0, 0, 0, 200, 200, 20], "voxel_size": [20, 20, 20] },
//!   "substrates": [
//!     { "name": "oxygen", "units": "mmHg", "diffusion_coefficient": 1000.0,
//!       "decay_rate": 0.1, "initial_condition": 38.0 }
//!   ],
//!   "solver": { "memory_space": "distinct", "check_finite": true },
//!   "output": { "directory": "output", "enabled": true }
//! }
//! ```
//!
//! `output_interval` defaults to 100; `name`, `solver`, and `output` may be
//! omitted.  Unknown keys are rejected so typos fail loudly.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use rd_core::TimeConfig;

use crate::environment::{Environment, HostBuffer};
use crate::{CartesianMesh, ConfigError, ConfigResult, Substrate};

// ── Document types ────────────────────────────────────────────────────────────

/// The raw configuration document, before validation.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentDocument {
    #[serde(default = "default_name")]
    pub name:               String,
    pub simulation_time:    f64,
    pub diffusion_timestep: f64,
    #[serde(default = "default_output_interval")]
    pub output_interval:    f64,
    pub mesh:               MeshSettings,
    pub substrates:         Vec<Substrate>,
    #[serde(default)]
    pub solver:             SolverSettings,
    #[serde(default)]
    pub output:             OutputSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshSettings {
    pub bounding_box: [f64; 6],
    pub voxel_size:   [f64; 3],
}

/// Where the solver computes relative to the host-visible buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySpace {
    /// The solver keeps its own allocation; transfers copy.
    #[default]
    Distinct,
    /// The allocation itself moves between host and solver; transfers are
    /// ownership swaps and the host buffer is empty while on the solver.
    Shared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub memory_space: MemorySpace,
    /// Reject NaN / infinite densities after every step.
    pub check_finite: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            memory_space: MemorySpace::default(),
            check_finite: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory snapshot files are written to.
    pub directory: PathBuf,
    /// `false` disables snapshot files (progress is still reported).
    pub enabled:   bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            enabled:   true,
        }
    }
}

fn default_name() -> String {
    "microenvironment".to_owned()
}

fn default_output_interval() -> f64 {
    100.0
}

// ── Public API ────────────────────────────────────────────────────────────────

impl Environment {
    /// Load and validate an environment from a JSON file.
    pub fn from_config_path(path: &Path) -> ConfigResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_config_reader(std::io::BufReader::new(file))
    }

    /// Like [`from_config_path`](Self::from_config_path) but accepts any
    /// `Read` source.
    pub fn from_config_reader<R: Read>(reader: R) -> ConfigResult<Self> {
        let doc: EnvironmentDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_config_str(json: &str) -> ConfigResult<Self> {
        let doc: EnvironmentDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Validate a parsed document and allocate the density buffer.
    pub fn from_document(doc: EnvironmentDocument) -> ConfigResult<Self> {
        let time = TimeConfig {
            simulation_time:    doc.simulation_time,
            diffusion_timestep: doc.diffusion_timestep,
            output_interval:    doc.output_interval,
        };
        time.validate()?;

        let mesh = CartesianMesh::new(doc.mesh.bounding_box, doc.mesh.voxel_size)?;

        if doc.substrates.is_empty() {
            return Err(ConfigError::Invalid("at least one substrate is required".to_owned()));
        }
        if doc.substrates.len() >= u16::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "too many substrates ({})",
                doc.substrates.len()
            )));
        }
        let mut seen = HashSet::new();
        for substrate in &doc.substrates {
            substrate.validate().map_err(ConfigError::Invalid)?;
            if !seen.insert(substrate.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate substrate name {:?}",
                    substrate.name
                )));
            }
        }

        let initial: Vec<f64> = doc.substrates.iter().map(|s| s.initial_condition).collect();
        let densities = HostBuffer::uniform(mesh.voxel_count(), &initial)?;

        Ok(Environment {
            name: doc.name,
            time,
            mesh,
            substrates: doc.substrates,
            solver: doc.solver,
            output: doc.output,
            densities,
        })
    }
}
