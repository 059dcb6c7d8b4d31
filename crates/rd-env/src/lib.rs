//! `rd-env` — the simulation environment for the `rd` reaction–diffusion
//! driver.
//!
//! An [`Environment`] owns everything one run needs apart from the solver and
//! the serializer: the time parameters, a [`CartesianMesh`], the substrate
//! table, solver/output settings, and the host-visible density buffer.
//!
//! # Density layout
//!
//! ```text
//! density[voxel * substrate_count + substrate]
//! ```
//!
//! All substrates of one voxel are contiguous, matching the order in which
//! snapshot rows are written.
//!
//! # Construction
//!
//! ```rust,ignore
//! use rd_env::Environment;
//!
//! let env = Environment::from_config_path(Path::new("settings.json"))?;
//! env.print_info(&mut std::io::stdout())?;
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod mesh;
pub mod substrate;

#[cfg(test)]
mod tests;

pub use config::{EnvironmentDocument, MemorySpace, OutputSettings, SolverSettings};
pub use environment::{Environment, HostBuffer, MAX_DENSITY_VALUES};
pub use error::{ConfigError, ConfigResult};
pub use mesh::CartesianMesh;
pub use substrate::Substrate;
