//! `Environment` and its host-visible density buffer.

use std::io::{self, Write};

use rd_core::{RdError, RdResult, SubstrateId, TimeConfig, VoxelId};

use crate::mesh::axis_name;
use crate::{CartesianMesh, ConfigError, ConfigResult, OutputSettings, SolverSettings, Substrate};

/// Largest density buffer an environment may allocate (`voxels × substrates`).
///
/// 2³⁰ `f64` values, 8 GiB.  Larger meshes are rejected as invalid
/// configuration rather than left to the allocator.
pub const MAX_DENSITY_VALUES: usize = 1 << 30;

// ── HostBuffer ────────────────────────────────────────────────────────────────

/// Host-visible substrate densities, `data[voxel * substrate_count + s]`.
///
/// The allocation can be moved out to a solver with [`take`](Self::take) and
/// handed back with [`replace`](Self::replace).  While it is away the buffer
/// is empty and [`is_resident`](Self::is_resident) returns `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct HostBuffer {
    data:            Vec<f64>,
    voxel_count:     usize,
    substrate_count: usize,
}

impl HostBuffer {
    /// Every voxel starts with `initial[s]` for substrate `s`.
    ///
    /// Fails with [`ConfigError::Invalid`] when the buffer would exceed
    /// [`MAX_DENSITY_VALUES`] or the allocation cannot be reserved.
    pub fn uniform(voxel_count: usize, initial: &[f64]) -> ConfigResult<Self> {
        let len = voxel_count
            .checked_mul(initial.len())
            .filter(|&n| n <= MAX_DENSITY_VALUES)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{voxel_count} voxels x {} substrates exceeds the limit of {MAX_DENSITY_VALUES} densities",
                    initial.len()
                ))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            ConfigError::Invalid(format!("cannot allocate {len} densities: {e}"))
        })?;
        for _ in 0..voxel_count {
            data.extend_from_slice(initial);
        }
        Ok(Self {
            data,
            voxel_count,
            substrate_count: initial.len(),
        })
    }

    /// Length the buffer has when it holds the full state.
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.voxel_count * self.substrate_count
    }

    #[inline]
    pub fn is_resident(&self) -> bool {
        self.data.len() == self.expected_len()
    }

    #[inline]
    pub fn substrate_count(&self) -> usize {
        self.substrate_count
    }

    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// All substrate densities of one voxel.
    #[inline]
    pub fn voxel(&self, voxel: VoxelId) -> &[f64] {
        let start = voxel.index() * self.substrate_count;
        &self.data[start..start + self.substrate_count]
    }

    #[inline]
    pub fn density(&self, voxel: VoxelId, substrate: SubstrateId) -> f64 {
        self.data[voxel.index() * self.substrate_count + substrate.index()]
    }

    #[inline]
    pub fn set_density(&mut self, voxel: VoxelId, substrate: SubstrateId, value: f64) {
        self.data[voxel.index() * self.substrate_count + substrate.index()] = value;
    }

    /// Sum of one substrate over all voxels.
    pub fn total(&self, substrate: SubstrateId) -> f64 {
        self.data
            .iter()
            .skip(substrate.index())
            .step_by(self.substrate_count.max(1))
            .sum()
    }

    /// Move the allocation out, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.data)
    }

    /// Install `data` as the buffer contents and return the previous contents.
    pub fn replace(&mut self, data: Vec<f64>) -> Vec<f64> {
        std::mem::replace(&mut self.data, data)
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Configuration and state for one simulation run.
///
/// Built by [`Environment::from_config_path`] (or one of its siblings).  The
/// driver owns it exclusively for the run; the solver mutates `densities`
/// only through its transfer calls and the serializer only reads it.
#[derive(Clone, Debug)]
pub struct Environment {
    pub name:       String,
    pub time:       TimeConfig,
    pub mesh:       CartesianMesh,
    pub substrates: Vec<Substrate>,
    pub solver:     SolverSettings,
    pub output:     OutputSettings,
    pub densities:  HostBuffer,
}

impl Environment {
    #[inline]
    pub fn simulation_time(&self) -> f64 {
        self.time.simulation_time
    }

    #[inline]
    pub fn diffusion_timestep(&self) -> f64 {
        self.time.diffusion_timestep
    }

    #[inline]
    pub fn substrate_count(&self) -> usize {
        self.substrates.len()
    }

    /// Iterator over every substrate id in table order.
    pub fn substrate_ids(&self) -> impl Iterator<Item = SubstrateId> + '_ {
        (0..self.substrates.len()).map(|i| SubstrateId(i as u16))
    }

    /// Look up a substrate by name.
    pub fn substrate_index(&self, name: &str) -> Option<SubstrateId> {
        self.substrates
            .iter()
            .position(|s| s.name == name)
            .map(|i| SubstrateId(i as u16))
    }

    pub fn substrate(&self, id: SubstrateId) -> RdResult<&Substrate> {
        self.substrates
            .get(id.index())
            .ok_or(RdError::SubstrateNotFound(id))
    }

    /// Write a human-readable summary of the mesh and substrates.
    pub fn print_info<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let [nx, ny, nz] = self.mesh.shape;
        writeln!(out, "Microenvironment summary: {}", self.name)?;
        writeln!(
            out,
            "  Mesh: {}-D, {nx} x {ny} x {nz} = {} voxels",
            self.mesh.dimensions(),
            self.mesh.voxel_count()
        )?;
        for axis in 0..3 {
            writeln!(
                out,
                "    {}: [{}, {}], voxel size {}",
                axis_name(axis),
                self.mesh.bounding_box[axis],
                self.mesh.bounding_box[axis + 3],
                self.mesh.voxel_size[axis]
            )?;
        }
        writeln!(out, "  Substrates: {}", self.substrates.len())?;
        for (i, s) in self.substrates.iter().enumerate() {
            writeln!(
                out,
                "    {i}: {} ({}), D = {}, decay = {}, initial = {}",
                s.name, s.units, s.diffusion_coefficient, s.decay_rate, s.initial_condition
            )?;
        }
        writeln!(
            out,
            "  Time: total {}, timestep {}, output every {}",
            self.time.simulation_time, self.time.diffusion_timestep, self.time.output_interval
        )?;
        Ok(())
    }
}
