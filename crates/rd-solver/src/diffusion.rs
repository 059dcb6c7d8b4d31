//! `LodSolver` — the reference [`Solver`] implementation.

use rd_core::{SubstrateId, VoxelId};
use rd_env::{Environment, MemorySpace, SolverSettings};

use crate::device::DeviceBuffer;
use crate::lod::LodKernel;
use crate::{Operation, ProtocolGuard, Solver, SolverError, SolverPhase, SolverResult};

/// Implicit LOD diffusion–decay solver computing in its own [`DeviceBuffer`].
///
/// The memory space decides what the transfers do: `Distinct` copies the
/// densities both ways, `Shared` moves the host allocation into the solver
/// and back without copying.
#[derive(Debug)]
pub struct LodSolver {
    guard:        ProtocolGuard,
    settings:     SolverSettings,
    kernel:       Option<LodKernel>,
    device:       DeviceBuffer,
    timestep:     f64,
    /// Simulated time of the state held by the solver.
    time:         f64,
    /// Voxel count of the bound environment, used to reject a different one.
    voxel_count:  usize,
}

impl LodSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            guard:       ProtocolGuard::new(),
            settings,
            kernel:      None,
            device:      DeviceBuffer::new(0, settings.memory_space),
            timestep:    0.0,
            time:        0.0,
            voxel_count: 0,
        }
    }

    /// Densities currently held in solver memory.
    pub fn device_densities(&self) -> &[f64] {
        self.device.as_slice()
    }

    fn check_bound(&self, env: &Environment) -> SolverResult<()> {
        if env.mesh.voxel_count() != self.voxel_count {
            return Err(SolverError::ShapeMismatch {
                expected: self.voxel_count,
                got:      env.mesh.voxel_count(),
                what:     "environment mesh",
            });
        }
        Ok(())
    }

    fn check_finite(&self, substrate_count: usize) -> SolverResult<()> {
        match self.device.as_slice().iter().position(|v| !v.is_finite()) {
            None => Ok(()),
            Some(i) => Err(SolverError::NonFinite {
                voxel:     VoxelId((i / substrate_count) as u32),
                substrate: SubstrateId((i % substrate_count) as u16),
                value:     self.device.as_slice()[i],
                time:      self.time,
            }),
        }
    }
}

impl Solver for LodSolver {
    fn name(&self) -> &str {
        match self.settings.memory_space {
            MemorySpace::Distinct => "lod-implicit (distinct memory)",
            MemorySpace::Shared   => "lod-implicit (shared memory)",
        }
    }

    fn phase(&self) -> SolverPhase {
        self.guard.phase()
    }

    fn initialize(&mut self, env: &Environment) -> SolverResult<()> {
        self.guard.check(Operation::Initialize)?;
        let len = env.densities.expected_len();
        self.kernel = Some(LodKernel::new(env));
        self.device = DeviceBuffer::new(len, self.settings.memory_space);
        self.timestep = env.diffusion_timestep();
        self.time = 0.0;
        self.voxel_count = env.mesh.voxel_count();
        self.guard.commit(Operation::Initialize);
        Ok(())
    }

    fn transfer_to_device(&mut self, env: &mut Environment) -> SolverResult<()> {
        self.guard.check(Operation::TransferToDevice)?;
        self.check_bound(env)?;
        self.device.upload(&mut env.densities)?;
        self.guard.commit(Operation::TransferToDevice);
        Ok(())
    }

    fn step(&mut self) -> SolverResult<()> {
        self.guard.check(Operation::Step)?;
        let Some(kernel) = self.kernel.as_ref() else {
            return Err(SolverError::Protocol {
                op:    Operation::Step,
                phase: SolverPhase::Uninitialized,
            });
        };
        kernel.apply(self.device.as_mut_slice());
        self.time += self.timestep;
        if self.settings.check_finite {
            self.check_finite(kernel.substrate_count)?;
        }
        self.guard.commit(Operation::Step);
        Ok(())
    }

    fn transfer_to_host(&mut self, env: &mut Environment) -> SolverResult<()> {
        self.guard.check(Operation::TransferToHost)?;
        self.check_bound(env)?;
        self.device.download(&mut env.densities)?;
        self.guard.commit(Operation::TransferToHost);
        Ok(())
    }
}

/// Build the solver described by `settings`.
pub fn build_solver(settings: &SolverSettings) -> Box<dyn Solver> {
    Box::new(LodSolver::new(*settings))
}
