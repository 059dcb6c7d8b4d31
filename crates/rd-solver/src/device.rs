//! Solver-owned density storage and the two transfer strategies.

use rd_env::{HostBuffer, MemorySpace};

use crate::{SolverError, SolverResult};

/// Densities in the solver's memory space, same layout as [`HostBuffer`].
#[derive(Debug, Default)]
pub struct DeviceBuffer {
    data:     Vec<f64>,
    expected: usize,
    mode:     MemorySpace,
}

impl DeviceBuffer {
    /// Buffer for `len` densities.  A `Distinct` buffer allocates up front; a
    /// `Shared` buffer borrows the host allocation on upload.
    pub fn new(len: usize, mode: MemorySpace) -> Self {
        let data = match mode {
            MemorySpace::Distinct => vec![0.0; len],
            MemorySpace::Shared   => Vec::new(),
        };
        Self { data, expected: len, mode }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Host → solver.
    pub fn upload(&mut self, host: &mut HostBuffer) -> SolverResult<()> {
        self.check_len(host.as_slice().len(), "host buffer")?;
        match self.mode {
            MemorySpace::Distinct => self.data.copy_from_slice(host.as_slice()),
            MemorySpace::Shared   => self.data = host.take(),
        }
        Ok(())
    }

    /// Solver → host.
    pub fn download(&mut self, host: &mut HostBuffer) -> SolverResult<()> {
        self.check_len(self.data.len(), "device buffer")?;
        match self.mode {
            MemorySpace::Distinct => {
                if host.as_slice().len() != self.expected {
                    return Err(SolverError::ShapeMismatch {
                        expected: self.expected,
                        got:      host.as_slice().len(),
                        what:     "host buffer",
                    });
                }
                host.as_mut_slice().copy_from_slice(&self.data);
            }
            MemorySpace::Shared => {
                host.replace(std::mem::take(&mut self.data));
            }
        }
        Ok(())
    }

    fn check_len(&self, got: usize, what: &'static str) -> SolverResult<()> {
        if got == self.expected {
            Ok(())
        } else {
            Err(SolverError::ShapeMismatch { expected: self.expected, got, what })
        }
    }
}
