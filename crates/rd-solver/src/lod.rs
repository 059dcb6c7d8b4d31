//! Locally one-dimensional (LOD) implicit diffusion–decay kernel.
//!
//! Each step solves `∂u/∂t = D∇²u − λu` as three implicit 1-D problems, one
//! per axis.  Along an axis of `n` voxels with spacing `h`, `r = DΔt/h²`:
//!
//! ```text
//! −r·u[i−1] + (1 + Δtλ/3 + 2r)·u[i] − r·u[i+1] = u_old[i]
//! ```
//!
//! End rows drop the missing neighbour (zero-flux boundary), so with `λ = 0`
//! every row and column sums to one and total mass is conserved.  The
//! tridiagonal systems are solved with the Thomas algorithm; the
//! forward-elimination factors depend only on `n`, `r`, and `λ`, so they are
//! computed once per (substrate, axis) when the solver is initialized.

use rd_env::Environment;

/// Precomputed Thomas factors for one (substrate, axis) pair.
#[derive(Clone, Debug)]
pub struct AxisSystem {
    /// Voxels along the axis.
    pub n:      usize,
    /// Distance between consecutive line elements in the density buffer.
    pub stride: usize,
    /// Coupling `r = DΔt/h²`.
    pub r:      f64,
    /// Eliminated diagonal, `b[i] + r·c'[i−1]`.
    denom:      Vec<f64>,
    /// Eliminated super-diagonal, `−r / denom[i]`.
    c_prime:    Vec<f64>,
}

impl AxisSystem {
    pub fn new(n: usize, stride: usize, r: f64, decay_term: f64) -> Self {
        let base = 1.0 + decay_term;
        let mut denom = Vec::with_capacity(n);
        let mut c_prime = Vec::with_capacity(n);
        for i in 0..n {
            let neighbours = (i > 0) as u8 + (i + 1 < n) as u8;
            let b = base + r * f64::from(neighbours);
            let d = if i == 0 { b } else { b + r * c_prime[i - 1] };
            denom.push(d);
            c_prime.push(-r / d);
        }
        Self { n, stride, r, denom, c_prime }
    }

    /// Solve one line in place.  `data[start + i * stride]` is element `i`.
    pub fn solve_strided(&self, data: &mut [f64], start: usize) {
        let s = self.stride;
        data[start] /= self.denom[0];
        for i in 1..self.n {
            let prev = data[start + (i - 1) * s];
            let cur = &mut data[start + i * s];
            *cur = (*cur + self.r * prev) / self.denom[i];
        }
        for i in (0..self.n.saturating_sub(1)).rev() {
            let next = data[start + (i + 1) * s];
            data[start + i * s] -= self.c_prime[i] * next;
        }
    }

    /// Solve one contiguous line in place.
    pub fn solve(&self, line: &mut [f64]) {
        debug_assert_eq!(line.len(), self.n);
        line[0] /= self.denom[0];
        for i in 1..self.n {
            line[i] = (line[i] + self.r * line[i - 1]) / self.denom[i];
        }
        for i in (0..self.n.saturating_sub(1)).rev() {
            line[i] -= self.c_prime[i] * line[i + 1];
        }
    }
}

/// All axis systems plus the line start offsets of every sweep.
#[derive(Clone, Debug)]
pub struct LodKernel {
    /// `systems[substrate][axis]`.
    pub systems:     Vec<[AxisSystem; 3]>,
    /// First voxel of every line along each axis (coordinate 0 on that axis).
    pub line_starts: [Vec<usize>; 3],
    pub substrate_count: usize,
}

impl LodKernel {
    pub fn new(env: &Environment) -> Self {
        let mesh = &env.mesh;
        let dt = env.diffusion_timestep();
        let ns = env.substrate_count();

        let systems = env
            .substrates
            .iter()
            .map(|s| {
                let decay_term = dt * s.decay_rate / 3.0;
                std::array::from_fn(|axis| {
                    let h = mesh.voxel_size[axis];
                    let r = s.diffusion_coefficient * dt / (h * h);
                    AxisSystem::new(mesh.shape[axis], mesh.axis_stride(axis) * ns, r, decay_term)
                })
            })
            .collect();

        let [nx, ny, nz] = mesh.shape;
        let line_starts = std::array::from_fn(|axis| {
            let mut starts = Vec::new();
            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        if [i, j, k][axis] == 0 {
                            starts.push(mesh.voxel_id(i, j, k).index());
                        }
                    }
                }
            }
            starts
        });

        Self { systems, line_starts, substrate_count: ns }
    }

    /// Advance `data` by one timestep: x, then y, then z sweep.
    pub fn apply(&self, data: &mut [f64]) {
        for axis in 0..3 {
            for (s, systems) in self.systems.iter().enumerate() {
                self.sweep(data, axis, s, &systems[axis]);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sweep(&self, data: &mut [f64], axis: usize, substrate: usize, system: &AxisSystem) {
        for &voxel in &self.line_starts[axis] {
            system.solve_strided(data, voxel * self.substrate_count + substrate);
        }
    }

    /// Lines are gathered and solved on Rayon's pool, then scattered back in
    /// order on the calling thread.
    #[cfg(feature = "parallel")]
    fn sweep(&self, data: &mut [f64], axis: usize, substrate: usize, system: &AxisSystem) {
        use rayon::prelude::*;

        let ns = self.substrate_count;
        let source: &[f64] = data;
        let solved: Vec<Vec<f64>> = self.line_starts[axis]
            .par_iter()
            .map(|&voxel| {
                let start = voxel * ns + substrate;
                let mut line: Vec<f64> =
                    (0..system.n).map(|i| source[start + i * system.stride]).collect();
                system.solve(&mut line);
                line
            })
            .collect();

        for (&voxel, line) in self.line_starts[axis].iter().zip(solved) {
            let start = voxel * ns + substrate;
            for (i, value) in line.into_iter().enumerate() {
                data[start + i * system.stride] = value;
            }
        }
    }
}
