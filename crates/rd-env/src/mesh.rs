//! Uniform Cartesian voxel mesh.
//!
//! The mesh covers an axis-aligned bounding box split into voxels of a fixed
//! size per axis.  Voxels are numbered x-fastest:
//!
//! ```text
//! VoxelId = (k * ny + j) * nx + i
//! ```
//!
//! A 2-D mesh is a 3-D mesh with one voxel along z (and likewise for 1-D).

use rd_core::VoxelId;

use crate::{ConfigError, ConfigResult};

/// Relative tolerance when checking that an extent is a whole number of voxels.
const SHAPE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct CartesianMesh {
    /// `[x_min, y_min, z_min, x_max, y_max, z_max]`.
    pub bounding_box: [f64; 6],
    /// Voxel edge length per axis.
    pub voxel_size: [f64; 3],
    /// Voxel count per axis, `[nx, ny, nz]`.
    pub shape: [usize; 3],
}

impl CartesianMesh {
    /// Build a mesh, checking that every extent is a positive whole multiple
    /// of its voxel size.
    pub fn new(bounding_box: [f64; 6], voxel_size: [f64; 3]) -> ConfigResult<Self> {
        let mut shape = [0usize; 3];
        for axis in 0..3 {
            let size = voxel_size[axis];
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "voxel size along {} must be positive, got {size}",
                    axis_name(axis)
                )));
            }
            let extent = bounding_box[axis + 3] - bounding_box[axis];
            if !(extent.is_finite() && extent > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "bounding box extent along {} must be positive, got {extent}",
                    axis_name(axis)
                )));
            }
            let cells = extent / size;
            let rounded = cells.round();
            if rounded < 1.0 || (cells - rounded).abs() > SHAPE_TOLERANCE * cells.max(1.0) {
                return Err(ConfigError::Invalid(format!(
                    "extent {extent} along {} is not a whole multiple of voxel size {size}",
                    axis_name(axis)
                )));
            }
            shape[axis] = rounded as usize;
        }

        let total = shape[0]
            .checked_mul(shape[1])
            .and_then(|n| n.checked_mul(shape[2]))
            .filter(|&n| n < u32::MAX as usize)
            .ok_or_else(|| ConfigError::Invalid(format!("mesh {shape:?} has too many voxels")))?;
        debug_assert!(total > 0);

        Ok(Self { bounding_box, voxel_size, shape })
    }

    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.shape[0] * self.shape[1] * self.shape[2]
    }

    /// Number of axes with more than one voxel.
    pub fn dimensions(&self) -> usize {
        self.shape.iter().filter(|&&n| n > 1).count()
    }

    /// Distance between consecutive voxels along `axis`, counted in voxels.
    #[inline]
    pub fn axis_stride(&self, axis: usize) -> usize {
        match axis {
            0 => 1,
            1 => self.shape[0],
            _ => self.shape[0] * self.shape[1],
        }
    }

    #[inline]
    pub fn voxel_id(&self, i: usize, j: usize, k: usize) -> VoxelId {
        VoxelId(((k * self.shape[1] + j) * self.shape[0] + i) as u32)
    }

    /// Grid coordinates `[i, j, k]` of `voxel`.
    #[inline]
    pub fn coords(&self, voxel: VoxelId) -> [usize; 3] {
        let v = voxel.index();
        let [nx, ny, _] = self.shape;
        [v % nx, (v / nx) % ny, v / (nx * ny)]
    }

    /// Physical centre of `voxel`.
    pub fn voxel_center(&self, voxel: VoxelId) -> [f64; 3] {
        let c = self.coords(voxel);
        std::array::from_fn(|axis| {
            self.bounding_box[axis] + (c[axis] as f64 + 0.5) * self.voxel_size[axis]
        })
    }

    pub fn voxel_volume(&self) -> f64 {
        self.voxel_size.iter().product()
    }
}

pub(crate) fn axis_name(axis: usize) -> &'static str {
    ["x", "y", "z"][axis]
}
