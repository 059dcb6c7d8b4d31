//! Dense index newtypes for the density buffer.
//!
//! A `SubstrateId` selects a column of the substrate table and a `VoxelId` a
//! cell of the mesh.  Both are plain offsets: `density[voxel * ns + substrate]`.

use std::fmt;

macro_rules! dense_index {
    ($(#[$attr:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Checked conversion from a buffer offset.
            pub fn from_index(index: usize) -> Option<Self> {
                <$inner>::try_from(index).ok().map(Self)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

dense_index! {
    /// Position in the environment's substrate table.  Stable for the
    /// lifetime of a run.
    SubstrateId(u16), "substrate"
}

dense_index! {
    /// Flat voxel offset, `(k * ny + j) * nx + i`.
    VoxelId(u32), "voxel"
}
