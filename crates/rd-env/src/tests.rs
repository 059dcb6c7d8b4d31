//! Unit tests for rd-env.

use crate::{ConfigError, Environment};

/// A 3 × 2 × 1 mesh with two substrates.
pub(crate) const SMALL_CONFIG: &str = r#"{
    "name": "small",
    "simulation_time": 10.0,
    "diffusion_timestep": 0.5,
    "output_interval": 2.0,
    "mesh": { "bounding_box": [0, 0, 0, 30, 20, 10], "voxel_size": [10, 10, 10] },
    "substrates": [
        { "name": "oxygen", "units": "mmHg", "diffusion_coefficient": 100.0,
          "decay_rate": 0.1, "initial_condition": 38.0 },
        { "name": "glucose", "diffusion_coefficient": 50.0, "initial_condition": 5.0 }
    ]
}"#;

#[cfg(test)]
mod mesh_tests {
    use rd_core::VoxelId;

    use crate::CartesianMesh;

    fn mesh() -> CartesianMesh {
        CartesianMesh::new([0.0, 0.0, 0.0, 30.0, 20.0, 10.0], [10.0, 10.0, 10.0]).unwrap()
    }

    #[test]
    fn shape_from_bounding_box() {
        let m = mesh();
        assert_eq!(m.shape, [3, 2, 1]);
        assert_eq!(m.voxel_count(), 6);
        assert_eq!(m.dimensions(), 2);
        assert_eq!(m.voxel_volume(), 1000.0);
    }

    #[test]
    fn voxel_id_and_coords_agree() {
        let m = mesh();
        for k in 0..1 {
            for j in 0..2 {
                for i in 0..3 {
                    let v = m.voxel_id(i, j, k);
                    assert_eq!(m.coords(v), [i, j, k]);
                }
            }
        }
        assert_eq!(m.voxel_id(2, 1, 0), VoxelId(5));
    }

    #[test]
    fn voxel_centers() {
        let m = mesh();
        assert_eq!(m.voxel_center(VoxelId(0)), [5.0, 5.0, 5.0]);
        assert_eq!(m.voxel_center(VoxelId(4)), [15.0, 15.0, 5.0]);
    }

    #[test]
    fn axis_strides() {
        let m = mesh();
        assert_eq!(m.axis_stride(0), 1);
        assert_eq!(m.axis_stride(1), 3);
        assert_eq!(m.axis_stride(2), 6);
    }

    #[test]
    fn rejects_fractional_extent() {
        let err = CartesianMesh::new([0.0, 0.0, 0.0, 25.0, 20.0, 10.0], [10.0, 10.0, 10.0]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_inverted_box_and_zero_voxel() {
        assert!(CartesianMesh::new([10.0, 0.0, 0.0, 0.0, 10.0, 10.0], [10.0; 3]).is_err());
        assert!(CartesianMesh::new([0.0, 0.0, 0.0, 10.0, 10.0, 10.0], [0.0, 10.0, 10.0]).is_err());
    }
}

#[cfg(test)]
mod buffer_tests {
    use rd_core::{SubstrateId, VoxelId};

    use crate::HostBuffer;

    #[test]
    fn uniform_layout_is_voxel_major() {
        let b = HostBuffer::uniform(3, &[1.0, 2.0]).unwrap();
        assert_eq!(b.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(b.voxel(VoxelId(1)), &[1.0, 2.0]);
        assert_eq!(b.density(VoxelId(2), SubstrateId(1)), 2.0);
        assert_eq!(b.total(SubstrateId(0)), 3.0);
        assert_eq!(b.total(SubstrateId(1)), 6.0);
    }

    #[test]
    fn take_and_replace_toggle_residency() {
        let mut b = HostBuffer::uniform(2, &[4.0]).unwrap();
        assert!(b.is_resident());
        let data = b.take();
        assert!(!b.is_resident());
        assert!(b.as_slice().is_empty());
        let old = b.replace(data);
        assert!(old.is_empty());
        assert!(b.is_resident());
        assert_eq!(b.as_slice(), &[4.0, 4.0]);
    }

    #[test]
    fn oversized_buffer_is_invalid_not_allocated() {
        let err = HostBuffer::uniform(crate::MAX_DENSITY_VALUES + 1, &[0.0]).unwrap_err();
        assert!(matches!(err, crate::ConfigError::Invalid(_)), "got {err:?}");

        let err = HostBuffer::uniform(usize::MAX / 2, &[0.0; 4]).unwrap_err();
        assert!(matches!(err, crate::ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn set_density_writes_one_slot() {
        let mut b = HostBuffer::uniform(2, &[0.0, 0.0]).unwrap();
        b.set_density(VoxelId(1), SubstrateId(0), 7.0);
        assert_eq!(b.as_slice(), &[0.0, 0.0, 7.0, 0.0]);
    }
}

#[cfg(test)]
mod config_tests {
    use std::io::Write;
    use std::path::Path;

    use rd_core::SubstrateId;

    use super::*;
    use crate::MemorySpace;

    #[test]
    fn loads_small_config() {
        let env = Environment::from_config_str(SMALL_CONFIG).unwrap();
        assert_eq!(env.name, "small");
        assert_eq!(env.simulation_time(), 10.0);
        assert_eq!(env.diffusion_timestep(), 0.5);
        assert_eq!(env.time.output_interval, 2.0);
        assert_eq!(env.mesh.shape, [3, 2, 1]);
        assert_eq!(env.substrate_count(), 2);
        assert_eq!(env.substrate_index("glucose"), Some(SubstrateId(1)));
        assert_eq!(env.substrate_index("lactate"), None);
        assert_eq!(env.densities.as_slice().len(), 12);
        assert_eq!(env.densities.total(SubstrateId(0)), 38.0 * 6.0);
    }

    #[test]
    fn defaults_applied() {
        let env = Environment::from_config_str(SMALL_CONFIG).unwrap();
        assert_eq!(env.substrates[1].units, "dimensionless");
        assert_eq!(env.substrates[1].decay_rate, 0.0);
        assert_eq!(env.solver.memory_space, MemorySpace::Distinct);
        assert!(env.solver.check_finite);
        assert!(env.output.enabled);
        assert_eq!(env.output.directory, Path::new("output"));
    }

    #[test]
    fn output_interval_defaults_to_100() {
        let json = SMALL_CONFIG.replace("\"output_interval\": 2.0,", "");
        let env = Environment::from_config_str(&json).unwrap();
        assert_eq!(env.time.output_interval, 100.0);
    }

    #[test]
    fn shared_memory_space_parses() {
        let json = SMALL_CONFIG.replace(
            "\"substrates\"",
            "\"solver\": { \"memory_space\": \"shared\" }, \"substrates\"",
        );
        let env = Environment::from_config_str(&json).unwrap();
        assert_eq!(env.solver.memory_space, MemorySpace::Shared);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL_CONFIG.as_bytes()).unwrap();
        let env = Environment::from_config_path(file.path()).unwrap();
        assert_eq!(env.substrate_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Environment::from_config_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Environment::from_config_str("{ \"simulation_time\": ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn unknown_field_rejected() {
        let json = SMALL_CONFIG.replace("\"name\": \"small\",", "\"nmae\": \"small\",");
        let err = Environment::from_config_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn timestep_longer_than_run_rejected() {
        let json = SMALL_CONFIG.replace("\"diffusion_timestep\": 0.5", "\"diffusion_timestep\": 50.0");
        let err = Environment::from_config_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Core(_)), "got {err:?}");
    }

    #[test]
    fn duplicate_substrate_rejected() {
        let json = SMALL_CONFIG.replace("\"name\": \"glucose\"", "\"name\": \"oxygen\"");
        let err = Environment::from_config_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn negative_diffusion_rejected() {
        let json = SMALL_CONFIG.replace("\"diffusion_coefficient\": 50.0", "\"diffusion_coefficient\": -1.0");
        assert!(matches!(
            Environment::from_config_str(&json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn empty_substrate_list_rejected() {
        let json = r#"{
            "simulation_time": 1.0, "diffusion_timestep": 0.1,
            "mesh": { "bounding_box": [0, 0, 0, 10, 10, 10], "voxel_size": [10, 10, 10] },
            "substrates": []
        }"#;
        assert!(matches!(
            Environment::from_config_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn print_info_lists_substrates() {
        let env = Environment::from_config_str(SMALL_CONFIG).unwrap();
        let mut out = Vec::new();
        env.print_info(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("3 x 2 x 1 = 6 voxels"), "{text}");
        assert!(text.contains("oxygen (mmHg)"), "{text}");
        assert!(text.contains("glucose"), "{text}");
    }

    #[test]
    fn substrate_lookup_by_id() {
        let env = Environment::from_config_str(SMALL_CONFIG).unwrap();
        assert_eq!(env.substrate(SubstrateId(0)).unwrap().name, "oxygen");
        assert!(env.substrate(SubstrateId(9)).is_err());
        assert_eq!(env.substrate_ids().count(), 2);
    }

    #[test]
    fn huge_mesh_is_config_error() {
        // 2000 x 2000 x 1000 unit voxels fits a VoxelId; with 8 substrates
        // the density buffer would need 256 GB.
        let substrates: Vec<String> = (0..8)
            .map(|i| format!(r#"{{ "name": "s{i}", "diffusion_coefficient": 1.0 }}"#))
            .collect();
        let json = format!(
            r#"{{
                "simulation_time": 1.0, "diffusion_timestep": 0.1,
                "mesh": {{ "bounding_box": [0, 0, 0, 2000, 2000, 1000], "voxel_size": [1, 1, 1] }},
                "substrates": [{}]
            }}"#,
            substrates.join(",")
        );
        let err = Environment::from_config_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
        assert!(err.to_string().contains("exceeds the limit"), "{err}");
    }
}
