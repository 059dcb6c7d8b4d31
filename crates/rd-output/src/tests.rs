//! Integration tests for rd-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use rd_core::{SubstrateId, VoxelId};
    use rd_env::Environment;

    use crate::csv::{CsvSnapshotWriter, MANIFEST_FILE};
    use crate::writer::{NoopWriter, SnapshotWriter};
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// 2 × 2 × 1 mesh, two substrates.
    fn env() -> Environment {
        Environment::from_config_str(
            r#"{
                "simulation_time": 4.0,
                "diffusion_timestep": 1.0,
                "mesh": { "bounding_box": [0, 0, 0, 20, 20, 10], "voxel_size": [10, 10, 10] },
                "substrates": [
                    { "name": "oxygen", "diffusion_coefficient": 1.0, "initial_condition": 38.0 },
                    { "name": "glucose", "diffusion_coefficient": 1.0, "initial_condition": 5.5 }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn directory_and_manifest_created() {
        let dir = tmp();
        let out = dir.path().join("nested/output");
        let _w = CsvSnapshotWriter::new(&out).unwrap();
        assert!(out.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn snapshot_header_and_rows() {
        let dir = tmp();
        let mut e = env();
        e.densities.set_density(VoxelId(3), SubstrateId(1), 1.25);
        let mut w = CsvSnapshotWriter::new(dir.path()).unwrap();
        w.write_snapshot(0.0, &e).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("state_000000.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["voxel", "x", "y", "z", "oxygen", "glucose"]);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][1], "5");    // x centre of voxel 0
        assert_eq!(&rows[0][4], "38");   // oxygen
        assert_eq!(&rows[3][0], "3");
        assert_eq!(&rows[3][2], "15");   // y centre of voxel 3
        assert_eq!(&rows[3][5], "1.25"); // glucose override
    }

    #[test]
    fn manifest_indexes_snapshots_in_order() {
        let dir = tmp();
        let e = env();
        let mut w = CsvSnapshotWriter::new(dir.path()).unwrap();
        for t in [0.0, 100.0, 200.0, 250.0] {
            w.write_snapshot(t, &e).unwrap();
        }
        w.finish().unwrap();
        assert_eq!(w.count(), 4);
        assert!(dir.path().join("state_000003.csv").exists());

        let mut rdr = csv::Reader::from_path(dir.path().join(MANIFEST_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["index", "time", "file"]);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let times: Vec<_> = rows.iter().map(|r| r[1].to_owned()).collect();
        assert_eq!(times, ["0.0", "100.0", "200.0", "250.0"]);
        assert_eq!(&rows[2][2], "state_000002.csv");
    }

    #[test]
    fn non_resident_host_buffer_rejected() {
        let dir = tmp();
        let mut e = env();
        let _away = e.densities.take();
        let mut w = CsvSnapshotWriter::new(dir.path()).unwrap();
        let err = w.write_snapshot(3.0, &e).unwrap_err();
        assert!(matches!(err, OutputError::StaleState { expected: 8, got: 0, .. }), "got {err:?}");
        assert_eq!(w.count(), 0);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvSnapshotWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn noop_and_boxed_writers() {
        let e = env();
        let mut noop = NoopWriter;
        noop.write_snapshot(0.0, &e).unwrap();
        noop.finish().unwrap();

        let dir = tmp();
        let mut boxed: Box<dyn SnapshotWriter> =
            Box::new(CsvSnapshotWriter::new(dir.path()).unwrap());
        boxed.write_snapshot(1.0, &e).unwrap();
        boxed.finish().unwrap();
        assert!(dir.path().join("state_000000.csv").exists());
    }
}
