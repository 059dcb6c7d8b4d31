//! Unit tests for rd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SubstrateId, VoxelId};

    #[test]
    fn index_roundtrip() {
        let id = VoxelId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VoxelId::from_index(42), Some(id));
    }

    #[test]
    fn substrate_id_overflow_rejected() {
        assert_eq!(SubstrateId::from_index(70_000), None);
        assert_eq!(SubstrateId::from_index(65_535), Some(SubstrateId(u16::MAX)));
    }

    #[test]
    fn display() {
        assert_eq!(SubstrateId(1).to_string(), "substrate 1");
        assert_eq!(VoxelId(12).to_string(), "voxel 12");
    }
}

#[cfg(test)]
mod time {
    use crate::{OutputSchedule, SimClock, TIME_EPSILON, TimeConfig};

    fn config(total: f64, dt: f64, interval: f64) -> TimeConfig {
        TimeConfig {
            simulation_time:    total,
            diffusion_timestep: dt,
            output_interval:    interval,
        }
    }

    fn run_to_end(total: f64, dt: f64) -> u64 {
        let mut clock = SimClock::new(dt);
        while !clock.is_finished(total) {
            clock.advance();
        }
        clock.iterations
    }

    #[test]
    fn clock_advances_by_timestep() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.current_time, 0.0);
        assert_eq!(clock.advance(), 0.5);
        assert_eq!(clock.advance(), 1.0);
        assert_eq!(clock.iterations, 2);
    }

    #[test]
    fn clock_finishes_within_epsilon() {
        let mut clock = SimClock::new(1.0);
        clock.current_time = 250.0 - TIME_EPSILON / 2.0;
        assert!(clock.is_finished(250.0));
        clock.current_time = 249.999;
        assert!(!clock.is_finished(250.0));
    }

    #[test]
    fn exact_iteration_count() {
        assert_eq!(run_to_end(250.0, 1.0), 250);
        assert_eq!(run_to_end(10.0, 0.25), 40);
        // Partial last step: ceil(10 / 3) = 4.
        assert_eq!(run_to_end(10.0, 3.0), 4);
    }

    #[test]
    fn schedule_starts_at_interval() {
        let s = OutputSchedule::new(100.0);
        assert_eq!(s.next_output_time, 100.0);
        assert!(!s.is_due(99.0));
        assert!(s.is_due(100.0));
        assert!(s.is_due(100.0 - TIME_EPSILON / 2.0));
    }

    #[test]
    fn schedule_poll_advances_once() {
        let mut s = OutputSchedule::new(100.0);
        assert!(!s.poll(50.0));
        assert_eq!(s.next_output_time, 100.0);
        assert!(s.poll(100.0));
        assert_eq!(s.next_output_time, 200.0);
        assert!(!s.poll(100.0));
    }

    #[test]
    fn schedule_does_not_catch_up_on_large_steps() {
        // One step of 350 crosses three boundaries but advances only one.
        let mut s = OutputSchedule::new(100.0);
        assert!(s.poll(350.0));
        assert_eq!(s.next_output_time, 200.0);
        // The lagging boundary fires again on the next step.
        assert!(s.poll(700.0));
        assert_eq!(s.next_output_time, 300.0);
    }

    #[test]
    fn validate_accepts_sane_config() {
        assert!(config(250.0, 1.0, 100.0).validate().is_ok());
        assert!(config(1.0, 1.0, 100.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(config(0.0, 1.0, 100.0).validate().is_err());
        assert!(config(10.0, -1.0, 100.0).validate().is_err());
        assert!(config(10.0, 1.0, f64::NAN).validate().is_err());
        assert!(config(10.0, 20.0, 100.0).validate().is_err());
    }

    #[test]
    fn config_builds_clock_and_schedule() {
        let c = config(250.0, 2.0, 50.0);
        assert_eq!(c.make_clock().timestep, 2.0);
        assert_eq!(c.make_schedule().next_output_time, 50.0);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::SimClock;

    proptest! {
        /// The loop takes `ceil(T / dt)` steps.  When `T / dt` sits on an
        /// integer, accumulated rounding may shift the count by one.
        #[test]
        fn iteration_count_is_ceil(total in 0.5f64..500.0, dt in 0.01f64..5.0) {
            prop_assume!(dt <= total);
            let mut clock = SimClock::new(dt);
            while !clock.is_finished(total) {
                clock.advance();
            }
            let exact = total / dt;
            if (exact - exact.round()).abs() > 1e-5 {
                prop_assert_eq!(clock.iterations, exact.ceil() as u64);
            } else {
                prop_assert!(clock.iterations.abs_diff(exact.round() as u64) <= 1);
            }
        }
    }
}
