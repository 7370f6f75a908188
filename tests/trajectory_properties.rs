//! Physical properties of generated trajectories.
//!
//! Each test states a property the engine must hold and tries to falsify
//! it through the public API only.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use mechsim::prelude::*;
use mechsim::scenarios::{BlockContact, StackedBlockConfig, StackedBlockModel};

fn params(pairs: &[(&str, f64)]) -> ScenarioParameters {
    ScenarioParameters::from_pairs(pairs.iter().copied()).unwrap()
}

fn generate(pairs: &[(&str, f64)]) -> Trajectory {
    generate_trajectory(&params(pairs)).unwrap()
}

/// Horizontal distance where the path crosses y = 0, interpolated between
/// the last two samples.
fn landing_x(trajectory: &Trajectory) -> f64 {
    let samples = trajectory.samples();
    let (a, b) = (&samples[samples.len() - 2], &samples[samples.len() - 1]);
    let t = a.position_y / (a.position_y - b.position_y);
    a.position_x + t * (b.position_x - a.position_x)
}

/// One scenario per motion model.
fn one_of_each() -> Vec<ScenarioParameters> {
    vec![
        params(&[("velocity", 20.0), ("angle", 45.0)]),
        params(&[("length", 1.0), ("initialAngle", 40.0)]).with_object_type("pendulum"),
        params(&[("length", 1.5), ("coneAngle", 25.0)]).with_object_type("pendulum"),
        params(&[("inclineAngle", 35.0), ("friction", 0.2)]),
        params(&[("force", 12.0), ("friction", 0.3), ("mass", 2.0)]),
        params(&[("inclineAngle", 30.0), ("mass", 1.0), ("mass2", 2.0), ("friction", 0.1)]),
        params(&[("mass", 2.0), ("mass2", 3.0), ("force", 15.5), ("friction", 0.3)]),
    ]
}

// ============================================================================
// Projectile
// ============================================================================

#[test]
fn projectile_complementary_angles_have_equal_range() {
    let low = generate(&[("velocity", 20.0), ("angle", 30.0), ("gravity", 9.8)]);
    let high = generate(&[("velocity", 20.0), ("angle", 60.0), ("gravity", 9.8)]);

    assert_eq!(low.termination(), Termination::Floor);
    assert_eq!(high.termination(), Termination::Floor);
    assert_abs_diff_eq!(landing_x(&low), landing_x(&high), epsilon = 0.5);
    // v² sin 2θ / g ≈ 35.35 m
    assert_abs_diff_eq!(landing_x(&low), 35.35, epsilon = 0.5);
}

#[test]
fn projectile_vertical_throw_time_of_flight() {
    let trajectory = generate(&[("velocity", 10.0), ("angle", 90.0)]);
    let expected = 2.0 * 10.0 / 9.8;
    assert_abs_diff_eq!(trajectory.duration(), expected, epsilon = 0.02);
}

#[test]
fn projectile_free_fall_accelerates_at_g() {
    let trajectory = generate(&[("velocity", 0.0), ("angle", 270.0)]);
    let sample = &trajectory.samples()[50];
    assert_relative_eq!(sample.velocity_y, -9.8 * 1.0, max_relative = 1e-9);
    assert_abs_diff_eq!(sample.velocity_x, 0.0, epsilon = 1e-12);
}

// ============================================================================
// Pendulums
// ============================================================================

#[test]
fn pendulum_energy_conserved_over_one_period() {
    let pendulum = generate_trajectory(
        &params(&[("length", 1.0), ("initialAngle", 30.0), ("gravity", 9.8), ("mass", 1.0)])
            .with_object_type("pendulum"),
    )
    .unwrap();
    assert_eq!(pendulum.kind(), MotionModelKind::Pendulum);

    let period = 2.0 * std::f64::consts::PI * (1.0f64 / 9.8).sqrt();
    let initial = pendulum.first().unwrap().total_energy;
    for sample in pendulum.iter().take_while(|s| s.time <= period) {
        assert_relative_eq!(sample.total_energy, initial, max_relative = 0.01);
    }
}

#[test]
fn pendulum_oscillates_about_the_vertical() {
    let trajectory =
        generate_trajectory(&params(&[("initialAngle", 20.0)]).with_object_type("pendulum")).unwrap();
    let max_x = trajectory.iter().map(|s| s.position_x).fold(f64::MIN, f64::max);
    let min_x = trajectory.iter().map(|s| s.position_x).fold(f64::MAX, f64::min);
    assert_relative_eq!(max_x, -min_x, max_relative = 0.02);
    assert_relative_eq!(max_x, 20f64.to_radians().sin(), max_relative = 0.01);
}

#[test]
fn conical_pendulum_holds_its_radius() {
    let trajectory = generate_trajectory(
        &params(&[("length", 2.0), ("coneAngle", 30.0)]).with_object_type("pendulum"),
    )
    .unwrap();
    assert_eq!(trajectory.kind(), MotionModelKind::ConicalPendulum);
    for sample in &trajectory {
        let r = sample.position_x.hypot(sample.position_y);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-9);
    }
}

// ============================================================================
// Friction
// ============================================================================

#[test]
fn incline_static_lock_holds_for_full_duration() {
    let trajectory = generate(&[("inclineAngle", 15.0), ("friction", 0.3)]);
    assert_eq!(trajectory.kind(), MotionModelKind::InclineFriction);
    assert_eq!(trajectory.len(), 501);
    for sample in &trajectory {
        assert_eq!(sample.speed(), 0.0);
    }
}

#[test]
fn incline_sliding_acceleration() {
    let trajectory = generate(&[("inclineAngle", 40.0), ("friction", 0.25)]);
    let theta = 40f64.to_radians();
    let expected = 9.8 * (theta.sin() - 0.25 * theta.cos());
    let sample = &trajectory.samples()[20];
    assert_relative_eq!(
        sample.acceleration_x.hypot(sample.acceleration_y),
        expected,
        max_relative = 1e-9
    );
}

#[test]
fn horizontal_push_below_static_limit_does_nothing() {
    let trajectory = generate(&[("force", 3.0), ("friction", 0.3)]);
    assert_eq!(trajectory.kind(), MotionModelKind::HorizontalFriction);
    assert!(trajectory.iter().all(|s| s.position_x == 0.0));
}

#[test]
fn pulley_equilibrium_has_zero_acceleration() {
    let trajectory = generate(&[("inclineAngle", 30.0), ("mass", 2.0), ("mass2", 1.0), ("friction", 0.0)]);
    assert_eq!(trajectory.kind(), MotionModelKind::InclinePulley);
    for sample in &trajectory {
        assert_abs_diff_eq!(sample.acceleration_x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sample.acceleration_y, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn stacked_blocks_slip_boundary() {
    // f1_max = μ1 m1 g = 0.3 · 2 · 9.8 = 5.88 N
    let below = StackedBlockModel::new(StackedBlockConfig {
        top_mass: 2.0,
        bottom_mass: 3.0,
        force: 14.0,
        block_friction: 0.3,
        ..Default::default()
    });
    assert_eq!(below.contact(), BlockContact::Rigid);
    let (top, bottom) = below.accelerations();
    assert_relative_eq!(top, 2.8, max_relative = 1e-12);
    assert_relative_eq!(bottom, 2.8, max_relative = 1e-12);

    let trajectory = generate(&[("mass", 2.0), ("mass2", 3.0), ("force", 15.5), ("friction", 0.3)]);
    assert_eq!(trajectory.kind(), MotionModelKind::StackedBlock);
    let sample = &trajectory.samples()[10];
    let companion = sample.companion.unwrap();
    assert_relative_eq!(sample.acceleration_x, 2.94, max_relative = 1e-9);
    assert_relative_eq!(companion.acceleration_x, (15.5 - 5.88) / 3.0, max_relative = 1e-9);
}

// ============================================================================
// Invariants over every model
// ============================================================================

#[test]
fn every_sample_is_finite_and_balanced() {
    for params in one_of_each() {
        let trajectory = generate_trajectory(&params).unwrap();
        for sample in &trajectory {
            for (name, value) in sample.fields() {
                assert!(value.is_finite(), "{}: {name} = {value}", trajectory.kind());
            }
            assert!(sample.kinetic_energy >= 0.0);
            assert_eq!(sample.total_energy, sample.kinetic_energy + sample.potential_energy);
        }
    }
}

#[test]
fn times_are_exact_multiples_of_dt() {
    for params in one_of_each() {
        let trajectory = generate_trajectory(&params).unwrap();
        assert!(trajectory.len() <= 501);
        for (i, sample) in trajectory.iter().enumerate() {
            assert_eq!(sample.time, i as f64 * 0.02);
        }
    }
}

#[test]
fn each_model_is_reachable() {
    let kinds: Vec<MotionModelKind> = one_of_each()
        .iter()
        .map(|p| generate_trajectory(p).unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            MotionModelKind::Projectile,
            MotionModelKind::Pendulum,
            MotionModelKind::ConicalPendulum,
            MotionModelKind::InclineFriction,
            MotionModelKind::HorizontalFriction,
            MotionModelKind::InclinePulley,
            MotionModelKind::StackedBlock,
        ]
    );
}

#[test]
fn two_body_models_carry_a_companion() {
    for params in one_of_each() {
        let trajectory = generate_trajectory(&params).unwrap();
        let has_companion = trajectory.iter().all(|s| s.companion.is_some());
        assert_eq!(has_companion, trajectory.kind().is_two_body(), "{}", trajectory.kind());
    }
}

// ============================================================================
// Inputs and configuration
// ============================================================================

#[test]
fn malformed_parameter_text_is_rejected() {
    let err = ScenarioParameters::from_text_pairs([("velocity", "12"), ("angle", "steep")]).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { ref name, .. } if name == "angle"));
}

#[test]
fn negative_mass_is_stopped_by_jidoka() {
    let err = generate_trajectory(&params(&[("mass", -2.0), ("force", 5.0), ("velocity", 1.0)])).unwrap_err();
    assert!(err.is_jidoka_violation());
}

#[test]
fn custom_timestep_and_duration() {
    let config = EngineConfig::builder().timestep(0.05).max_duration(2.0).build();
    let generator = TrajectoryGenerator::new(config).unwrap();
    let trajectory = generator
        .generate(&params(&[("length", 1.0)]).with_object_type("pendulum"))
        .unwrap();
    assert_eq!(trajectory.len(), 41);
    assert_abs_diff_eq!(trajectory.duration(), 2.0, epsilon = 1e-9);
}

#[test]
fn engine_config_yaml_round_trip() {
    let config = EngineConfig::builder().timestep(0.01).static_friction_ratio(1.5).build();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let restored = EngineConfig::from_yaml(&yaml).unwrap();
    assert_eq!(config, restored);
}
