//! Integration tests for the interference scorer and report through the
//! public facade.

use nalgebra::Point2;
use thermal_bench_core::{
    Container, Fahrenheit, Material, PairPolicy, Sample, SampleId, SimulationConfig,
    ThermalSimulation,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Steel canister in a dry block; high conductivity makes halos form fast.
fn canister(id: u32, name: &str, position: Point2<f32>, initial: f64) -> Sample {
    Sample::new(
        SampleId(id),
        name,
        position,
        40.0,
        Material::agar_gel(),
        Material::agar_gel(),
        Material::stainless_steel(),
        Fahrenheit::new(initial),
    )
}

/// Aluminum dry block, ambient 70°F.
fn dry_block(width: f32, height: f32) -> Container {
    Container::rectangle(width, height, Material::aluminum(), Fahrenheit::new(70.0))
}

#[test]
fn touching_rims_score_maximum_before_any_diffusion() {
    // Rim radius is 40 + 10 (one inch buffer): centers 100 apart touch.
    let mut sim = ThermalSimulation::new(SimulationConfig::default());
    sim.initialize(
        dry_block(600.0, 600.0),
        vec![
            canister(1, "alpha", Point2::new(200.0, 300.0), 70.0),
            canister(2, "beta", Point2::new(300.0, 300.0), 70.0),
        ],
        600,
        600,
    )
    .unwrap();

    // Tick 0: grid untouched, both samples stone cold. Still 100.
    let result = sim.score(SampleId(1), SampleId(2)).unwrap();
    assert!((result.score - 100.0).abs() < f64::EPSILON);
    assert!(result.edge_distance <= 0.0);
}

#[test]
fn distant_cold_pair_scores_zero_and_is_omitted() {
    // Rim-to-rim gap of 200 display units (20 inches).
    let mut sim = ThermalSimulation::new(SimulationConfig::default());
    sim.initialize(
        dry_block(800.0, 600.0),
        vec![
            canister(1, "alpha", Point2::new(200.0, 300.0), 110.0),
            canister(2, "beta", Point2::new(500.0, 300.0), 110.0),
        ],
        800,
        600,
    )
    .unwrap();

    // Tick 0: hot samples, but no halo has formed in the gap.
    let result = sim.score(SampleId(1), SampleId(2)).unwrap();
    assert!(result.score.abs() < f64::EPSILON);

    // One tick in, the gap is still cold: the pair is omitted.
    sim.step().unwrap();
    let report = sim.report();
    assert_eq!(report.len(), 1);
    assert!(
        report[0].contains("No significant interference"),
        "got: {}",
        report[0]
    );
}

#[test]
fn scores_stay_within_bounds_as_heat_spreads() {
    for gap in [10.0_f32, 60.0, 140.0, 260.0] {
        let mut sim = ThermalSimulation::new(SimulationConfig::default());
        let b_x = 200.0 + 100.0 + gap;
        sim.initialize(
            dry_block(800.0, 600.0),
            vec![
                canister(1, "alpha", Point2::new(200.0, 300.0), 150.0)
                    .with_peltier(Fahrenheit::new(150.0), true),
                canister(2, "beta", Point2::new(b_x, 300.0), 70.0),
            ],
            800,
            600,
        )
        .unwrap();
        sim.step_n(600).unwrap();
        let result = sim.score(SampleId(1), SampleId(2)).unwrap();
        assert!(
            (0.0..=100.0).contains(&result.score),
            "gap {gap}: score {} out of bounds",
            result.score
        );
    }
}

#[test]
fn score_is_non_increasing_with_distance() {
    // One clamped hot canister, one passive neighbor, fixed elapsed time.
    let mut scores = Vec::new();
    for center_distance in [110.0_f32, 140.0, 180.0, 240.0, 320.0] {
        let mut sim = ThermalSimulation::new(SimulationConfig::default());
        sim.initialize(
            dry_block(800.0, 600.0),
            vec![
                canister(1, "alpha", Point2::new(200.0, 300.0), 150.0)
                    .with_peltier(Fahrenheit::new(150.0), true),
                canister(2, "beta", Point2::new(200.0 + center_distance, 300.0), 70.0),
            ],
            800,
            600,
        )
        .unwrap();
        sim.step_n(1200).unwrap();
        scores.push(sim.score(SampleId(1), SampleId(2)).unwrap().score);
    }

    assert!(
        scores[0] > 0.0,
        "nearest pair should register interference: {scores:?}"
    );
    for pair in scores.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-3,
            "scores must fall with distance: {scores:?}"
        );
    }
}

#[test]
fn hot_gap_shows_up_in_the_report() {
    let mut sim = ThermalSimulation::new(SimulationConfig::default());
    sim.initialize(
        dry_block(600.0, 600.0),
        vec![
            canister(1, "alpha", Point2::new(200.0, 300.0), 150.0)
                .with_peltier(Fahrenheit::new(150.0), true),
            canister(2, "beta", Point2::new(320.0, 300.0), 70.0),
        ],
        600,
        600,
    )
    .unwrap();
    sim.step_n(1200).unwrap();

    let report = sim.report();
    assert_eq!(report.len(), 1);
    assert!(
        report[0].contains("alpha") && report[0].contains("beta"),
        "got: {}",
        report[0]
    );
    assert!(report[0].contains("interference"), "got: {}", report[0]);
}

#[test]
fn nearest_neighbor_policy_limits_report_scope() {
    let config = SimulationConfig {
        pair_policy: PairPolicy::NearestNeighbor,
        ..SimulationConfig::default()
    };
    let mut sim = ThermalSimulation::new(config);
    sim.initialize(
        dry_block(1200.0, 600.0),
        vec![
            canister(1, "alpha", Point2::new(200.0, 300.0), 150.0)
                .with_peltier(Fahrenheit::new(150.0), true),
            canister(2, "beta", Point2::new(320.0, 300.0), 150.0)
                .with_peltier(Fahrenheit::new(150.0), true),
            canister(3, "gamma", Point2::new(1000.0, 300.0), 70.0),
        ],
        1200,
        600,
    )
    .unwrap();
    sim.step_n(600).unwrap();

    // Alpha and beta are mutual nearest neighbors; gamma's nearest is beta.
    // No line may pair alpha with gamma.
    for line in sim.report() {
        assert!(
            !(line.contains("alpha") && line.contains("gamma")),
            "alpha/gamma is out of scope: {line}"
        );
    }
}

#[test]
fn overlapping_centers_still_short_circuit() {
    // Same center: degenerate geometry, maximum severity by definition.
    let mut sim = ThermalSimulation::new(SimulationConfig::default());
    sim.initialize(
        dry_block(600.0, 600.0),
        vec![
            canister(1, "alpha", Point2::new(300.0, 300.0), 70.0),
            canister(2, "beta", Point2::new(300.0, 300.0), 70.0),
        ],
        600,
        600,
    )
    .unwrap();
    let result = sim.score(SampleId(1), SampleId(2)).unwrap();
    assert!((result.score - 100.0).abs() < f64::EPSILON);
}
