//! Thermal interference scoring between neighboring samples
//!
//! Interference is unwanted heat bleed from one sample into the gap around
//! another. The score for a pair walks the straight line between the two
//! rim edges, reads grid temperatures at evenly spaced points, and combines
//! two sub-metrics:
//!
//! - **coverage**: the fraction of gap points elevated above ambient by
//!   more than the halo threshold. Early interference shows up as a few
//!   hot points, so coverage carries most of the weight.
//! - **intensity**: how elevated the hot points are on average, against a
//!   fixed "clearly significant" rise. Mature interference shows as a
//!   uniformly heated gap where intensity dominates.
//!
//! The 0.6/0.4 weighting is a tuned heuristic, not a physical law.

use nalgebra::Point2;
use tracing::debug;

use crate::core_types::{Container, Inches, Sample};
use crate::grid::ThermalGrid;

/// Buffer added to a sample's outer radius for interference geometry.
/// Heat transfer matters slightly beyond the visible sample boundary.
pub const RIM_BUFFER: Inches = Inches::new(1.0);

/// Number of evenly spaced probe points along the rim-to-rim gap line.
pub const GAP_SAMPLE_POINTS: usize = 20;

/// Elevation above ambient (°F) a probe must exceed to count as halo.
pub const HALO_THRESHOLD_F: f64 = 1.5;

/// Elevation (°F) treated as clearly significant heating; intensity is the
/// mean hot-point elevation over this value, capped at 100%.
pub const SIGNIFICANT_RISE_F: f64 = 10.0;

/// Weight of the coverage sub-metric in the final score.
pub const COVERAGE_WEIGHT: f64 = 0.6;

/// Weight of the intensity sub-metric in the final score.
pub const INTENSITY_WEIGHT: f64 = 0.4;

/// Minimum score for a pair to appear in the report.
pub const REPORT_THRESHOLD: f64 = 1.0;

/// Report line when no grid exists yet or no time has elapsed.
pub const NOT_STARTED_MESSAGE: &str =
    "Interference: simulation not started, no temperature data yet.";

/// Report line when the simulation runs but no pair qualifies.
pub const ALL_QUIET_MESSAGE: &str = "No significant interference detected between samples.";

/// Which sample pairs the report considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PairPolicy {
    /// Every distinct pair
    #[default]
    AllPairs,
    /// Each sample against its nearest neighbor only
    NearestNeighbor,
}

/// Breakdown of one pair's interference score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    /// Final severity in [0, 100]
    pub score: f64,
    /// Percent of gap points above the halo threshold
    pub coverage: f64,
    /// Percent of the significant rise reached by the mean hot point
    pub intensity: f64,
    /// Rim-to-rim distance in display units (negative when overlapping)
    pub edge_distance: f32,
}

impl PairScore {
    fn touching(edge_distance: f32) -> Self {
        PairScore {
            score: 100.0,
            coverage: 100.0,
            intensity: 100.0,
            edge_distance,
        }
    }

    fn quiet(edge_distance: f32) -> Self {
        PairScore {
            score: 0.0,
            coverage: 0.0,
            intensity: 0.0,
            edge_distance,
        }
    }
}

/// Rim radius of a sample: outer radius plus the fixed buffer, in display
/// units. Interference geometry only; thermal classification ignores it.
#[inline]
#[must_use]
pub fn rim_radius(sample: &Sample) -> f32 {
    sample.radius + RIM_BUFFER.to_display_units()
}

/// Score the interference between two samples against the current grid.
///
/// Touching or overlapping rims short-circuit to maximum severity
/// regardless of grid state; a gap with no point above the halo threshold
/// short-circuits to zero.
#[must_use]
pub fn pair_score(
    a: &Sample,
    b: &Sample,
    container: &Container,
    grid: &ThermalGrid,
) -> PairScore {
    let center_distance = nalgebra::distance(&a.position, &b.position);
    let edge_distance = center_distance - rim_radius(a) - rim_radius(b);
    if edge_distance <= 0.0 {
        return PairScore::touching(edge_distance);
    }

    let direction = (b.position - a.position) / center_distance;
    let start = a.position + direction * rim_radius(a);
    let end = b.position - direction * rim_radius(b);

    let ambient = container.ambient;
    let mut hot_points = 0usize;
    let mut hot_elevation_sum = 0.0f64;
    for i in 0..GAP_SAMPLE_POINTS {
        let t = i as f32 / (GAP_SAMPLE_POINTS - 1) as f32;
        let probe: Point2<f32> = start + (end - start) * t;
        let celsius = f64::from(grid.temperature_at_display(probe));
        let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
        let elevation = fahrenheit - ambient.value();
        if elevation > HALO_THRESHOLD_F {
            hot_points += 1;
            hot_elevation_sum += elevation;
        }
    }

    if hot_points == 0 {
        return PairScore::quiet(edge_distance);
    }

    let coverage = 100.0 * hot_points as f64 / GAP_SAMPLE_POINTS as f64;
    let mean_elevation = hot_elevation_sum / hot_points as f64;
    let intensity = (100.0 * mean_elevation / SIGNIFICANT_RISE_F).min(100.0);
    let score = (COVERAGE_WEIGHT * coverage + INTENSITY_WEIGHT * intensity).clamp(0.0, 100.0);

    debug!(
        a = %a.id,
        b = %b.id,
        coverage,
        intensity,
        score,
        "scored pair"
    );

    PairScore {
        score,
        coverage,
        intensity,
        edge_distance,
    }
}

/// Pairs the report will score under `policy`, as index pairs into
/// `samples` with the lower index first.
fn report_pairs(samples: &[Sample], policy: PairPolicy) -> Vec<(usize, usize)> {
    match policy {
        PairPolicy::AllPairs => {
            let mut pairs = Vec::new();
            for i in 0..samples.len() {
                for j in (i + 1)..samples.len() {
                    pairs.push((i, j));
                }
            }
            pairs
        }
        PairPolicy::NearestNeighbor => {
            let mut pairs = Vec::new();
            for (i, sample) in samples.iter().enumerate() {
                let nearest = samples
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .min_by(|&(_, x), &(_, y)| {
                        nalgebra::distance(&sample.position, &x.position)
                            .total_cmp(&nalgebra::distance(&sample.position, &y.position))
                    })
                    .map(|(j, _)| j);
                if let Some(j) = nearest {
                    let pair = (i.min(j), i.max(j));
                    if !pairs.contains(&pair) {
                        pairs.push(pair);
                    }
                }
            }
            pairs
        }
    }
}

/// Human-readable interference report, one line per qualifying pair.
///
/// `grid` is `None` before the first initialization; `elapsed` is the
/// simulated time in seconds. The two empty-report messages distinguish a
/// simulation that has not produced data yet from one that is running
/// cleanly.
#[must_use]
pub fn interference_report(
    samples: &[Sample],
    container: &Container,
    elapsed: f32,
    grid: Option<&ThermalGrid>,
    policy: PairPolicy,
) -> Vec<String> {
    let Some(grid) = grid.filter(|_| elapsed > 0.0) else {
        return vec![String::from(NOT_STARTED_MESSAGE)];
    };

    let mut lines = Vec::new();
    for (i, j) in report_pairs(samples, policy) {
        let result = pair_score(&samples[i], &samples[j], container, grid);
        if result.score > REPORT_THRESHOLD {
            lines.push(format!(
                "{} <-> {}: interference {:.1}/100 (coverage {:.0}%, intensity {:.0}%)",
                samples[i].name, samples[j].name, result.score, result.coverage, result.intensity
            ));
        }
    }

    if lines.is_empty() {
        lines.push(String::from(ALL_QUIET_MESSAGE));
    }
    lines
}

/// Ambient-elevation of a single display-space probe in °F. Exposed for
/// the measurement overlay in the rendering layer.
#[must_use]
pub fn elevation_at(point: Point2<f32>, container: &Container, grid: &ThermalGrid) -> f64 {
    let celsius = f64::from(grid.temperature_at_display(point));
    let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
    fahrenheit - container.ambient.value()
}
