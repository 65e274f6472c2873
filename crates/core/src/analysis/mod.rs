//! Analysis of grid state: interference scoring and reporting

mod interference;

pub use interference::{
    elevation_at, interference_report, pair_score, rim_radius, PairPolicy, PairScore,
    ALL_QUIET_MESSAGE, COVERAGE_WEIGHT, GAP_SAMPLE_POINTS, HALO_THRESHOLD_F, INTENSITY_WEIGHT,
    NOT_STARTED_MESSAGE, REPORT_THRESHOLD, RIM_BUFFER, SIGNIFICANT_RISE_F,
};
