//! Grid model: cell storage, geometry classification and ownership cache

mod classify;
mod field;
mod thermal_grid;

pub use classify::{build_grid, classify_point, GridBuildError, PointClass};
pub use field::ScalarField;
pub use thermal_grid::{ThermalGrid, DEFAULT_DOWNSAMPLE};
