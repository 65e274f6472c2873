//! Thermal Bench Core Library
//!
//! 2D heat-diffusion engine for a bench container holding layered
//! cylindrical samples, with thermal-crosstalk scoring between neighbors.
//!
//! The engine models an explicit finite-difference heat equation on a
//! uniform Cartesian grid downsampled from the render surface. Cells
//! outside the container (and liquid fill held at a set temperature) are
//! fixed-temperature boundaries; sample cells diffuse and can be pinned by
//! per-sample Peltier clamps. The interference scorer walks the gap between
//! two samples' rims and grades the heat bleed 0-100.
//!
//! The rendering/editing layer is an external collaborator: it drives
//! [`ThermalSimulation`] through `initialize`/`step` and consumes Fahrenheit
//! snapshots, per-sample temperatures and report strings. It never touches
//! grid internals.
//!
//! # Stability
//!
//! The explicit scheme is conditionally stable: `α·Δt/Δx² <= 0.25` for the
//! stiffest material present. The engine documents the bound and offers
//! [`solver::max_stable_timestep`], but never enforces it at runtime;
//! choosing a safe time step and downsample factor is the caller's job.

// Core value types
pub mod core_types;

// Grid model and geometry classification
pub mod grid;

// Finite-difference stepper
pub mod solver;

// Interference scoring
pub mod analysis;

// Facade and scene persistence
pub mod simulation;

// Re-export core types
pub use core_types::{
    Celsius, Container, ContainerShape, Fahrenheit, Inches, Layer, LayerRadii, LayerSpec,
    LiquidFill, Material, PeltierClamp, Sample, SampleConfigError, SampleId, Seconds, SizeClass,
};

// Re-export the grid and solver surface
pub use grid::{build_grid, GridBuildError, ScalarField, ThermalGrid, DEFAULT_DOWNSAMPLE};
pub use solver::{max_stable_timestep, step_diffusion, STABILITY_LIMIT};

// Re-export analysis and the facade
pub use analysis::{interference_report, pair_score, rim_radius, PairPolicy, PairScore};
pub use simulation::{Scene, SceneError, SimulationConfig, ThermalSimulation};
