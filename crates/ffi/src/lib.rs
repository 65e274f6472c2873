//! C ABI for the thermal bench engine
//!
//! The host rendering/editing application drives the engine through this
//! surface: create an instance, initialize it from a scene JSON document,
//! step it per animation frame, and read back grid snapshots, per-sample
//! temperatures and the interference report.
//!
//! # Conventions
//!
//! - Every function returns a [`BenchErrorCode`]; `Ok` clears the
//!   thread-local error, anything else records a message retrievable with
//!   [`thermal_bench_last_error_message`] on the same thread.
//! - Instances are opaque pointers created by `thermal_bench_new` and
//!   released by `thermal_bench_destroy`. The inner engine sits behind an
//!   `RwLock`, so hosts may query from one thread while another steps.
//! - Panics never unwind across the boundary; they surface as
//!   `InternalPanic`.
//!
//! The generated header lands at the repository root as
//! `ThermalBenchFFI.h`.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{thermal_bench_last_error_code, thermal_bench_last_error_message, BenchErrorCode};
pub use instance::{thermal_bench_destroy, thermal_bench_new, ThermalBenchInstance};
pub use queries::{
    thermal_bench_copy_grid, thermal_bench_elapsed, thermal_bench_grid_dims, thermal_bench_report,
    thermal_bench_sample_temperature, thermal_bench_string_free,
};
pub use simulation::{
    thermal_bench_advance_scaled, thermal_bench_initialize_scene, thermal_bench_set_peltier_active,
    thermal_bench_step, thermal_bench_step_n,
};
