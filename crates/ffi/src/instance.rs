//! Opaque engine instance and its lifecycle
//!
//! The instance is an opaque pointer for the host application. The inner
//! simulation sits behind an `RwLock`: queries take the read lock, stepping
//! and initialization take the write lock, so a host engine may call in
//! from several threads without corrupting the grid.

use std::sync::RwLock;

use thermal_bench_core::{SimulationConfig, ThermalSimulation};

use crate::error::{BenchError, BenchErrorCode};
use crate::helpers::{clear_last_error, guard, track_error, write_out};

/// Opaque simulation instance handed across the C boundary.
pub struct ThermalBenchInstance {
    pub(crate) sim: RwLock<ThermalSimulation>,
}

/// Borrow an instance parameter.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by
/// `thermal_bench_new` and not yet destroyed.
pub(crate) unsafe fn instance_param<'a>(
    ptr: *const ThermalBenchInstance,
) -> Result<&'a ThermalBenchInstance, BenchError> {
    ptr.as_ref().ok_or_else(|| BenchError::null_pointer("instance"))
}

/// Create an engine instance with default configuration.
///
/// The new instance has no grid; call `thermal_bench_initialize_scene`
/// before stepping or querying.
///
/// # Safety
/// `out_instance` must be valid for a pointer write. The returned instance
/// must be released with `thermal_bench_destroy`.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_new(
    out_instance: *mut *mut ThermalBenchInstance,
) -> BenchErrorCode {
    guard(|| {
        if out_instance.is_null() {
            return track_error(&BenchError::null_pointer("out_instance"));
        }
        let instance = Box::new(ThermalBenchInstance {
            sim: RwLock::new(ThermalSimulation::new(SimulationConfig::default())),
        });
        match write_out(out_instance, Box::into_raw(instance), "out_instance") {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&err),
        }
    })
}

/// Destroy an instance created by `thermal_bench_new`.
///
/// Passing null is a no-op.
///
/// # Safety
/// `instance` must be null or a live pointer from `thermal_bench_new`;
/// it must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_destroy(instance: *mut ThermalBenchInstance) {
    if !instance.is_null() {
        drop(Box::from_raw(instance));
    }
}
