//! Read-only entry points: grid snapshots, sample temperatures, reports

use std::ffi::CString;
use std::os::raw::c_char;

use thermal_bench_core::SampleId;

use crate::error::{BenchError, BenchErrorCode};
use crate::helpers::{clear_last_error, guard, track_error, write_out};
use crate::instance::{instance_param, ThermalBenchInstance};

/// Grid dimensions in cells.
///
/// # Safety
/// `instance` must be a live instance pointer; `out_width` and `out_height`
/// must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_grid_dims(
    instance: *const ThermalBenchInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(sim) = instance.sim.read() else {
            return track_error(&BenchError::lock_poisoned());
        };
        let Some((width, height)) = sim.dimensions() else {
            return track_error(&BenchError::not_initialized());
        };
        let result = write_out(out_width, width, "out_width")
            .and_then(|()| write_out(out_height, height, "out_height"));
        match result {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&err),
        }
    })
}

/// Copy the Fahrenheit grid snapshot into a caller-allocated buffer in
/// row-major order. `buffer_len` is the capacity in `f32` values and must
/// be at least `width * height`.
///
/// # Safety
/// `instance` must be a live instance pointer; `buffer` must be valid for
/// `buffer_len` `f32` writes.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_copy_grid(
    instance: *const ThermalBenchInstance,
    buffer: *mut f32,
    buffer_len: usize,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        if buffer.is_null() {
            return track_error(&BenchError::null_pointer("buffer"));
        }
        let Ok(sim) = instance.sim.read() else {
            return track_error(&BenchError::lock_poisoned());
        };
        let Some(snapshot) = sim.grid_fahrenheit() else {
            return track_error(&BenchError::not_initialized());
        };
        let needed = snapshot.data.len();
        if buffer_len < needed {
            return track_error(&BenchError::buffer_too_small(needed, buffer_len));
        }
        std::ptr::copy_nonoverlapping(snapshot.data.as_ptr(), buffer, needed);
        clear_last_error()
    })
}

/// Mean temperature of a sample in Fahrenheit. A sample owning no cells
/// reports the documented sentinel of 0°F; only an unknown id is an error.
///
/// # Safety
/// `instance` must be a live instance pointer; `out_fahrenheit` must be
/// valid for a write.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_sample_temperature(
    instance: *const ThermalBenchInstance,
    sample_id: u32,
    out_fahrenheit: *mut f64,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(sim) = instance.sim.read() else {
            return track_error(&BenchError::lock_poisoned());
        };
        let id = SampleId(sample_id);
        if sim.sample(id).is_none() {
            return track_error(&BenchError::unknown_sample(sample_id));
        }
        let value = sim.sample_temperature(id).value();
        match write_out(out_fahrenheit, value, "out_fahrenheit") {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&err),
        }
    })
}

/// Simulated seconds since the last initialization.
///
/// # Safety
/// `instance` must be a live instance pointer; `out_seconds` must be valid
/// for a write.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_elapsed(
    instance: *const ThermalBenchInstance,
    out_seconds: *mut f32,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(sim) = instance.sim.read() else {
            return track_error(&BenchError::lock_poisoned());
        };
        match write_out(out_seconds, sim.elapsed().value(), "out_seconds") {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&err),
        }
    })
}

/// Interference report as a newline-joined string. The caller owns the
/// returned string and must release it with `thermal_bench_string_free`.
///
/// # Safety
/// `instance` must be a live instance pointer; `out_report` must be valid
/// for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_report(
    instance: *const ThermalBenchInstance,
    out_report: *mut *mut c_char,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(sim) = instance.sim.read() else {
            return track_error(&BenchError::lock_poisoned());
        };
        let joined = sim.report().join("\n");
        let Ok(cstring) = CString::new(joined) else {
            return track_error(&BenchError::invalid_argument(
                "report contained an interior NUL byte",
            ));
        };
        match write_out(out_report, cstring.into_raw(), "out_report") {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&err),
        }
    })
}

/// Release a string returned by `thermal_bench_report`. Passing null is a
/// no-op.
///
/// # Safety
/// `string` must be null or a pointer previously returned by this library
/// and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_string_free(string: *mut c_char) {
    if !string.is_null() {
        drop(CString::from_raw(string));
    }
}
