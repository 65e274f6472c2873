//! Entry points that mutate the simulation: initialization, stepping and
//! clamp control

use std::os::raw::c_char;

use thermal_bench_core::{SampleId, Scene};

use crate::error::{BenchError, BenchErrorCode};
use crate::helpers::{clear_last_error, guard, str_param, track_error};
use crate::instance::{instance_param, ThermalBenchInstance};

/// Build the grid from a scene described as JSON (the same structure the
/// editing layer saves to disk).
///
/// This is a full rebuild: cell classification, boundary flags and the
/// ownership cache are recomputed and elapsed time resets to zero. Call it
/// again after any structural edit to the container or sample list.
///
/// # Safety
/// `instance` must be a live instance pointer; `scene_json` must be a valid
/// NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_initialize_scene(
    instance: *mut ThermalBenchInstance,
    scene_json: *const c_char,
    render_width: u32,
    render_height: u32,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let json = match str_param(scene_json, "scene_json") {
            Ok(json) => json,
            Err(err) => return track_error(&err),
        };
        let scene = match Scene::from_json(json) {
            Ok(scene) => scene,
            Err(err) => return track_error(&BenchError::scene_parse(err.to_string())),
        };
        let Ok(mut sim) = instance.sim.write() else {
            return track_error(&BenchError::lock_poisoned());
        };
        match sim.initialize(scene.container, scene.samples, render_width, render_height) {
            Ok(()) => clear_last_error(),
            Err(err) => track_error(&BenchError::grid_build(err.to_string())),
        }
    })
}

/// Advance the simulation by `ticks` fixed time increments.
///
/// # Safety
/// `instance` must be a live instance pointer.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_step_n(
    instance: *mut ThermalBenchInstance,
    ticks: u32,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(mut sim) = instance.sim.write() else {
            return track_error(&BenchError::lock_poisoned());
        };
        match sim.step_n(ticks) {
            Some(_) => clear_last_error(),
            None => track_error(&BenchError::not_initialized()),
        }
    })
}

/// Advance the simulation one tick.
///
/// # Safety
/// `instance` must be a live instance pointer.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_step(instance: *mut ThermalBenchInstance) -> BenchErrorCode {
    thermal_bench_step_n(instance, 1)
}

/// Advance one animation tick at `speed` times real time. Speeds beyond the
/// substep cap widen the time step instead of adding substeps; the widened
/// step must still satisfy the documented stability bound.
///
/// # Safety
/// `instance` must be a live instance pointer.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_advance_scaled(
    instance: *mut ThermalBenchInstance,
    speed: f32,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        if !speed.is_finite() || speed <= 0.0 {
            return track_error(&BenchError::invalid_argument(format!(
                "speed must be positive and finite, got {speed}"
            )));
        }
        let Ok(mut sim) = instance.sim.write() else {
            return track_error(&BenchError::lock_poisoned());
        };
        match sim.advance_scaled(speed) {
            Some(_) => clear_last_error(),
            None => track_error(&BenchError::not_initialized()),
        }
    })
}

/// Switch a sample's Peltier clamp on or off. Non-structural: takes effect
/// on the next tick without re-initialization.
///
/// # Safety
/// `instance` must be a live instance pointer.
#[no_mangle]
pub unsafe extern "C" fn thermal_bench_set_peltier_active(
    instance: *mut ThermalBenchInstance,
    sample_id: u32,
    active: bool,
) -> BenchErrorCode {
    guard(|| {
        let instance = match instance_param(instance) {
            Ok(instance) => instance,
            Err(err) => return track_error(&err),
        };
        let Ok(mut sim) = instance.sim.write() else {
            return track_error(&BenchError::lock_poisoned());
        };
        let id = SampleId(sample_id);
        if sim.sample(id).is_none() {
            return track_error(&BenchError::unknown_sample(sample_id));
        }
        if sim.set_peltier_active(id, active) {
            clear_last_error()
        } else {
            track_error(&BenchError::invalid_argument(format!(
                "sample {sample_id} carries no Peltier clamp"
            )))
        }
    })
}
