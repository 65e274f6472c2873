//! Explicit finite-difference diffusion stepper
//!
//! One `step_diffusion` call advances the grid a single time increment:
//!
//! ```text
//! T_next = T + α · (T_top + T_bottom + T_left + T_right − 4T)/Δx² · Δt
//! ```
//!
//! Jacobi-style double buffering: every cell's Laplacian reads only the
//! prior-tick buffer, so the result is independent of update order and rows
//! can be computed in parallel. Boundary cells keep their fixed value and
//! clamped cells are forced to their target before the general update, so a
//! clamped cell never receives a diffusion contribution that would be
//! discarded, and its neighbors still see its prior-tick value.
//!
//! # Stability
//!
//! The explicit scheme requires `α·Δt/Δx² <= 0.25` for the stiffest material
//! on the grid. This is a caller obligation, chosen through the time step
//! and downsample factor; it is documented, not enforced. Violating it
//! produces diverging or oscillating temperatures. `max_stable_timestep`
//! computes the bound for a built grid.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::core_types::SampleId;
use crate::grid::ThermalGrid;

/// Stability bound on the diffusion number `α·Δt/Δx²` for the explicit
/// 2D five-point scheme.
pub const STABILITY_LIMIT: f32 = 0.25;

/// Advance the grid one time increment of `dt` seconds.
///
/// `clamps` maps clamp-active samples to their target temperature in °C;
/// every cell owned by such a sample is pinned to the target this tick.
///
/// Perimeter cells of the array (row/column 0 and n-1) are excluded from
/// the update to keep neighbor indexing in range; they retain their
/// initialization value.
pub fn step_diffusion(grid: &mut ThermalGrid, clamps: &FxHashMap<SampleId, f32>, dt: f32) {
    let nx = grid.nx;
    let ny = grid.ny;
    let inv_dx2 = 1.0 / (grid.cell_size_m * grid.cell_size_m);

    let current = grid.temperature.as_slice();
    let diffusivity = &grid.diffusivity;
    let boundary = &grid.boundary;
    let owner = &grid.owner;

    grid.next_temperature
        .data
        .par_chunks_mut(nx)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, next) in row.iter_mut().enumerate() {
                let idx = y * nx + x;

                if x == 0 || x == nx - 1 || y == 0 || y == ny - 1 {
                    *next = current[idx];
                    continue;
                }

                // Thermostat override comes first: clamped cells never take
                // a diffusion contribution.
                if let Some(id) = owner[idx] {
                    if let Some(&target) = clamps.get(&id) {
                        *next = target;
                        continue;
                    }
                }

                if boundary[idx] {
                    *next = current[idx];
                    continue;
                }

                let t = current[idx];
                let laplacian = (current[idx - nx] + current[idx + nx] + current[idx - 1]
                    + current[idx + 1]
                    - 4.0 * t)
                    * inv_dx2;
                *next = t + diffusivity[idx] * laplacian * dt;
            }
        });

    grid.swap_buffers();
}

/// Largest `dt` the stiffest non-boundary material on this grid tolerates.
///
/// Returns `None` when every cell is a boundary (nothing diffuses, any step
/// is stable).
#[must_use]
pub fn max_stable_timestep(grid: &ThermalGrid) -> Option<f32> {
    let alpha_max = grid
        .diffusivity
        .iter()
        .zip(&grid.boundary)
        .filter(|(_, &fixed)| !fixed)
        .map(|(&alpha, _)| alpha)
        .fold(None, |acc: Option<f32>, alpha| {
            Some(acc.map_or(alpha, |m| m.max(alpha)))
        })?;
    Some(STABILITY_LIMIT * grid.cell_size_m * grid.cell_size_m / alpha_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Container, Fahrenheit, Material, Sample, SampleId};
    use crate::grid::build_grid;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn hot_vial_in_oil() -> ThermalGrid {
        let container = Container::circle(400.0, Material::mineral_oil(), Fahrenheit::new(70.0));
        let sample = Sample::new(
            SampleId(1),
            "vial",
            Point2::new(200.0, 200.0),
            40.0,
            Material::agar_gel(),
            Material::agar_gel(),
            Material::borosilicate_glass(),
            Fahrenheit::new(110.0),
        );
        build_grid(&container, &[sample], 400, 400, 4).unwrap()
    }

    #[test]
    fn exterior_cells_never_move() {
        let mut grid = hot_vial_in_oil();
        let before = grid.temperature_at(0, 0);
        for _ in 0..25 {
            step_diffusion(&mut grid, &FxHashMap::default(), 0.05);
        }
        assert_relative_eq!(grid.temperature_at(0, 0), before);
    }

    #[test]
    fn heat_flows_from_hot_sample_into_fill() {
        let mut grid = hot_vial_in_oil();
        // Sample edge cell (world y = 240, radial distance 40) and the fill
        // cell one step further out.
        let edge_before = grid.temperature_at(50, 60);
        let fill_before = grid.temperature_at(50, 61);

        for _ in 0..200 {
            step_diffusion(&mut grid, &FxHashMap::default(), 0.05);
        }

        let edge_after = grid.temperature_at(50, 60);
        let fill_after = grid.temperature_at(50, 61);
        assert!(
            edge_after < edge_before - 0.1,
            "sample edge should cool: {edge_before} -> {edge_after}"
        );
        assert!(
            fill_after > fill_before + 0.02,
            "adjacent fill should warm: {fill_before} -> {fill_after}"
        );
    }

    #[test]
    fn clamped_cells_hold_their_target() {
        let mut grid = hot_vial_in_oil();
        let mut clamps = FxHashMap::default();
        // 120°F expressed in °C.
        clamps.insert(SampleId(1), 48.888_9_f32);
        for _ in 0..10 {
            step_diffusion(&mut grid, &clamps, 0.05);
        }
        for &idx in grid.cells_of(SampleId(1)).unwrap() {
            let (x, y) = (idx % grid.nx, idx / grid.nx);
            if x == 0 || x == grid.nx - 1 || y == 0 || y == grid.ny - 1 {
                continue;
            }
            assert_relative_eq!(grid.temperature.data[idx], 48.888_9, epsilon = 1e-4);
        }
    }

    #[test]
    fn stability_bound_tracks_the_stiffest_medium() {
        let grid = hot_vial_in_oil();
        let dt_max = max_stable_timestep(&grid).unwrap();
        // Borosilicate glass is the stiffest medium present.
        let alpha = Material::borosilicate_glass().diffusivity();
        let expected = STABILITY_LIMIT * grid.cell_size_m * grid.cell_size_m / alpha;
        assert_relative_eq!(dt_max, expected, epsilon = 1e-6);
    }
}
