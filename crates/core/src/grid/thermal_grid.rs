//! The thermal grid: double-buffered temperatures, per-cell media and the
//! sample ownership cache
//!
//! The grid is the single shared mutable resource of the engine. It has one
//! writer (the diffusion stepper) and several readers (aggregation, scoring,
//! the rendering layer via snapshots). It is built in one pass by the
//! geometry classifier and discarded wholesale on structural changes; cell
//! ownership is never re-tagged incrementally.

use nalgebra::Point2;
use rustc_hash::FxHashMap;

use crate::core_types::{Celsius, Material, SampleId};

use super::field::ScalarField;

/// Cells per display unit is `1 / downsample`; the grid trades resolution
/// for step cost by this integer factor.
pub const DEFAULT_DOWNSAMPLE: u32 = 4;

/// 2D cell grid with double-buffered temperatures.
#[derive(Debug, Clone)]
pub struct ThermalGrid {
    /// Grid width in cells
    pub nx: usize,
    /// Grid height in cells
    pub ny: usize,
    /// Physical cell size Δx in meters
    pub cell_size_m: f32,
    /// Cell size in display units (the downsample factor)
    pub cell_size_px: f32,
    /// Current temperatures (°C)
    pub(crate) temperature: ScalarField,
    /// Write buffer for the next tick (°C)
    pub(crate) next_temperature: ScalarField,
    /// Material palette; cells reference materials by index
    pub(crate) media: Vec<Material>,
    /// Per-cell palette index
    pub(crate) medium: Vec<u16>,
    /// Per-cell thermal diffusivity α (m²/s), precomputed from the palette
    pub(crate) diffusivity: Vec<f32>,
    /// Externally fixed cells, exempt from diffusion updates
    pub(crate) boundary: Vec<bool>,
    /// Owning sample per cell, if any
    pub(crate) owner: Vec<Option<SampleId>>,
    /// Sample id to owned cell indices, built once at initialization
    pub(crate) cells_by_sample: FxHashMap<SampleId, Vec<usize>>,
    /// Ambient temperature (°C) for out-of-bounds and sentinel reads
    pub(crate) ambient_c: f32,
}

impl ThermalGrid {
    /// Flat index for a cell position.
    #[inline]
    #[must_use]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.nx + x
    }

    /// Current temperature (°C) at a cell.
    #[inline]
    #[must_use]
    pub fn temperature_at(&self, x: usize, y: usize) -> f32 {
        self.temperature.get(x, y)
    }

    /// Nearest-cell temperature (°C) for a display-space point.
    ///
    /// Out-of-bounds reads resolve to the ambient temperature; callers never
    /// see an error for a probe beyond the grid.
    #[must_use]
    pub fn temperature_at_display(&self, point: Point2<f32>) -> f32 {
        let gx = (point.x / self.cell_size_px).round();
        let gy = (point.y / self.cell_size_px).round();
        if gx < 0.0 || gy < 0.0 {
            return self.ambient_c;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx >= self.nx || gy >= self.ny {
            return self.ambient_c;
        }
        self.temperature.get(gx, gy)
    }

    /// Material of a cell.
    #[inline]
    #[must_use]
    pub fn material_at(&self, x: usize, y: usize) -> &Material {
        &self.media[self.medium[self.idx(x, y)] as usize]
    }

    /// Whether a cell's temperature is externally fixed.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self, x: usize, y: usize) -> bool {
        self.boundary[self.idx(x, y)]
    }

    /// Owning sample of a cell, if any.
    #[inline]
    #[must_use]
    pub fn owner_at(&self, x: usize, y: usize) -> Option<SampleId> {
        self.owner[self.idx(x, y)]
    }

    /// Cell indices owned by a sample. `None` when the sample owns no cells
    /// (a degenerate but recoverable configuration).
    #[must_use]
    pub fn cells_of(&self, id: SampleId) -> Option<&[usize]> {
        self.cells_by_sample
            .get(&id)
            .map(Vec::as_slice)
            .filter(|cells| !cells.is_empty())
    }

    /// Mean current temperature (°C) over a sample's owned cells.
    #[must_use]
    pub fn mean_sample_temperature(&self, id: SampleId) -> Option<Celsius> {
        let cells = self.cells_of(id)?;
        let sum: f64 = cells
            .iter()
            .map(|&i| f64::from(self.temperature.data[i]))
            .sum();
        Some(Celsius::new(sum / cells.len() as f64))
    }

    /// Min and max current temperature (°C) over a sample's owned cells.
    #[must_use]
    pub fn sample_temperature_range(&self, id: SampleId) -> Option<(f32, f32)> {
        let cells = self.cells_of(id)?;
        let first = self.temperature.data[cells[0]];
        Some(cells.iter().fold((first, first), |(lo, hi), &i| {
            let v = self.temperature.data[i];
            (lo.min(v), hi.max(v))
        }))
    }

    /// Ambient temperature in °C.
    #[inline]
    #[must_use]
    pub fn ambient_celsius(&self) -> f32 {
        self.ambient_c
    }

    /// Row-major snapshot of the current temperatures in Fahrenheit, for the
    /// rendering layer.
    #[must_use]
    pub fn fahrenheit_snapshot(&self) -> ScalarField {
        self.temperature.map(|c| c * 9.0 / 5.0 + 32.0)
    }

    /// Publish the write buffer as the current tick.
    ///
    /// Called exactly once per `step`, after every cell's next value is
    /// written, so readers always observe a single consistent tick.
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.temperature, &mut self.next_temperature);
    }
}
