//! Geometry classifier: one up-front pass mapping every cell to its medium
//!
//! Classification runs once per `initialize`, producing the material
//! palette, boundary flags and the immutable ownership index. The stepper
//! never re-classifies; structural edits rebuild the whole grid instead.

use nalgebra::Point2;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::debug;

use crate::core_types::{
    Container, Layer, LayerRadii, Material, Sample, SampleConfigError,
    DISPLAY_UNITS_PER_INCH, METERS_PER_INCH,
};

use super::field::ScalarField;
use super::thermal_grid::ThermalGrid;

/// What occupies a single display-space point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    /// Outside the container: ambient air, fixed at ambient temperature
    Exterior,
    /// Inside the container but in no sample
    Fill,
    /// Inside sample `index` (position in the sample list), in `layer`
    SampleLayer { index: usize, layer: Layer },
}

/// Grid construction failure.
#[derive(Debug, Clone, PartialEq)]
pub enum GridBuildError {
    /// Render dimensions too small for the downsample factor; the grid
    /// needs at least a 3x3 cell interior to diffuse anything.
    InvalidDimensions {
        render_width: u32,
        render_height: u32,
        downsample: u32,
    },
    /// A sample's layer configuration is invalid
    Sample(SampleConfigError),
}

impl fmt::Display for GridBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridBuildError::InvalidDimensions {
                render_width,
                render_height,
                downsample,
            } => write!(
                f,
                "render surface {render_width}x{render_height} with downsample \
                 {downsample} leaves no interior cells"
            ),
            GridBuildError::Sample(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GridBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridBuildError::Sample(err) => Some(err),
            GridBuildError::InvalidDimensions { .. } => None,
        }
    }
}

impl From<SampleConfigError> for GridBuildError {
    fn from(err: SampleConfigError) -> Self {
        GridBuildError::Sample(err)
    }
}

/// Classify one display-space point against the container and sample list.
///
/// Samples are tested in list order and the first hit wins. Overlapping
/// samples are therefore resolved by position in the list; callers are
/// expected to keep placements non-overlapping.
#[must_use]
pub fn classify_point(
    container: &Container,
    samples: &[Sample],
    radii: &[LayerRadii],
    point: Point2<f32>,
) -> PointClass {
    if !container.contains(point) {
        return PointClass::Exterior;
    }
    for (index, (sample, layer_radii)) in samples.iter().zip(radii).enumerate() {
        let distance = nalgebra::distance(&sample.position, &point);
        if let Some(layer) = layer_radii.layer_at(distance) {
            return PointClass::SampleLayer { index, layer };
        }
    }
    PointClass::Fill
}

/// Build a fresh grid from the container and sample list.
///
/// The render surface is downsampled by the integer `downsample` factor;
/// cell `(gx, gy)` classifies the display point `(gx·downsample,
/// gy·downsample)`.
///
/// # Errors
/// Returns `GridBuildError` when the downsampled grid has no interior or a
/// sample's layer spec violates the nesting invariant.
pub fn build_grid(
    container: &Container,
    samples: &[Sample],
    render_width: u32,
    render_height: u32,
    downsample: u32,
) -> Result<ThermalGrid, GridBuildError> {
    let nx = (render_width / downsample) as usize;
    let ny = (render_height / downsample) as usize;
    if downsample == 0 || nx < 3 || ny < 3 {
        return Err(GridBuildError::InvalidDimensions {
            render_width,
            render_height,
            downsample,
        });
    }

    let radii: Vec<LayerRadii> = samples
        .iter()
        .map(Sample::resolved_radii)
        .collect::<Result<_, _>>()?;

    // Palette: air, fill, then core/middle/outer per sample.
    let mut media = Vec::with_capacity(2 + samples.len() * 3);
    media.push(Material::ambient_air());
    media.push(container.fill.clone());
    for sample in samples {
        media.push(sample.core_material.clone());
        media.push(sample.middle_material.clone());
        media.push(sample.outer_material.clone());
    }
    let alphas: Vec<f32> = media.iter().map(Material::diffusivity).collect();

    let ambient_c = container.ambient.to_celsius().as_f32();
    let fill_c = container.fill_temperature().to_celsius().as_f32();
    let fill_is_fixed = container.liquid_fill.is_some();

    let cell_count = nx * ny;
    let mut temperature = ScalarField::with_value(nx, ny, ambient_c);
    let mut medium = vec![0u16; cell_count];
    let mut diffusivity = vec![alphas[0]; cell_count];
    let mut boundary = vec![true; cell_count];
    let mut owner = vec![None; cell_count];
    let mut cells_by_sample: FxHashMap<_, Vec<usize>> = samples
        .iter()
        .map(|sample| (sample.id, Vec::new()))
        .collect();

    let step = downsample as f32;
    for gy in 0..ny {
        for gx in 0..nx {
            let idx = gy * nx + gx;
            let world = Point2::new(gx as f32 * step, gy as f32 * step);
            match classify_point(container, samples, &radii, world) {
                PointClass::Exterior => {
                    // Defaults already describe exterior cells.
                }
                PointClass::Fill => {
                    medium[idx] = 1;
                    diffusivity[idx] = alphas[1];
                    boundary[idx] = fill_is_fixed;
                    temperature.data[idx] = fill_c;
                }
                PointClass::SampleLayer { index, layer } => {
                    let layer_offset = match layer {
                        Layer::Core => 0,
                        Layer::Middle => 1,
                        Layer::Outer => 2,
                    };
                    let palette = 2 + index * 3 + layer_offset;
                    medium[idx] = palette as u16;
                    diffusivity[idx] = alphas[palette];
                    boundary[idx] = false;
                    temperature.data[idx] =
                        samples[index].initial_temperature.to_celsius().as_f32();
                    owner[idx] = Some(samples[index].id);
                    cells_by_sample
                        .entry(samples[index].id)
                        .or_default()
                        .push(idx);
                }
            }
        }
    }

    debug!(
        nx,
        ny,
        samples = samples.len(),
        fixed_fill = fill_is_fixed,
        "classified grid"
    );

    let next_temperature = temperature.clone();
    Ok(ThermalGrid {
        nx,
        ny,
        cell_size_m: step / DISPLAY_UNITS_PER_INCH * METERS_PER_INCH,
        cell_size_px: step,
        temperature,
        next_temperature,
        media,
        medium,
        diffusivity,
        boundary,
        owner,
        cells_by_sample,
        ambient_c,
    })
}
