//! Material catalog with thermal constants
//!
//! Materials are immutable values shared across cells and sample layers.
//! An edit never mutates in place; it produces a new `Material` value and
//! the grid is rebuilt around it.

use serde::{Deserialize, Serialize};

use super::units::Inches;

/// A named substance with the constants the diffusion solver needs.
///
/// `emissivity` and `wall_thickness` are carried for the rendering layer
/// (surface shading and container-wall outlines) and are ignored by the
/// solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Thermal conductivity k (W/(m·K))
    pub conductivity: f32,
    /// Specific heat capacity c (J/(kg·K))
    pub specific_heat: f32,
    /// Density ρ (kg/m³)
    pub density: f32,
    /// Surface emissivity (0-1), presentation only
    #[serde(default)]
    pub emissivity: Option<f32>,
    /// Wall thickness for container materials, presentation only
    #[serde(default)]
    pub wall_thickness: Option<Inches>,
}

impl Material {
    /// Create a material from raw constants.
    #[must_use]
    pub fn new(name: impl Into<String>, conductivity: f32, specific_heat: f32, density: f32) -> Self {
        Material {
            name: name.into(),
            conductivity,
            specific_heat,
            density,
            emissivity: None,
            wall_thickness: None,
        }
    }

    /// Thermal diffusivity α = k / (ρ·c) in m²/s.
    ///
    /// This is the per-cell coefficient of the explicit Laplacian update.
    #[inline]
    #[must_use]
    pub fn diffusivity(&self) -> f32 {
        self.conductivity / (self.density * self.specific_heat)
    }

    /// Still air at room temperature. Also the medium outside the container.
    #[must_use]
    pub fn ambient_air() -> Self {
        Material::new("Air", 0.026, 1005.0, 1.204)
    }

    /// Water near 25°C
    #[must_use]
    pub fn water() -> Self {
        Material::new("Water", 0.606, 4186.0, 997.0)
    }

    /// Light mineral oil, the usual circulator-bath fill
    #[must_use]
    pub fn mineral_oil() -> Self {
        Material::new("Mineral oil", 0.138, 1900.0, 870.0)
    }

    /// Glycerol (high-viscosity bath fill)
    #[must_use]
    pub fn glycerol() -> Self {
        Material::new("Glycerol", 0.285, 2430.0, 1260.0)
    }

    /// Solid paraffin wax (low-conductivity insulator and sample core stock)
    #[must_use]
    pub fn paraffin_wax() -> Self {
        Material::new("Paraffin wax", 0.25, 2900.0, 900.0)
    }

    /// Agar gel sample medium (thermally close to water, but solid)
    #[must_use]
    pub fn agar_gel() -> Self {
        Material::new("Agar gel", 0.55, 4000.0, 1030.0)
    }

    /// Borosilicate glass (vial walls)
    #[must_use]
    pub fn borosilicate_glass() -> Self {
        Material::new("Borosilicate glass", 1.14, 830.0, 2230.0)
    }

    /// 304 stainless steel (canister shells)
    #[must_use]
    pub fn stainless_steel() -> Self {
        Material::new("Stainless steel", 16.2, 500.0, 8000.0)
    }

    /// Cast acrylic (sample sleeves, container walls)
    #[must_use]
    pub fn acrylic() -> Self {
        Material::new("Acrylic", 0.19, 1470.0, 1180.0)
    }

    /// Alumina ceramic (insert sleeves for dry blocks)
    #[must_use]
    pub fn ceramic_alumina() -> Self {
        Material::new("Alumina ceramic", 30.0, 880.0, 3950.0)
    }

    /// Aluminum 6061, the dry-block calibrator body
    #[must_use]
    pub fn aluminum() -> Self {
        Material::new("Aluminum", 237.0, 897.0, 2700.0)
    }
}
