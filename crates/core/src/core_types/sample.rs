//! Layered cylindrical samples and their configuration invariants

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::material::Material;
use super::units::{Fahrenheit, Inches};

/// Opaque sample identity. Stable across re-initializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SampleId(pub u32);

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample#{}", self.0)
    }
}

/// The two supported nominal sample sizes for thickness-based layer specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    /// 4 in outer diameter jar (nominal radius 40 display units)
    Compact,
    /// 6 in outer diameter jar (nominal radius 60 display units)
    Full,
}

impl SizeClass {
    /// Nominal outer radius in display units
    #[must_use]
    pub fn nominal_radius(self) -> f32 {
        match self {
            SizeClass::Compact => 40.0,
            SizeClass::Full => 60.0,
        }
    }
}

/// How the three concentric layers of a sample are sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LayerSpec {
    /// Radius fractions of the declared outer radius,
    /// `0 < core <= middle <= outer <= 1`.
    Fractions { core: f32, middle: f32, outer: f32 },
    /// Explicit shell thicknesses for the middle and outer layers against a
    /// nominal size class; the core is whatever radius remains.
    Thickness {
        size: SizeClass,
        middle: Inches,
        outer: Inches,
    },
}

/// Resolved layer boundaries in display units, `core < middle < outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerRadii {
    pub core: f32,
    pub middle: f32,
    pub outer: f32,
}

/// The concentric layer a point falls in, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Core,
    Middle,
    Outer,
}

impl LayerRadii {
    /// Layer for a radial distance from the sample center, or `None` when
    /// the point lies outside the outer boundary.
    #[inline]
    #[must_use]
    pub fn layer_at(&self, distance: f32) -> Option<Layer> {
        if distance <= self.core {
            Some(Layer::Core)
        } else if distance <= self.middle {
            Some(Layer::Middle)
        } else if distance <= self.outer {
            Some(Layer::Outer)
        } else {
            None
        }
    }
}

/// Invalid sample layer configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleConfigError {
    /// Declared outer radius must be positive
    NonPositiveRadius(SampleId),
    /// A fraction fell outside (0, 1]
    FractionOutOfRange(SampleId),
    /// Resolved radii violate `core < middle < outer <= radius`
    LayerOrdering {
        id: SampleId,
        core: f32,
        middle: f32,
        outer: f32,
        radius: f32,
    },
}

impl fmt::Display for SampleConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleConfigError::NonPositiveRadius(id) => {
                write!(f, "{id}: outer radius must be positive")
            }
            SampleConfigError::FractionOutOfRange(id) => {
                write!(f, "{id}: layer fractions must lie in (0, 1]")
            }
            SampleConfigError::LayerOrdering {
                id,
                core,
                middle,
                outer,
                radius,
            } => write!(
                f,
                "{id}: layer radii must satisfy core < middle < outer <= radius \
                 (got {core:.1} / {middle:.1} / {outer:.1}, radius {radius:.1})"
            ),
        }
    }
}

impl std::error::Error for SampleConfigError {}

/// Active thermoelectric clamp holding every owned cell at a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeltierClamp {
    pub target: Fahrenheit,
    pub active: bool,
}

/// A layered cylindrical sample sitting in the container.
///
/// `current_temperature` is derived state: the facade recomputes it from
/// the grid after every tick. It is never an input to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub name: String,
    /// Center position in display units
    pub position: Point2<f32>,
    /// Declared outer radius in display units
    pub radius: f32,
    pub core_material: Material,
    pub middle_material: Material,
    pub outer_material: Material,
    pub layers: LayerSpec,
    pub initial_temperature: Fahrenheit,
    #[serde(default)]
    pub peltier: Option<PeltierClamp>,
    /// Mean temperature over owned cells, refreshed each tick
    #[serde(default)]
    pub current_temperature: Fahrenheit,
}

impl Sample {
    /// Create a sample with equal-thirds layer fractions and no clamp.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SampleId,
        name: impl Into<String>,
        position: Point2<f32>,
        radius: f32,
        core_material: Material,
        middle_material: Material,
        outer_material: Material,
        initial_temperature: Fahrenheit,
    ) -> Self {
        Sample {
            id,
            name: name.into(),
            position,
            radius,
            core_material,
            middle_material,
            outer_material,
            layers: LayerSpec::Fractions {
                core: 0.4,
                middle: 0.8,
                outer: 1.0,
            },
            initial_temperature,
            peltier: None,
            current_temperature: initial_temperature,
        }
    }

    /// Replace the layer specification.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerSpec) -> Self {
        self.layers = layers;
        self
    }

    /// Attach a Peltier clamp.
    #[must_use]
    pub fn with_peltier(mut self, target: Fahrenheit, active: bool) -> Self {
        self.peltier = Some(PeltierClamp { target, active });
        self
    }

    /// Target temperature when the clamp is present and switched on.
    #[inline]
    #[must_use]
    pub fn active_clamp_target(&self) -> Option<Fahrenheit> {
        match self.peltier {
            Some(PeltierClamp { target, active: true }) => Some(target),
            _ => None,
        }
    }

    /// Material of one concentric layer.
    #[inline]
    #[must_use]
    pub fn layer_material(&self, layer: Layer) -> &Material {
        match layer {
            Layer::Core => &self.core_material,
            Layer::Middle => &self.middle_material,
            Layer::Outer => &self.outer_material,
        }
    }

    /// Resolve the layer spec against the declared radius and validate the
    /// nesting invariant `core < middle < outer <= radius`.
    ///
    /// # Errors
    /// Returns `SampleConfigError` when the spec cannot produce properly
    /// nested layer boundaries.
    pub fn resolved_radii(&self) -> Result<LayerRadii, SampleConfigError> {
        if self.radius <= 0.0 {
            return Err(SampleConfigError::NonPositiveRadius(self.id));
        }

        let (core, middle, outer) = match self.layers {
            LayerSpec::Fractions { core, middle, outer } => {
                for f in [core, middle, outer] {
                    if f <= 0.0 || f > 1.0 {
                        return Err(SampleConfigError::FractionOutOfRange(self.id));
                    }
                }
                (core * self.radius, middle * self.radius, outer * self.radius)
            }
            LayerSpec::Thickness { size, middle, outer } => {
                let rim = size.nominal_radius().min(self.radius);
                let outer_start = rim - outer.to_display_units();
                let core_end = outer_start - middle.to_display_units();
                (core_end, outer_start, rim)
            }
        };

        if core > 0.0 && core < middle && middle < outer && outer <= self.radius {
            Ok(LayerRadii { core, middle, outer })
        } else {
            Err(SampleConfigError::LayerOrdering {
                id: self.id,
                core,
                middle,
                outer,
                radius: self.radius,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_sample() -> Sample {
        Sample::new(
            SampleId(1),
            "vial A",
            Point2::new(100.0, 100.0),
            40.0,
            Material::paraffin_wax(),
            Material::agar_gel(),
            Material::borosilicate_glass(),
            Fahrenheit::new(110.0),
        )
    }

    #[test]
    fn fraction_layers_scale_with_radius() {
        let radii = base_sample().resolved_radii().unwrap();
        assert_relative_eq!(radii.core, 16.0);
        assert_relative_eq!(radii.middle, 32.0);
        assert_relative_eq!(radii.outer, 40.0);
    }

    #[test]
    fn thickness_layers_leave_core_remainder() {
        let sample = base_sample().with_layers(LayerSpec::Thickness {
            size: SizeClass::Compact,
            middle: Inches::new(1.0),
            outer: Inches::new(0.5),
        });
        let radii = sample.resolved_radii().unwrap();
        assert_relative_eq!(radii.outer, 40.0);
        assert_relative_eq!(radii.middle, 35.0);
        assert_relative_eq!(radii.core, 25.0);
    }

    #[test]
    fn inverted_fractions_are_rejected() {
        let sample = base_sample().with_layers(LayerSpec::Fractions {
            core: 0.9,
            middle: 0.5,
            outer: 1.0,
        });
        assert!(matches!(
            sample.resolved_radii(),
            Err(SampleConfigError::LayerOrdering { .. })
        ));
    }

    #[test]
    fn oversized_thickness_is_rejected() {
        let sample = base_sample().with_layers(LayerSpec::Thickness {
            size: SizeClass::Compact,
            middle: Inches::new(3.0),
            outer: Inches::new(2.0),
        });
        assert!(sample.resolved_radii().is_err());
    }

    #[test]
    fn layer_lookup_uses_nested_thresholds() {
        let radii = base_sample().resolved_radii().unwrap();
        assert_eq!(radii.layer_at(0.0), Some(Layer::Core));
        assert_eq!(radii.layer_at(20.0), Some(Layer::Middle));
        assert_eq!(radii.layer_at(39.0), Some(Layer::Outer));
        assert_eq!(radii.layer_at(41.0), None);
    }

    #[test]
    fn clamp_target_requires_active_flag() {
        let off = base_sample().with_peltier(Fahrenheit::new(110.0), false);
        assert!(off.active_clamp_target().is_none());
        let on = base_sample().with_peltier(Fahrenheit::new(110.0), true);
        assert_eq!(on.active_clamp_target(), Some(Fahrenheit::new(110.0)));
    }
}
