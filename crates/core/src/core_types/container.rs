//! Container geometry, fill medium and ambient conditions

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::material::Material;
use super::units::Fahrenheit;

/// Container footprint on the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerShape {
    /// `width` is the diameter; `height` is ignored
    Circle,
    /// Axis-aligned `width` x `height` box
    Rectangle,
}

/// A liquid fill held at a controlled temperature.
///
/// Liquid fill is modeled as a fixed-temperature boundary, not a diffusing
/// medium: a stirred bath is effectively isothermal at the grid's scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidFill {
    pub temperature: Fahrenheit,
}

/// The vessel holding the samples.
///
/// The container is anchored at the display origin: a rectangle spans
/// `[0, width] x [0, height]`, a circle is inscribed in `[0, width]²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub shape: ContainerShape,
    /// Width in display units (diameter for circles)
    pub width: f32,
    /// Height in display units (ignored for circles)
    pub height: f32,
    pub fill: Material,
    pub ambient: Fahrenheit,
    #[serde(default)]
    pub liquid_fill: Option<LiquidFill>,
}

impl Container {
    /// Circular container of the given diameter.
    #[must_use]
    pub fn circle(diameter: f32, fill: Material, ambient: Fahrenheit) -> Self {
        Container {
            shape: ContainerShape::Circle,
            width: diameter,
            height: diameter,
            fill,
            ambient,
            liquid_fill: None,
        }
    }

    /// Rectangular container.
    #[must_use]
    pub fn rectangle(width: f32, height: f32, fill: Material, ambient: Fahrenheit) -> Self {
        Container {
            shape: ContainerShape::Rectangle,
            width,
            height,
            fill,
            ambient,
            liquid_fill: None,
        }
    }

    /// Mark the fill as a stirred liquid held at `temperature`.
    #[must_use]
    pub fn with_liquid_fill(mut self, temperature: Fahrenheit) -> Self {
        self.liquid_fill = Some(LiquidFill { temperature });
        self
    }

    /// Geometric center in display units.
    #[must_use]
    pub fn center(&self) -> Point2<f32> {
        match self.shape {
            ContainerShape::Circle => Point2::new(self.width / 2.0, self.width / 2.0),
            ContainerShape::Rectangle => Point2::new(self.width / 2.0, self.height / 2.0),
        }
    }

    /// Whether a display-space point lies inside the container.
    #[must_use]
    pub fn contains(&self, point: Point2<f32>) -> bool {
        match self.shape {
            ContainerShape::Circle => {
                let radius = self.width / 2.0;
                nalgebra::distance(&self.center(), &point) <= radius
            }
            ContainerShape::Rectangle => {
                point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
            }
        }
    }

    /// Temperature the fill starts at (and, for liquid fill, is held at).
    #[must_use]
    pub fn fill_temperature(&self) -> Fahrenheit {
        self.liquid_fill
            .map_or(self.ambient, |liquid| liquid.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_containment_is_euclidean() {
        let tub = Container::circle(600.0, Material::water(), Fahrenheit::new(70.0));
        assert!(tub.contains(Point2::new(300.0, 300.0)));
        assert!(tub.contains(Point2::new(300.0, 10.0)));
        // Corner of the bounding box is outside the inscribed circle
        assert!(!tub.contains(Point2::new(10.0, 10.0)));
    }

    #[test]
    fn rectangle_containment_is_axis_aligned() {
        let tray = Container::rectangle(400.0, 200.0, Material::mineral_oil(), Fahrenheit::new(70.0));
        assert!(tray.contains(Point2::new(399.0, 199.0)));
        assert!(!tray.contains(Point2::new(401.0, 100.0)));
    }

    #[test]
    fn liquid_fill_overrides_fill_temperature() {
        let plain = Container::circle(100.0, Material::water(), Fahrenheit::new(70.0));
        assert_eq!(plain.fill_temperature(), Fahrenheit::new(70.0));
        let bath = plain.with_liquid_fill(Fahrenheit::new(98.6));
        assert_eq!(bath.fill_temperature(), Fahrenheit::new(98.6));
    }
}
