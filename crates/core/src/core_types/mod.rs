//! Core value types: units, materials, samples, containers

pub mod container;
pub mod material;
pub mod sample;
pub mod units;

pub use container::{Container, ContainerShape, LiquidFill};
pub use material::Material;
pub use sample::{
    Layer, LayerRadii, LayerSpec, PeltierClamp, Sample, SampleConfigError, SampleId, SizeClass,
};
pub use units::{Celsius, Fahrenheit, Inches, Seconds, DISPLAY_UNITS_PER_INCH, METERS_PER_INCH};
