//! Flat scalar field storage for grid-shaped data

/// 2D scalar field stored as a flat `Vec<f32>` in row-major order.
///
/// Each field represents one continuous property across the simulation
/// grid; the temperature double buffer is two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f32>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl ScalarField {
    /// Create a field of the given dimensions, initialized to a value.
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Flat index for a grid position.
    #[inline]
    #[must_use]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Value at a grid position.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set the value at a grid position.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Borrow the raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Borrow the raw values mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Minimum and maximum over the field. `None` for an empty field.
    #[must_use]
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let first = *self.data.first()?;
        Some(self.data.iter().fold((first, first), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }

    /// Map every value through `f`, producing a new field.
    #[must_use]
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }
}
