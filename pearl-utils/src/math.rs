//! Small vector type for entity positions.

use glam::DVec3;

/// A three component vector. Positions use `Vector3<f64>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3<T> {
    /// The x component.
    pub x: T,
    /// The y component.
    pub y: T,
    /// The z component.
    pub z: T,
}

impl<T> Vector3<T> {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Vector3<f64> {
    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }

    /// Returns this position moved by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<Vector3<f64>> for DVec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
