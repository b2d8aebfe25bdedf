// toolpath_shared::vector - small 3D vector used for positions, deltas and directions

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Position, displacement or direction in machine space.
///
/// Directions produced by the geometry builder are normalized in the XY
/// plane only; z rides along unnormalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the XY projection.
    pub fn planar_norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn planar_dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Largest scalar magnitude along `self` that keeps every axis component
    /// within `limits`. One axis saturates exactly; the rest stay below.
    ///
    /// Axes with a zero component never constrain. A zero vector is
    /// unconstrained and yields `f64::INFINITY`.
    pub fn limit_by_axis(&self, limits: &Vec3) -> f64 {
        let worst = (self.x.abs() / limits.x)
            .max(self.y.abs() / limits.y)
            .max(self.z.abs() / limits.z);
        if worst > 0.0 { 1.0 / worst } else { f64::INFINITY }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        self.scale(rhs)
    }
}
