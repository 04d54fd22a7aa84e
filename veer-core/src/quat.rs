use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit quaternion for orientation tracking.
///
/// Only the operations the look-direction integrator needs are provided:
/// constructing the rotation between two directions, spherical interpolation,
/// and rotating a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Shortest-arc rotation taking unit vector `from` to unit vector `to`.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Quat {
        let mut r = from.dot(to) + 1.0;
        if r < f32::EPSILON {
            // Antiparallel: pick any axis orthogonal to `from`.
            r = 0.0;
            let q = if from.x.abs() > from.z.abs() {
                Quat::new(-from.y, from.x, 0.0, r)
            } else {
                Quat::new(0.0, -from.z, from.y, r)
            };
            return q.normalized();
        }
        let axis = from.cross(to);
        Quat::new(axis.x, axis.y, axis.z, r).normalized()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalized(self) -> Quat {
        let len = self.length();
        if len <= f32::EPSILON {
            Quat::IDENTITY
        } else {
            Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
        }
    }

    /// Angle of the rotation between `self` and `other`, in radians.
    pub fn angle_to(self, other: Quat) -> f32 {
        let dot = (self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w)
            .clamp(-1.0, 1.0);
        2.0 * dot.abs().acos()
    }

    /// Spherical interpolation from `self` toward `other` by `t` in `[0, 1]`.
    pub fn slerp(self, other: Quat, t: f32) -> Quat {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return other;
        }

        let mut cos_half = self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;
        // Take the short way around.
        let other = if cos_half < 0.0 {
            cos_half = -cos_half;
            Quat::new(-other.x, -other.y, -other.z, -other.w)
        } else {
            other
        };

        if cos_half >= 1.0 - f32::EPSILON {
            // Nearly identical: linear blend keeps things stable.
            return Quat::new(
                self.x + (other.x - self.x) * t,
                self.y + (other.y - self.y) * t,
                self.z + (other.z - self.z) * t,
                self.w + (other.w - self.w) * t,
            )
            .normalized();
        }

        let half_angle = cos_half.clamp(-1.0, 1.0).acos();
        let sin_half = half_angle.sin();
        let a = ((1.0 - t) * half_angle).sin() / sin_half;
        let b = (t * half_angle).sin() / sin_half;

        Quat::new(
            self.x * a + other.x * b,
            self.y * a + other.y * b,
            self.z * a + other.z * b,
            self.w * a + other.w * b,
        )
        .normalized()
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        let uuv = u.cross(uv);
        v + (uv * self.w + uuv) * 2.0
    }
}
