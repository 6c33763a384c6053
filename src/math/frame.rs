use super::Vec3;

/// 3x3 rotation frame. Columns are the local axes expressed in world space:
/// right (+X), up (+Y) and forward (+Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub cols: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub const fn identity() -> Self {
        Self {
            cols: [Vec3::X, Vec3::Y, Vec3::Z],
        }
    }

    pub fn from_cols(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self {
            cols: [right, up, forward],
        }
    }

    /// Rotation of `angle` radians about `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_cols(
            Vec3::X.rotate_around(axis, angle),
            Vec3::Y.rotate_around(axis, angle),
            Vec3::Z.rotate_around(axis, angle),
        )
    }

    /// Euler rotation applied X first, then Y, then Z
    pub fn from_euler_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_axis_angle(Vec3::Z, z)
            .mul(&Self::from_axis_angle(Vec3::Y, y))
            .mul(&Self::from_axis_angle(Vec3::X, x))
    }

    pub fn right(&self) -> Vec3 {
        self.cols[0]
    }

    pub fn up(&self) -> Vec3 {
        self.cols[1]
    }

    pub fn forward(&self) -> Vec3 {
        self.cols[2]
    }

    pub fn transform(&self, v: Vec3) -> Vec3 {
        self.cols[0].scale(v.x) + self.cols[1].scale(v.y) + self.cols[2].scale(v.z)
    }

    pub fn mul(&self, other: &Mat3) -> Self {
        Self {
            cols: other.cols.map(|c| self.transform(c)),
        }
    }

    /// Rotate the whole frame about a world-space axis
    pub fn rotated_world(&self, axis: Vec3, angle: f32) -> Self {
        Self::from_axis_angle(axis, angle).mul(self).orthonormalized()
    }

    /// Rotate the frame about one of its own axes (given in local coordinates)
    pub fn rotated_local(&self, local_axis: Vec3, angle: f32) -> Self {
        self.rotated_world(self.transform(local_axis), angle)
    }

    /// Gram-Schmidt re-orthonormalisation keeping the forward axis fixed
    pub fn orthonormalized(&self) -> Self {
        let forward = self.forward().normalize();
        let right = self.up().cross(&forward).normalize();
        let up = forward.cross(&right);
        Self::from_cols(right, up, forward)
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(Vec3::is_finite)
    }
}
