// Node transform as written by 3ds Max ASCII exports.
//
// The exporter writes four rows (*TM_ROW0..*TM_ROW3): the local X, Y and Z
// axes followed by the translation, using the row-vector convention.
// glam is column-vector, so each row becomes a column of the Mat4.

use glam::{Mat4, Vec3};

/// Row-major 4x3 affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4x3 {
    /// Rows 0..2 are the basis axes, row 3 is the translation.
    pub rows: [Vec3; 4],
}

impl Matrix4x3 {
    pub const IDENTITY: Matrix4x3 = Matrix4x3 {
        rows: [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ZERO],
    };

    /// Build a transform from its four rows.
    pub fn from_rows(rows: [Vec3; 4]) -> Self {
        Self { rows }
    }

    /// The translation row.
    pub fn translation(&self) -> Vec3 {
        self.rows[3]
    }

    /// Convert to a column-major `Mat4` suitable for glam math.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(
            self.rows[0].extend(0.0),
            self.rows[1].extend(0.0),
            self.rows[2].extend(0.0),
            self.rows[3].extend(1.0),
        )
    }

    /// Transform a point (applies the translation row).
    pub fn transform_point3(&self, point: Vec3) -> Vec3 {
        self.rows[0] * point.x + self.rows[1] * point.y + self.rows[2] * point.z + self.rows[3]
    }

    /// Transform a direction (ignores the translation row).
    pub fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        self.rows[0] * vector.x + self.rows[1] * vector.y + self.rows[2] * vector.z
    }
}

impl Default for Matrix4x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_to_mat4() {
        assert_eq!(Matrix4x3::IDENTITY.to_mat4(), Mat4::IDENTITY);
        assert_eq!(Matrix4x3::default(), Matrix4x3::IDENTITY);
    }

    #[test]
    fn test_transform_point3_translation() {
        let mut m = Matrix4x3::IDENTITY;
        m.rows[3] = Vec3::new(10.0, 20.0, 30.0);

        let p = m.transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vec3::new(11.0, 22.0, 33.0));
        assert_eq!(m.translation(), Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_transform_vector3_no_translation() {
        let mut m = Matrix4x3::IDENTITY;
        m.rows[3] = Vec3::new(10.0, 20.0, 30.0);

        // Translation should NOT affect vectors
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rows_match_mat4() {
        // 90 degree rotation around Z: X axis maps to Y, Y axis maps to -X
        let m = Matrix4x3::from_rows([
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(5.0, 0.0, 0.0),
        ]);
        let p = Vec3::new(1.0, 2.0, 3.0);

        let expected = m.to_mat4().transform_point3(p);
        let actual = m.transform_point3(p);
        assert!((expected - actual).length() < 1e-6);
        assert!((actual - Vec3::new(3.0, 1.0, 3.0)).length() < 1e-6);
    }
}
