// Re-export glam for convenience
pub use glam::*;

// ASE math types
mod transform;
pub use transform::Matrix4x3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_extend_to_color() {
        let rgb = Vec3::new(0.25, 0.5, 0.75);
        assert_eq!(rgb.extend(1.0), Vec4::new(0.25, 0.5, 0.75, 1.0));
    }
}
