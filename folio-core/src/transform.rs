/// Rotation, placement and easing for scene objects
use nalgebra::{Matrix4, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Pull the x and y angles a fraction of the way toward a target.
    ///
    /// `z` is left alone; parallax only tilts and pans.
    pub fn ease_toward(&mut self, target_x: f32, target_y: f32, factor: f32) {
        self.x = ease(self.x, target_x, factor);
        self.y = ease(self.y, target_y, factor);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// One step of exponential smoothing: `current + factor * (target - current)`
pub fn ease(current: f32, target: f32, factor: f32) -> f32 {
    current + factor * (target - current)
}

/// Position, orientation and uniform scale of a mesh in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: f32,
}

impl BodyTransform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: 1.0,
        }
    }

    /// Model matrix: translate * rotate * scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.position.x, self.position.y, self.position.z)
            * Transform::rotation_matrix(&self.rotation)
            * Transform::scale_matrix(self.scale, self.scale, self.scale)
    }
}

impl Default for BodyTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state (XYZ Euler order)
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_ease_moves_fraction_of_gap() {
        assert!((ease(0.0, 1.0, 0.05) - 0.05).abs() < 1e-6);
        assert!((ease(2.0, 2.0, 0.05) - 2.0).abs() < 1e-6);
        assert!((ease(1.0, 0.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_toward_leaves_z() {
        let mut state = RotationState::new(0.0, 0.0, 0.7);
        state.ease_toward(1.0, -1.0, 0.1);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y + 0.1).abs() < 1e-6);
        assert_eq!(state.z, 0.7);
    }

    #[test]
    fn test_model_matrix_translates_and_scales() {
        let transform = BodyTransform {
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation: RotationState::zero(),
            scale: 2.0,
        };
        let p = transform
            .model_matrix()
            .transform_point(&nalgebra::Point3::new(1.0, 1.0, 1.0));
        assert!((p.x - 3.0).abs() < 1e-6);
        assert!((p.y - 4.0).abs() < 1e-6);
        assert!((p.z - 5.0).abs() < 1e-6);
    }
}
