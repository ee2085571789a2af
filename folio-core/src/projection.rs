/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::viewport::Viewport;

/// Perspective camera looking at the scene origin
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// A point after projection: pixel coordinates plus normalized depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 30.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75f32.to_radians(),
            aspect: viewport.aspect(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Follow a viewport resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to screen space.
    ///
    /// Points behind the near plane yield `None`. Points outside the frustum
    /// sideways are still returned so partially visible edges can be drawn
    /// and clipped by the surface.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        viewport: Viewport,
    ) -> Option<ScreenPoint> {
        let eye = (self.view_matrix() * model_matrix).transform_point(point);

        // Camera looks down -z
        if eye.z > -self.near {
            return None;
        }

        let ndc = self.projection_matrix().transform_point(&eye);

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * viewport.width,
            y: (1.0 - ndc.y) * 0.5 * viewport.height,
            depth: ndc.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewport::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Viewport::new(800.0, 600.0));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.position.z, 30.0);
    }

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut camera = Camera::default();
        camera.set_viewport(Viewport::new(1600.0, 400.0));
        assert!((camera.aspect - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let viewport = Viewport::new(1024.0, 768.0);
        let camera = Camera::new(viewport);
        let p = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), viewport)
            .unwrap();
        assert!((p.x - 512.0).abs() < 1e-3);
        assert!((p.y - 384.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let viewport = Viewport::new(1024.0, 768.0);
        let camera = Camera::new(viewport);
        let behind = Point3::new(0.0, 0.0, 40.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), viewport)
            .is_none());
    }

    #[test]
    fn test_up_is_screen_up() {
        let viewport = Viewport::new(1000.0, 1000.0);
        let camera = Camera::new(viewport);
        let p = camera
            .project_to_screen(&Point3::new(0.0, 5.0, 0.0), &Matrix4::identity(), viewport)
            .unwrap();
        assert!(p.y < 500.0);
    }
}
