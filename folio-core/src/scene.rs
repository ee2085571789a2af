/// Drawing-surface capabilities and a backend-neutral wireframe scene
use crate::color::Rgba;
use crate::geometry::{Geometry, WireMesh};
use crate::projection::{Camera, ScreenPoint};
use crate::transform::BodyTransform;
use crate::viewport::Viewport;

/// Handle to a mesh owned by a [`SceneBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Flat, unlit material; `color.a` is the opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgba,
}

/// What the 3D backdrop needs from a graphics binding.
///
/// Meshes are created once and then moved around by handle; the backend
/// decides how to turn them into pixels.
pub trait SceneBackend {
    fn create_mesh(&mut self, geometry: Geometry, material: Material) -> MeshId;
    fn add_to_scene(&mut self, mesh: MeshId);
    fn set_transform(&mut self, mesh: MeshId, transform: &BodyTransform);
    /// Match the output size to a new viewport
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, camera: &Camera);
}

/// What the node graph needs from a 2D canvas
pub trait Surface2d {
    /// Resize the backing store to the viewport
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba);
}

impl<T: SceneBackend + ?Sized> SceneBackend for &mut T {
    fn create_mesh(&mut self, geometry: Geometry, material: Material) -> MeshId {
        (**self).create_mesh(geometry, material)
    }

    fn add_to_scene(&mut self, mesh: MeshId) {
        (**self).add_to_scene(mesh)
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &BodyTransform) {
        (**self).set_transform(mesh, transform)
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport)
    }

    fn render(&mut self, camera: &Camera) {
        (**self).render(camera)
    }
}

impl<T: Surface2d + ?Sized> Surface2d for &mut T {
    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        (**self).fill_circle(x, y, radius, color)
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        (**self).stroke_line(from, to, width, color)
    }
}

/// A projected edge ready to be stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub color: Rgba,
}

struct SceneObject {
    mesh: WireMesh,
    material: Material,
    transform: BodyTransform,
    in_scene: bool,
}

/// Retained-mode store of wire meshes that line-drawing backends share.
///
/// Backends that can only stroke lines (2D canvas, terminal) keep one of
/// these and turn it into [`Segment`]s at render time.
#[derive(Default)]
pub struct WireScene {
    objects: Vec<SceneObject>,
}

impl WireScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, geometry: Geometry, material: Material) -> MeshId {
        self.objects.push(SceneObject {
            mesh: geometry.build(),
            material,
            transform: BodyTransform::identity(),
            in_scene: false,
        });
        MeshId(self.objects.len() - 1)
    }

    pub fn add(&mut self, id: MeshId) {
        if let Some(object) = self.objects.get_mut(id.0) {
            object.in_scene = true;
        }
    }

    pub fn set_transform(&mut self, id: MeshId, transform: &BodyTransform) {
        if let Some(object) = self.objects.get_mut(id.0) {
            object.transform = *transform;
        }
    }

    /// Number of meshes added to the scene
    pub fn len(&self) -> usize {
        self.objects.iter().filter(|o| o.in_scene).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Project every edge of every mesh in the scene; edges with an endpoint
    /// behind the camera are dropped
    pub fn project(&self, camera: &Camera, viewport: Viewport) -> Vec<Segment> {
        let mut segments = Vec::new();

        for object in self.objects.iter().filter(|o| o.in_scene) {
            let model = object.transform.model_matrix();
            let projected: Vec<Option<ScreenPoint>> = object
                .mesh
                .vertices
                .iter()
                .map(|v| camera.project_to_screen(v, &model, viewport))
                .collect();

            for &(a, b) in &object.mesh.edges {
                if let (Some(from), Some(to)) = (projected[a], projected[b]) {
                    segments.push(Segment {
                        from,
                        to,
                        color: object.material.color,
                    });
                }
            }
        }

        segments
    }
}
