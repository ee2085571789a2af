/// Decorative 3D background: a slowly turning wireframe sphere with pointer
/// parallax, surrounded by drifting translucent cubes
use nalgebra::Vector3;
use rand::Rng;

use crate::color::{Rgba, BLUE};
use crate::config::BackdropConfig;
use crate::frame::Animation;
use crate::geometry::Geometry;
use crate::projection::Camera;
use crate::scene::{Material, MeshId, SceneBackend};
use crate::transform::{BodyTransform, RotationState};
use crate::viewport::Viewport;

/// A drifting cube. Never wraps or despawns; it may float out of view.
#[derive(Debug, Clone)]
pub struct FloatingBody {
    pub mesh: MeshId,
    pub transform: BodyTransform,
    pub speed_x: f32,
    pub speed_y: f32,
    pub rot_speed: f32,
    pub color: Rgba,
}

impl FloatingBody {
    fn random<R: Rng + ?Sized>(
        mesh: MeshId,
        color: Rgba,
        config: &BackdropConfig,
        rng: &mut R,
    ) -> Self {
        let [ex, ey, ez] = config.spawn_extent;
        let position = Vector3::new(centred(rng, ex), centred(rng, ey), centred(rng, ez));
        let rotation = RotationState::new(
            rng.gen::<f32>() * std::f32::consts::PI,
            rng.gen::<f32>() * std::f32::consts::PI,
            0.0,
        );
        let scale = rng.gen::<f32>() * config.max_scale;

        Self {
            mesh,
            transform: BodyTransform {
                position,
                rotation,
                scale,
            },
            speed_x: centred(rng, config.max_speed),
            speed_y: centred(rng, config.max_speed),
            rot_speed: centred(rng, config.max_speed),
            color,
        }
    }

    /// One frame of spin and drift; no bounds, no collisions
    pub fn advance(&mut self) {
        let t = &mut self.transform;
        t.rotation.rotate(self.rot_speed, self.rot_speed, 0.0);
        t.position.x += self.speed_x;
        t.position.y += self.speed_y;
    }
}

/// Owns the scene state and drives a [`SceneBackend`]
pub struct BackdropScene<B: SceneBackend> {
    backend: B,
    config: BackdropConfig,
    camera: Camera,
    viewport: Viewport,
    sphere: MeshId,
    sphere_rotation: RotationState,
    bodies: Vec<FloatingBody>,
    /// Last pointer position relative to the viewport centre, in pixels
    pointer: (f32, f32),
}

impl<B: SceneBackend> BackdropScene<B> {
    /// Build the scene on `surface`.
    ///
    /// Returns `None` without touching the backend when there is no surface
    /// or the viewport is phone-sized.
    pub fn init<R: Rng + ?Sized>(
        surface: Option<B>,
        viewport: Viewport,
        config: BackdropConfig,
        rng: &mut R,
    ) -> Option<Self> {
        let Some(mut backend) = surface else {
            log::debug!("no backdrop surface, skipping 3D background");
            return None;
        };
        if viewport.is_mobile() {
            log::info!("viewport {}px wide, skipping 3D background", viewport.width);
            return None;
        }

        backend.resize(viewport);

        let sphere = backend.create_mesh(
            Geometry::Icosahedron {
                radius: config.polyhedron_radius,
                detail: config.polyhedron_detail,
            },
            Material {
                color: config.polyhedron_color,
            },
        );
        backend.add_to_scene(sphere);

        let mut bodies = Vec::with_capacity(config.body_count);
        for _ in 0..config.body_count {
            let color = pick_color(&config.palette, rng).with_alpha(config.body_opacity);
            let mesh = backend.create_mesh(Geometry::Cube { size: 1.0 }, Material { color });
            let body = FloatingBody::random(mesh, color, &config, rng);
            backend.set_transform(mesh, &body.transform);
            backend.add_to_scene(mesh);
            bodies.push(body);
        }

        log::info!(
            "3D background ready: {} bodies at {}x{}",
            bodies.len(),
            viewport.width,
            viewport.height
        );

        Some(Self {
            backend,
            config,
            camera: Camera::new(viewport),
            viewport,
            sphere,
            sphere_rotation: RotationState::zero(),
            bodies,
            pointer: (0.0, 0.0),
        })
    }

    /// Record the raw pointer position; consumed by the next frame
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let (cx, cy) = self.viewport.center();
        self.pointer = (x - cx, y - cy);
    }

    /// Follow a viewport resize. Bodies keep their state.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        self.backend.resize(viewport);
    }

    /// Advance all state by one frame without rendering
    pub fn step(&mut self) {
        let target_y = self.pointer.0 * self.config.parallax_scale;
        let target_x = self.pointer.1 * self.config.parallax_scale;

        let [spin_x, spin_y] = self.config.spin;
        self.sphere_rotation.rotate(spin_x, spin_y, 0.0);
        // Horizontal pointer motion turns the sphere about y, vertical about x
        self.sphere_rotation
            .ease_toward(target_x, target_y, self.config.smoothing);

        for body in &mut self.bodies {
            body.advance();
        }
    }

    pub fn sphere_rotation(&self) -> RotationState {
        self.sphere_rotation
    }

    pub fn bodies(&self) -> &[FloatingBody] {
        &self.bodies
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SceneBackend> Animation for BackdropScene<B> {
    fn frame(&mut self) {
        self.step();

        self.backend.set_transform(
            self.sphere,
            &BodyTransform {
                rotation: self.sphere_rotation,
                ..BodyTransform::identity()
            },
        );
        for body in &self.bodies {
            self.backend.set_transform(body.mesh, &body.transform);
        }

        self.backend.render(&self.camera);
    }
}

/// Uniform in `[-extent / 2, extent / 2)`
fn centred<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}

fn pick_color<R: Rng + ?Sized>(palette: &[Rgba], rng: &mut R) -> Rgba {
    if palette.is_empty() {
        return BLUE;
    }
    palette[rng.gen_range(0..palette.len())]
}
