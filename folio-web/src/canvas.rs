//! Canvas 2D drawing surfaces for both animations

use folio_core::{
    BodyTransform, Camera, Geometry, Material, MeshId, Rgba, SceneBackend, Surface2d, Viewport,
    WireScene,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` with its 2D context
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Failed to get 2D context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        Ok(WebCanvas {
            canvas,
            context,
            viewport,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Surface2d for WebCanvas {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.context.begin_path();
        if let Err(err) = self.context.arc(
            x as f64,
            y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", err);
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(&color.css()));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.context.begin_path();
        self.context.move_to(from.0 as f64, from.1 as f64);
        self.context.line_to(to.0 as f64, to.1 as f64);
        self.context.set_stroke_style(&JsValue::from_str(&color.css()));
        self.context.set_line_width(width as f64);
        self.context.stroke();
    }
}

/// Scene backend that strokes every projected mesh edge onto a [`WebCanvas`]
pub struct WebScene {
    canvas: WebCanvas,
    scene: WireScene,
}

impl WebScene {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        Ok(Self {
            canvas: WebCanvas::new(canvas)?,
            scene: WireScene::new(),
        })
    }
}

impl SceneBackend for WebScene {
    fn create_mesh(&mut self, geometry: Geometry, material: Material) -> MeshId {
        self.scene.create(geometry, material)
    }

    fn add_to_scene(&mut self, mesh: MeshId) {
        self.scene.add(mesh);
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &BodyTransform) {
        self.scene.set_transform(mesh, transform);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport);
    }

    fn render(&mut self, camera: &Camera) {
        self.canvas.clear();
        for segment in self.scene.project(camera, self.canvas.viewport()) {
            self.canvas.stroke_line(
                (segment.from.x, segment.from.y),
                (segment.to.x, segment.to.y),
                1.0,
                segment.color,
            );
        }
    }
}
