/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use folio_core::{
    BodyTransform, Camera, Geometry, Material, MeshId, Rgba, SceneBackend, Surface2d, Viewport,
    WireScene,
};
use std::io::Write;

/// Character luminosity ramp for coverage (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Size of one terminal cell in virtual pixels
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

/// Alphas on the page are faint; boost them so they register on the ramp
const ALPHA_GAIN: f32 = 5.0;

/// Virtual pixel viewport covered by a terminal of `cols` x `rows`
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

/// Character grid that accepts 2D drawing calls in virtual pixels
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    coverage: Vec<f32>,
    colors: Vec<Rgba>,
}

impl AsciiCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let size = cols as usize * rows as usize;
        Self {
            width: cols as usize,
            height: rows as usize,
            coverage: vec![0.0; size],
            colors: vec![Rgba::new(0, 0, 0, 0.0); size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Character shown for a cell, or `None` when out of range
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(ramp_char(self.coverage[row * self.width + col]))
    }

    fn plot(&mut self, col: i64, row: i64, color: Rgba) {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        let level = (color.a * ALPHA_GAIN).min(1.0);
        if level > self.coverage[idx] {
            self.coverage[idx] = level;
            self.colors[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = ramp_char(self.coverage[idx]);
                let Rgba { r, g, b, .. } = self.colors[idx];

                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface2d for AsciiCanvas {
    fn resize(&mut self, viewport: Viewport) {
        let cols = (viewport.width / CELL_WIDTH).round().max(0.0) as u16;
        let rows = (viewport.height / CELL_HEIGHT).round().max(0.0) as u16;
        *self = AsciiCanvas::new(cols, rows);
    }

    fn clear(&mut self) {
        for i in 0..self.coverage.len() {
            self.coverage[i] = 0.0;
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, _radius: f32, color: Rgba) {
        // A node is smaller than a cell; one cell is the whole disc
        self.plot(
            (x / CELL_WIDTH).floor() as i64,
            (y / CELL_HEIGHT).floor() as i64,
            color,
        );
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), _width: f32, color: Rgba) {
        let (x0, y0) = (from.0 / CELL_WIDTH, from.1 / CELL_HEIGHT);
        let (x1, y1) = (to.0 / CELL_WIDTH, to.1 / CELL_HEIGHT);

        // DDA over cells
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0);
        if !steps.is_finite() || steps > 10_000.0 {
            return;
        }
        let n = steps as i64;
        for i in 0..=n {
            let t = i as f32 / steps;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x.floor() as i64, y.floor() as i64, color);
        }
    }
}

/// Scene backend that strokes every mesh edge onto an [`AsciiCanvas`]
pub struct AsciiScene {
    canvas: AsciiCanvas,
    scene: WireScene,
    viewport: Viewport,
}

impl AsciiScene {
    pub fn new(viewport: Viewport) -> Self {
        let mut canvas = AsciiCanvas::new(0, 0);
        canvas.resize(viewport);
        Self {
            canvas,
            scene: WireScene::new(),
            viewport,
        }
    }

    pub fn canvas(&self) -> &AsciiCanvas {
        &self.canvas
    }
}

impl SceneBackend for AsciiScene {
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
        self.viewport = viewport;
        self.canvas.resize(viewport);
    }

    fn render(&mut self, camera: &Camera) {
        self.canvas.clear();
        for segment in self.scene.project(camera, self.viewport) {
            self.canvas.stroke_line(
                (segment.from.x, segment.from.y),
                (segment.to.x, segment.to.y),
                1.0,
                segment.color,
            );
        }
    }
}

fn ramp_char(level: f32) -> char {
    let index = (level * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::color::{BLUE, PURPLE};

    #[test]
    fn test_resize_matches_cells() {
        let mut canvas = AsciiCanvas::new(1, 1);
        canvas.resize(viewport_for(80, 24));
        assert_eq!(canvas.size(), (80, 24));
    }

    #[test]
    fn test_circle_lights_one_cell() {
        let mut canvas = AsciiCanvas::new(10, 10);
        canvas.fill_circle(25.0, 45.0, 2.0, BLUE.with_alpha(0.5));
        assert_eq!(canvas.cell(2, 2), Some('@'));
        assert_eq!(canvas.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_horizontal_line_covers_row() {
        let mut canvas = AsciiCanvas::new(10, 3);
        canvas.stroke_line((0.0, 25.0), (99.0, 25.0), 1.0, PURPLE.with_alpha(0.2));
        for col in 0..10 {
            assert_ne!(canvas.cell(col, 1), Some(' '));
        }
        assert_eq!(canvas.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut canvas = AsciiCanvas::new(4, 4);
        canvas.fill_circle(-100.0, -100.0, 1.0, BLUE);
        canvas.stroke_line((-50.0, -50.0), (500.0, 500.0), 1.0, BLUE);
        assert_eq!(canvas.cell(4, 4), None);
    }

    #[test]
    fn test_clear_resets_coverage() {
        let mut canvas = AsciiCanvas::new(4, 4);
        canvas.fill_circle(5.0, 5.0, 1.0, BLUE);
        canvas.clear();
        assert_eq!(canvas.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_scene_render_draws_sphere() {
        let viewport = viewport_for(120, 40);
        let mut scene = AsciiScene::new(viewport);
        let id = scene.create_mesh(
            Geometry::Icosahedron {
                radius: 10.0,
                detail: 1,
            },
            Material {
                color: BLUE.with_alpha(0.2),
            },
        );
        scene.add_to_scene(id);
        scene.render(&Camera::new(viewport));

        let canvas = scene.canvas();
        let lit = (0..120)
            .flat_map(|col| (0..40).map(move |row| (col, row)))
            .filter(|&(col, row)| canvas.cell(col, row) != Some(' '))
            .count();
        assert!(lit > 0);
        // Everything stays inside the middle half of the screen
        assert_eq!(canvas.cell(0, 0), Some(' '));
        assert_eq!(canvas.cell(119, 39), Some(' '));
    }
}
