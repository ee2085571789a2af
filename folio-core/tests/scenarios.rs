//! End-to-end runs of both animations against recording surfaces

use folio_core::network::link_strength;
use folio_core::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct CountingSurface {
    size: Option<Viewport>,
    clears: usize,
    circles: usize,
    lines: usize,
}

impl Surface2d for CountingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Rgba) {
        self.circles += 1;
    }

    fn stroke_line(&mut self, _from: (f32, f32), _to: (f32, f32), _width: f32, color: Rgba) {
        assert!(color.a > 0.0, "links at or past the threshold must not be drawn");
        self.lines += 1;
    }
}

/// Scene backend that renders through the shared wireframe store
struct WireBackend {
    scene: WireScene,
    viewport: Viewport,
    segments_last_frame: usize,
    renders: usize,
}

impl WireBackend {
    fn new() -> Self {
        Self {
            scene: WireScene::new(),
            viewport: Viewport::new(0.0, 0.0),
            segments_last_frame: 0,
            renders: 0,
        }
    }
}

impl SceneBackend for WireBackend {
    fn create_mesh(&mut self, geometry: Geometry, material: Material) -> MeshId {
        self.scene.create(geometry, material)
    }

    fn add_to_scene(&mut self, mesh: MeshId) {
        self.scene.add(mesh)
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &BodyTransform) {
        self.scene.set_transform(mesh, transform)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render(&mut self, camera: &Camera) {
        self.segments_last_frame = self.scene.project(camera, self.viewport).len();
        self.renders += 1;
    }
}

#[test]
fn desktop_network_runs_in_bounds() {
    let viewport = Viewport::new(1024.0, 768.0);
    let mut canvas = NodeGraphCanvas::init(
        Some(CountingSurface::default()),
        viewport,
        NetworkConfig::default(),
        StdRng::seed_from_u64(2024),
    )
    .expect("surface present");

    assert_eq!(canvas.graph().nodes().len(), 60);
    assert_eq!(canvas.graph().profile().connect_distance, 150.0);

    run_frames(&mut canvas, 100);

    let step = 0.25 + 1e-3;
    for node in canvas.graph().nodes() {
        assert!(node.x >= -step && node.x <= viewport.width + step);
        assert!(node.y >= -step && node.y <= viewport.height + step);
    }
    assert_eq!(canvas.surface().clears, 100);
    assert_eq!(canvas.surface().circles, 60 * 100);
}

#[test]
fn shrinking_below_breakpoint_regenerates_mobile_batch() {
    let mut canvas = NodeGraphCanvas::init(
        Some(CountingSurface::default()),
        Viewport::new(1024.0, 768.0),
        NetworkConfig::default(),
        StdRng::seed_from_u64(7),
    )
    .expect("surface present");
    run_frames(&mut canvas, 10);

    let narrow = Viewport::new(500.0, 768.0);
    canvas.on_resize(narrow);

    assert_eq!(canvas.graph().nodes().len(), 30);
    assert_eq!(canvas.graph().profile().connect_distance, 100.0);
    assert_eq!(canvas.surface().size, Some(narrow));
    for node in canvas.graph().nodes() {
        assert!(node.x < 500.0);
    }
}

#[test]
fn backdrop_renders_sphere_and_cubes() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut scene = BackdropScene::init(
        Some(WireBackend::new()),
        Viewport::new(1280.0, 720.0),
        BackdropConfig::default(),
        &mut rng,
    )
    .expect("desktop viewport");

    run_frames(&mut scene, 5);

    let backend = scene.backend();
    assert_eq!(backend.renders, 5);
    assert_eq!(backend.scene.len(), 51);
    // The sphere sits in front of the camera, so its edges always project
    assert!(backend.segments_last_frame >= 120);
}

#[test]
fn backdrop_skips_mobile_entirely() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut backend = WireBackend::new();
    let scene = BackdropScene::init(
        Some(&mut backend),
        Viewport::new(600.0, 900.0),
        BackdropConfig::default(),
        &mut rng,
    );
    assert!(scene.is_none());
    assert!(backend.scene.is_empty());
    assert_eq!(backend.renders, 0);
}

proptest! {
    #[test]
    fn link_strength_decreases_with_distance(
        threshold in 1.0f32..500.0,
        a in 0.0f32..0.999,
        b in 0.0f32..0.999,
    ) {
        let (near, far) = if a < b { (a, b) } else { (b, a) };
        prop_assume!(far - near > 1e-3);
        let near = link_strength(near * threshold, threshold).unwrap();
        let far = link_strength(far * threshold, threshold).unwrap();
        prop_assert!(near > far);
    }

    #[test]
    fn no_link_at_or_beyond_threshold(threshold in 1.0f32..500.0, extra in 0.0f32..1000.0) {
        prop_assert!(link_strength(threshold + extra, threshold).is_none());
    }

    #[test]
    fn nodes_stay_within_one_step(
        seed in any::<u64>(),
        width in 1.0f32..2000.0,
        height in 1.0f32..2000.0,
    ) {
        let viewport = Viewport::new(width, height);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = NodeGraph::new(viewport, NetworkConfig::default(), &mut rng);
        let step = 0.25 + 1e-3;
        for _ in 0..200 {
            graph.step();
            for node in graph.nodes() {
                prop_assert!(node.x >= -step && node.x <= width + step);
                prop_assert!(node.y >= -step && node.y <= height + step);
            }
        }
    }

    #[test]
    fn batch_size_follows_breakpoint(seed in any::<u64>(), width in 1.0f32..3000.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = NodeGraph::new(Viewport::new(width, 600.0), NetworkConfig::default(), &mut rng);
        let expected = if width < 768.0 { 30 } else { 60 };
        prop_assert_eq!(graph.nodes().len(), expected);
    }
}
