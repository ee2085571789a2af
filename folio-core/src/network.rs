/// 2D "neural network" canvas: drifting nodes joined by lines that fade
/// with distance
use rand::Rng;

use crate::config::{NetworkConfig, NetworkProfile};
use crate::frame::Animation;
use crate::scene::Surface2d;
use crate::viewport::Viewport;

/// A point mass with constant speed and a fixed draw radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphNode {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

impl GraphNode {
    fn random<R: Rng + ?Sized>(viewport: Viewport, config: &NetworkConfig, rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f32>() * viewport.width,
            y: rng.gen::<f32>() * viewport.height,
            vx: (rng.gen::<f32>() - 0.5) * config.node_speed,
            vy: (rng.gen::<f32>() - 0.5) * config.node_speed,
            radius: config.min_radius + rng.gen::<f32>() * (config.max_radius - config.min_radius),
        }
    }

    /// Move one step, then flip the velocity on any axis that ended up out
    /// of bounds. The position itself is not clamped.
    pub fn advance(&mut self, viewport: Viewport) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > viewport.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > viewport.height {
            self.vy = -self.vy;
        }
    }

    pub fn distance_to(&self, other: &GraphNode) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Link strength in `(0, 1]` for two nodes `distance` apart, or `None` when
/// they are too far apart to be joined
pub fn link_strength(distance: f32, threshold: f32) -> Option<f32> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

/// A pair of nodes close enough to be joined; `from < to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub strength: f32,
}

/// Node batch and the profile it was generated for
#[derive(Debug, Clone)]
pub struct NodeGraph {
    config: NetworkConfig,
    viewport: Viewport,
    profile: NetworkProfile,
    nodes: Vec<GraphNode>,
}

impl NodeGraph {
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, config: NetworkConfig, rng: &mut R) -> Self {
        let mut graph = Self {
            profile: config.profile_for(viewport),
            config,
            viewport,
            nodes: Vec::new(),
        };
        graph.regenerate(viewport, rng);
        graph
    }

    /// Throw away every node and build a fresh batch for `viewport`,
    /// re-selecting the profile from its width
    pub fn regenerate<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.viewport = viewport;
        self.profile = self.config.profile_for(viewport);

        let config = &self.config;
        self.nodes = (0..self.profile.node_count)
            .map(|_| GraphNode::random(viewport, config, rng))
            .collect();

        log::debug!(
            "node graph regenerated: {} nodes, link distance {} at {}x{}",
            self.nodes.len(),
            self.profile.connect_distance,
            viewport.width,
            viewport.height
        );
    }

    /// Advance every node one frame in index order
    pub fn step(&mut self) {
        let viewport = self.viewport;
        for node in &mut self.nodes {
            node.advance(viewport);
        }
    }

    /// Every pair closer than the link distance. Brute force over all
    /// `i < j` pairs.
    pub fn links(&self) -> Vec<Link> {
        let threshold = self.profile.connect_distance;
        let mut links = Vec::new();
        for (i, a) in self.nodes.iter().enumerate() {
            for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
                if let Some(strength) = link_strength(a.distance_to(b), threshold) {
                    links.push(Link {
                        from: i,
                        to: j,
                        strength,
                    });
                }
            }
        }
        links
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn profile(&self) -> NetworkProfile {
        self.profile
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}

/// A [`NodeGraph`] bound to the surface it draws on
pub struct NodeGraphCanvas<S: Surface2d, R: Rng> {
    surface: S,
    graph: NodeGraph,
    rng: R,
}

impl<S: Surface2d, R: Rng> NodeGraphCanvas<S, R> {
    /// Size the surface to the viewport and generate the first batch.
    /// Returns `None` when there is no surface.
    pub fn init(
        surface: Option<S>,
        viewport: Viewport,
        config: NetworkConfig,
        mut rng: R,
    ) -> Option<Self> {
        let Some(mut surface) = surface else {
            log::debug!("no node graph surface, skipping network canvas");
            return None;
        };

        surface.resize(viewport);
        let graph = NodeGraph::new(viewport, config, &mut rng);
        log::info!(
            "network canvas ready: {} nodes, link distance {}",
            graph.nodes().len(),
            graph.profile().connect_distance
        );

        Some(Self {
            surface,
            graph,
            rng,
        })
    }

    /// Resize the surface and regenerate the whole batch; crossing the
    /// mobile breakpoint switches profile
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.graph.regenerate(viewport, &mut self.rng);
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface2d, R: Rng> Animation for NodeGraphCanvas<S, R> {
    fn frame(&mut self) {
        self.surface.clear();

        self.graph.step();

        let config = self.graph.config();
        for node in self.graph.nodes() {
            self.surface
                .fill_circle(node.x, node.y, node.radius, config.node_color);
        }

        let nodes = self.graph.nodes();
        for link in self.graph.links() {
            let (a, b) = (nodes[link.from], nodes[link.to]);
            let color = config
                .link_color
                .with_alpha(link.strength * config.link_opacity);
            self.surface
                .stroke_line((a.x, a.y), (b.x, b.y), config.line_width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::frame::run_frames;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        size: Option<Viewport>,
        clears: usize,
        circles: Vec<(f32, f32, f32, Rgba)>,
        lines: Vec<((f32, f32), (f32, f32), f32, Rgba)>,
    }

    impl Surface2d for Recorder {
        fn resize(&mut self, viewport: Viewport) {
            self.size = Some(viewport);
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
            self.lines.clear();
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
            self.circles.push((x, y, radius, color));
        }

        fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
            self.lines.push((from, to, width, color));
        }
    }

    fn node(x: f32, y: f32, vx: f32, vy: f32) -> GraphNode {
        GraphNode {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
        }
    }

    #[test]
    fn test_link_strength_edges() {
        assert_eq!(link_strength(0.0, 150.0), Some(1.0));
        assert_eq!(link_strength(75.0, 150.0), Some(0.5));
        assert_eq!(link_strength(150.0, 150.0), None);
        assert_eq!(link_strength(151.0, 150.0), None);
        let near_edge = link_strength(149.999, 150.0).unwrap();
        assert!(near_edge > 0.0 && near_edge < 1e-4);
    }

    #[test]
    fn test_bounce_flips_only_offending_axis() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut n = node(99.8, 50.0, 0.25, 0.1);
        n.advance(viewport);
        assert!(n.x > 100.0);
        assert_eq!(n.vx, -0.25);
        assert_eq!(n.vy, 0.1);

        n.advance(viewport);
        assert!(n.x < 100.0);
        assert_eq!(n.vx, -0.25);
    }

    #[test]
    fn test_bounce_at_origin() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut n = node(0.1, 0.1, -0.2, -0.2);
        n.advance(viewport);
        assert!(n.x < 0.0 && n.y < 0.0);
        assert_eq!((n.vx, n.vy), (0.2, 0.2));
    }

    #[test]
    fn test_node_generation_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let viewport = Viewport::new(1024.0, 768.0);
        let graph = NodeGraph::new(viewport, NetworkConfig::default(), &mut rng);
        assert_eq!(graph.nodes().len(), 60);
        for n in graph.nodes() {
            assert!((0.0..1024.0).contains(&n.x));
            assert!((0.0..768.0).contains(&n.y));
            assert!(n.vx.abs() <= 0.25 && n.vy.abs() <= 0.25);
            assert!((1.0..3.0).contains(&n.radius));
        }
    }

    #[test]
    fn test_links_are_ordered_pairs_under_threshold() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = NodeGraph::new(Viewport::new(400.0, 300.0), NetworkConfig::default(), &mut rng);
        let nodes = graph.nodes();
        let links = graph.links();
        assert!(!links.is_empty());
        for link in &links {
            assert!(link.from < link.to);
            let d = nodes[link.from].distance_to(&nodes[link.to]);
            assert!(d < graph.profile().connect_distance);
        }

        let expected = (0..nodes.len())
            .flat_map(|i| (i + 1..nodes.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| nodes[i].distance_to(&nodes[j]) < 100.0)
            .count();
        assert_eq!(links.len(), expected);
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let canvas = NodeGraphCanvas::<Recorder, _>::init(
            None,
            Viewport::new(1024.0, 768.0),
            NetworkConfig::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(canvas.is_none());
    }

    #[test]
    fn test_frame_draws_nodes_and_faded_links() {
        let viewport = Viewport::new(1024.0, 768.0);
        let mut canvas = NodeGraphCanvas::init(
            Some(Recorder::default()),
            viewport,
            NetworkConfig::default(),
            StdRng::seed_from_u64(8),
        )
        .unwrap();
        assert_eq!(canvas.surface().size, Some(viewport));

        canvas.frame();
        let surface = canvas.surface();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 60);
        assert_eq!(surface.lines.len(), canvas.graph().links().len());
        for (_, _, _, color) in &surface.circles {
            assert_eq!(color.css(), "rgba(82, 113, 255, 0.5)");
        }
        for (_, _, width, color) in &surface.lines {
            assert_eq!(*width, 1.0);
            assert_eq!((color.r, color.g, color.b), (157, 78, 221));
            assert!(color.a > 0.0 && color.a <= 0.2);
        }
    }

    #[test]
    fn test_resize_switches_profile() {
        let mut canvas = NodeGraphCanvas::init(
            Some(Recorder::default()),
            Viewport::new(1024.0, 768.0),
            NetworkConfig::default(),
            StdRng::seed_from_u64(4),
        )
        .unwrap();
        assert_eq!(canvas.graph().nodes().len(), 60);

        canvas.on_resize(Viewport::new(500.0, 768.0));
        assert_eq!(canvas.graph().nodes().len(), 30);
        assert_eq!(canvas.graph().profile().connect_distance, 100.0);
        assert_eq!(canvas.surface().size, Some(Viewport::new(500.0, 768.0)));

        canvas.on_resize(Viewport::new(800.0, 600.0));
        assert_eq!(canvas.graph().nodes().len(), 60);
        assert_eq!(canvas.graph().profile().connect_distance, 150.0);
    }

    #[test]
    fn test_frames_keep_nodes_near_bounds() {
        let viewport = Viewport::new(320.0, 240.0);
        let mut canvas = NodeGraphCanvas::init(
            Some(Recorder::default()),
            viewport,
            NetworkConfig::default(),
            StdRng::seed_from_u64(99),
        )
        .unwrap();

        let tolerance = 0.25 + 1e-3;
        for _ in 0..2000 {
            run_frames(&mut canvas, 1);
            for n in canvas.graph().nodes() {
                assert!(n.x >= -tolerance && n.x <= viewport.width + tolerance);
                assert!(n.y >= -tolerance && n.y <= viewport.height + tolerance);
            }
        }
    }
}
