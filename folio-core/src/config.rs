//! Tunables for both animations
//!
//! Every field has a default matching the shipped page. Hosts may override
//! any subset from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::color::{Rgba, BLUE, PURPLE};
use crate::error::Result;
use crate::viewport::Viewport;

/// Top-level configuration for a page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub backdrop: BackdropConfig,
    pub network: NetworkConfig,
}

impl FolioConfig {
    /// Parse overrides, e.g. `{"network": {"node_speed": 1.0}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 3D backdrop: one wireframe sphere plus drifting cubes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub body_count: usize,
    /// Full extent of the spawn box along x, y and z, centred on the origin
    pub spawn_extent: [f32; 3],
    /// Upper bound (exclusive) for the uniform scale of a cube
    pub max_scale: f32,
    /// Drift and spin speeds are drawn from `[-max_speed / 2, max_speed / 2)`
    pub max_speed: f32,
    pub palette: Vec<Rgba>,
    pub body_opacity: f32,
    pub polyhedron_radius: f32,
    pub polyhedron_detail: u32,
    pub polyhedron_color: Rgba,
    /// Constant spin of the sphere per frame, x then y (radians)
    pub spin: [f32; 2],
    /// Pointer pixels to target radians
    pub parallax_scale: f32,
    /// Fraction of the remaining gap closed each frame
    pub smoothing: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            body_count: 50,
            spawn_extent: [100.0, 60.0, 40.0],
            max_scale: 2.0,
            max_speed: 0.02,
            palette: vec![BLUE, PURPLE],
            body_opacity: 0.1,
            polyhedron_radius: 10.0,
            polyhedron_detail: 1,
            polyhedron_color: BLUE.with_alpha(0.05),
            spin: [0.001, 0.002],
            parallax_scale: 0.001,
            smoothing: 0.05,
        }
    }
}

/// Node count and link distance chosen together by viewport width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub node_count: usize,
    pub connect_distance: f32,
}

/// 2D node graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub mobile: NetworkProfile,
    pub desktop: NetworkProfile,
    /// Velocity components are drawn from `[-node_speed / 2, node_speed / 2)`
    pub node_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub node_color: Rgba,
    pub link_color: Rgba,
    /// Alpha of a link between two coincident nodes
    pub link_opacity: f32,
    pub line_width: f32,
}

impl NetworkConfig {
    pub fn profile_for(&self, viewport: Viewport) -> NetworkProfile {
        if viewport.is_mobile() {
            self.mobile
        } else {
            self.desktop
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mobile: NetworkProfile {
                node_count: 30,
                connect_distance: 100.0,
            },
            desktop: NetworkProfile {
                node_count: 60,
                connect_distance: 150.0,
            },
            node_speed: 0.5,
            min_radius: 1.0,
            max_radius: 3.0,
            node_color: BLUE.with_alpha(0.5),
            link_color: PURPLE,
            link_opacity: 0.2,
            line_width: 1.0,
        }
    }
}
