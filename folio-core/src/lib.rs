//! Folio Core Library - host-independent behavior for the portfolio page
//!
//! This library holds the two decorative animations (a 3D wireframe backdrop
//! and a 2D node graph) behind small drawing-surface traits, plus the pure
//! logic of the page glue: chatbot rules, analytics counters, reveal timing
//! and the printable resume.

pub mod analytics;
pub mod backdrop;
pub mod chat;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod network;
pub mod projection;
pub mod resume;
pub mod reveal;
pub mod scene;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use backdrop::{BackdropScene, FloatingBody};
pub use color::Rgba;
pub use config::{BackdropConfig, FolioConfig, NetworkConfig, NetworkProfile};
pub use error::{FolioError, Result};
pub use frame::{run_frames, Animation};
pub use geometry::{Geometry, WireMesh};
pub use network::{GraphNode, NodeGraph, NodeGraphCanvas};
pub use projection::{Camera, ScreenPoint};
pub use scene::{Material, MeshId, SceneBackend, Segment, Surface2d, WireScene};
pub use transform::{BodyTransform, RotationState, Transform};
pub use viewport::{Viewport, MOBILE_BREAKPOINT};
