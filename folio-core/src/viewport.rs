/// Viewport size and the breakpoint that switches components to their mobile behavior
use serde::{Deserialize, Serialize};

/// Widths below this many pixels are treated as a phone-sized viewport
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Visible area of the host, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    /// Centre point, used as the origin for pointer parallax
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Width over height; a degenerate height falls back to square
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_breakpoint() {
        assert!(Viewport::new(767.0, 1000.0).is_mobile());
        assert!(!Viewport::new(768.0, 1000.0).is_mobile());
        assert!(!Viewport::new(1920.0, 1080.0).is_mobile());
    }

    #[test]
    fn test_center_and_aspect() {
        let viewport = Viewport::new(1024.0, 768.0);
        assert_eq!(viewport.center(), (512.0, 384.0));
        assert!((viewport.aspect() - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
    }
}
