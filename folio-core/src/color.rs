/// Colors shared by both animations
use serde::{Deserialize, Serialize};

/// 8-bit RGB with a fractional alpha, the shape CSS `rgba()` expects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Brand blue, `#5271ff`
pub const BLUE: Rgba = Rgba::from_hex(0x5271ff, 1.0);
/// Brand purple, `#9d4edd`
pub const PURPLE: Rgba = Rgba::from_hex(0x9d4edd, 1.0);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32, a: f32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(82, 113, 255, 0.5)`
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
