//! Timing for the loader, the hero entrance and scroll-triggered reveals

use std::time::Duration;

/// How long the loader stays up after the page `load` event
pub const LOADER_MIN_DURATION: Duration = Duration::from_millis(1500);

/// Delay before the first hero element appears
pub const HERO_BASE_DELAY: Duration = Duration::from_millis(300);

/// Extra delay for each following hero element
pub const HERO_STAGGER: Duration = Duration::from_millis(200);

/// Hero elements in entrance order
pub const HERO_SELECTORS: &[&str] = &[".navbar", ".hero-content", ".hero-visual", ".scroll-down"];

/// Intersection ratio at which a `data-aos` element is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Shrinks the bottom of the viewport so elements reveal slightly later
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// How far below its resting place a hidden element starts, in pixels
pub const REVEAL_OFFSET_PX: f32 = 30.0;

/// When and how one hero element becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroStep {
    pub index: usize,
    /// Measured from the moment the loader is dismissed
    pub delay: Duration,
    /// `false` under reduced motion: show at once with transitions disabled
    pub animate: bool,
}

/// Entrance schedule for `count` hero elements
pub fn hero_schedule(count: usize, reduced_motion: bool) -> Vec<HeroStep> {
    (0..count)
        .map(|index| {
            if reduced_motion {
                HeroStep {
                    index,
                    delay: Duration::ZERO,
                    animate: false,
                }
            } else {
                HeroStep {
                    index,
                    delay: HERO_BASE_DELAY + HERO_STAGGER * index as u32,
                    animate: true,
                }
            }
        })
        .collect()
}

/// Fallback check run on scroll: anything whose top edge has entered the
/// viewport is shown even if the observer missed it
pub fn should_reveal(rect_top: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height
}

/// Inline style for a `data-aos` element before it is revealed
pub fn hidden_style() -> [(&'static str, String); 3] {
    [
        ("opacity", "0".to_string()),
        ("transform", format!("translateY({}px)", REVEAL_OFFSET_PX)),
        (
            "transition",
            "opacity 0.6s ease-out, transform 0.6s ease-out".to_string(),
        ),
    ]
}

/// Inline style once revealed
pub fn shown_style() -> [(&'static str, &'static str); 2] {
    [("opacity", "1"), ("transform", "translateY(0)")]
}
