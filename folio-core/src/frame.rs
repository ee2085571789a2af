//! Frame-driven components and a deterministic tick driver
//!
//! Hosts call [`Animation::frame`] once per display refresh; tests call
//! [`run_frames`] instead of waiting on a real display.

/// Anything that advances and redraws itself one frame at a time
pub trait Animation {
    fn frame(&mut self);
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn frame(&mut self) {
        (**self).frame()
    }
}

/// Drive an animation for a fixed number of ticks
pub fn run_frames<A: Animation + ?Sized>(animation: &mut A, frames: usize) {
    for _ in 0..frames {
        animation.frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(usize);

    impl Animation for Counter {
        fn frame(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_run_frames_ticks_exactly() {
        let mut counter = Counter(0);
        run_frames(&mut counter, 100);
        assert_eq!(counter.0, 100);
    }
}
