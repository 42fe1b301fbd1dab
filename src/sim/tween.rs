//! Frame-stepped radius animation
//!
//! Stands in for a time-based tween: interpolates from `from` to `to` over a
//! fixed number of frames with a quadratic ease-out.

/// Animates a radius toward a target value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusTween {
    pub from: f32,
    pub to: f32,
    frames: u32,
    elapsed: u32,
}

impl RadiusTween {
    pub fn new(from: f32, to: f32, frames: u32) -> Self {
        Self {
            from,
            to,
            frames: frames.max(1),
            elapsed: 0,
        }
    }

    /// Advance one frame and return the interpolated value
    pub fn step(&mut self) -> f32 {
        self.elapsed = (self.elapsed + 1).min(self.frames);
        self.value()
    }

    /// Current value (exactly `to` once finished)
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed as f32 / self.frames as f32;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_is_monotonic_and_lands_exactly() {
        let mut t = RadiusTween::new(24.0, 14.0, 30);
        let mut last = 24.0;
        for _ in 0..30 {
            let v = t.step();
            assert!(v <= last);
            last = v;
        }
        assert_eq!(last, 14.0);
        assert!(t.is_finished());
        // Stays put once done
        assert_eq!(t.step(), 14.0);
    }

    #[test]
    fn test_zero_frames_finishes_in_one_step() {
        let mut t = RadiusTween::new(20.0, 10.0, 0);
        assert_eq!(t.step(), 10.0);
    }
}
