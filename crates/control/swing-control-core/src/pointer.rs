//! Pointer tracking: normalized positions, one-frame deltas and horizontal speed.
//!
//! Motion is measured against a frame anchor: the position the last frame
//! settled on. Any number of samples may arrive between two ticks; only the
//! latest replaces `current`, so deltas cover the whole frame.
//!
//! Sign convention: x grows rightward and **y grows upward** in normalized
//! device coordinates, so raw pixel y (origin top-left) is negated.

use serde::{Deserialize, Serialize};

/// Viewport size in pixels, used to normalize raw device coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    /// Map pixel coordinates to NDC in [-1, 1]. Points outside the viewport
    /// are clamped; a degenerate viewport maps everything to the origin.
    pub fn normalize(&self, raw_x: f32, raw_y: f32) -> (f32, f32) {
        if self.is_degenerate() || !raw_x.is_finite() || !raw_y.is_finite() {
            return (0.0, 0.0);
        }
        let x = (raw_x / self.width) * 2.0 - 1.0;
        let y = -((raw_y / self.height) * 2.0 - 1.0);
        (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
    }
}

/// One captured pointer position in NDC.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp: f64,
}

#[derive(Clone, Debug)]
pub struct PointerTracker {
    current: Option<PointerSample>,
    anchor: Option<PointerSample>,
    epsilon: f32,
}

impl PointerTracker {
    pub fn new(epsilon: f32) -> Self {
        Self {
            current: None,
            anchor: None,
            epsilon: epsilon.max(f32::MIN_POSITIVE),
        }
    }

    pub fn current(&self) -> Option<PointerSample> {
        self.current
    }

    /// Sample the previous frame settled on.
    pub fn anchor(&self) -> Option<PointerSample> {
        self.anchor
    }

    /// Normalize a raw pixel position and record it.
    pub fn sample(&mut self, raw_x: f32, raw_y: f32, now: f64, viewport: &Viewport) {
        let (x, y) = viewport.normalize(raw_x, raw_y);
        self.sample_ndc(x, y, now);
    }

    /// Record an already normalized position. The anchor only moves on
    /// `begin` and `settle`; the first sample ever seen anchors itself.
    pub fn sample_ndc(&mut self, x: f32, y: f32, now: f64) {
        let s = PointerSample {
            x,
            y,
            timestamp: now,
        };
        if self.anchor.is_none() {
            self.anchor = Some(s);
        }
        self.current = Some(s);
    }

    /// Anchor at the press point so the first frame measures from it.
    pub fn begin(&mut self, sample: PointerSample) {
        self.anchor = Some(sample);
        self.current = Some(sample);
    }

    /// `(current.x - anchor.x) / max(dt, epsilon)`. Equal or decreasing
    /// timestamps fall back to the epsilon floor, so the result stays finite.
    pub fn horizontal_speed(&self) -> f32 {
        match (self.current, self.anchor) {
            (Some(c), Some(p)) => {
                let dt = (c.timestamp - p.timestamp) as f32;
                let dt = if dt.is_finite() {
                    dt.max(self.epsilon)
                } else {
                    self.epsilon
                };
                let v = (c.x - p.x) / dt;
                if v.is_finite() {
                    v
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Vertical motion since the last settled frame (not a rate).
    pub fn vertical_delta(&self) -> f32 {
        match (self.current, self.anchor) {
            (Some(c), Some(p)) => c.y - p.y,
            _ => 0.0,
        }
    }

    /// Mark the current motion as consumed by a frame.
    pub fn settle(&mut self) {
        if self.current.is_some() {
            self.anchor = self.current;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn normalize_corners_with_y_up() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.normalize(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(vp.normalize(800.0, 600.0), (1.0, -1.0));
        assert_eq!(vp.normalize(400.0, 300.0), (0.0, 0.0));
        // above the viewport: y clamps to +1
        assert_eq!(vp.normalize(400.0, -50.0), (0.0, 1.0));
    }

    #[test]
    fn degenerate_viewport_maps_to_origin() {
        let vp = Viewport::new(0.0, 600.0);
        assert_eq!(vp.normalize(10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn speed_over_one_tenth_second() {
        let mut t = PointerTracker::new(1e-4);
        t.sample_ndc(0.0, 0.0, 0.0);
        t.sample_ndc(0.1, 0.0, 0.1);
        approx(t.horizontal_speed(), 1.0);
    }

    #[test]
    fn identical_timestamps_stay_finite() {
        let mut t = PointerTracker::new(1e-4);
        t.sample_ndc(0.0, 0.0, 5.0);
        t.sample_ndc(0.5, 0.0, 5.0);
        let v = t.horizontal_speed();
        assert!(v.is_finite());
        assert!((v - 5000.0).abs() < 0.1, "speed={v}");

        // Decreasing timestamps are floored the same way.
        t.settle();
        t.sample_ndc(0.4, 0.0, 4.0);
        assert!(t.horizontal_speed().is_finite());
    }

    #[test]
    fn several_samples_in_one_frame_measure_from_the_anchor() {
        let mut t = PointerTracker::new(1e-4);
        t.begin(PointerSample {
            x: 0.0,
            y: 0.0,
            timestamp: 0.0,
        });
        t.settle();
        // Hosts stamp every event of a frame with the same time.
        t.sample_ndc(0.01, 0.1, 0.016);
        t.sample_ndc(0.02, 0.2, 0.016);
        approx(t.horizontal_speed(), 1.25);
        approx(t.vertical_delta(), 0.2);
        assert_eq!(t.anchor().map(|a| a.x), Some(0.0));

        t.settle();
        t.sample_ndc(0.03, 0.2, 0.032);
        t.sample_ndc(0.04, 0.2, 0.032);
        approx(t.horizontal_speed(), 1.25);
        assert_eq!(t.vertical_delta(), 0.0);
    }

    #[test]
    fn vertical_delta_is_one_frame() {
        let mut t = PointerTracker::new(1e-4);
        t.sample_ndc(0.0, 0.2, 0.0);
        t.sample_ndc(0.0, 0.5, 0.016);
        approx(t.vertical_delta(), 0.3);
        t.settle();
        assert_eq!(t.vertical_delta(), 0.0);
        assert_eq!(t.horizontal_speed(), 0.0);
    }

    #[test]
    fn first_sample_has_no_motion() {
        let mut t = PointerTracker::new(1e-4);
        assert_eq!(t.horizontal_speed(), 0.0);
        t.sample(100.0, 100.0, 1.0, &Viewport::new(200.0, 200.0));
        assert_eq!(t.horizontal_speed(), 0.0);
        assert_eq!(t.vertical_delta(), 0.0);
        t.clear();
        assert!(t.current().is_none());
    }
}
