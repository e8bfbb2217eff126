//! ClipMixer: a minimal single-clip playback clock implementing AnimationHandle.
//!
//! Adapters that cannot expose their engine's mixer directly run this clock
//! and copy `time()` onto the host animation each frame.

use crate::clip::LoopMode;
use crate::handle::AnimationHandle;

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipMixer {
    duration: f32,
    time: f32,
    time_scale: f32,
    loop_mode: LoopMode,
    playing: bool,
}

impl ClipMixer {
    /// New paused mixer at time 0. Negative or non-finite durations become 0.
    pub fn new(duration: f32, loop_mode: LoopMode) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            time: 0.0,
            time_scale: 1.0,
            loop_mode,
            playing: false,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Current clip-local time in `[0, duration]`.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// A `Once` clip that reached either end and holds its pose.
    pub fn is_finished(&self) -> bool {
        self.loop_mode == LoopMode::Once
            && ((self.time_scale > 0.0 && self.time >= self.duration)
                || (self.time_scale < 0.0 && self.time <= 0.0))
    }
}

impl AnimationHandle for ClipMixer {
    fn time_scale(&self) -> f32 {
        self.time_scale
    }

    fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.time_scale = scale;
        }
    }

    fn advance(&mut self, dt: f32) {
        if !self.playing || !dt.is_finite() {
            return;
        }
        let t = self.time + dt * self.time_scale;
        self.time = match self.loop_mode {
            LoopMode::Once => t.clamp(0.0, self.duration),
            LoopMode::Repeat => fmod(t, self.duration),
        };
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn play(&mut self) {
        self.playing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn paused_mixer_does_not_advance() {
        let mut m = ClipMixer::new(2.0, LoopMode::Once);
        m.advance(0.5);
        assert_eq!(m.time(), 0.0);
        m.play();
        m.advance(0.5);
        approx(m.time(), 0.5);
    }

    #[test]
    fn once_holds_last_pose() {
        let mut m = ClipMixer::new(1.0, LoopMode::Once);
        m.play();
        m.set_time_scale(2.0);
        m.advance(0.75);
        assert_eq!(m.time(), 1.0);
        assert!(m.is_finished());
        m.reset();
        assert_eq!(m.time(), 0.0);
        assert!(!m.is_finished());
    }

    #[test]
    fn repeat_wraps_both_directions() {
        let mut m = ClipMixer::new(1.0, LoopMode::Repeat);
        m.play();
        m.advance(1.25);
        approx(m.time(), 0.25);
        m.set_time_scale(-1.0);
        m.advance(0.5);
        approx(m.time(), 0.75);
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut m = ClipMixer::new(f32::NAN, LoopMode::Repeat);
        assert_eq!(m.duration(), 0.0);
        m.play();
        m.set_time_scale(f32::INFINITY);
        assert_eq!(m.time_scale(), 1.0);
        m.advance(f32::NAN);
        m.advance(1.0);
        assert_eq!(m.time(), 0.0);
    }
}
