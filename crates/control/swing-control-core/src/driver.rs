//! AnimationDriver: advances the bound animation and maps pointer speed to time scale.

use crate::config::ControlConfig;
use crate::handle::AnimationHandle;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Debug)]
pub struct AnimationDriver<H> {
    handle: Option<H>,
    speed_gain: f32,
    smoothing: f32,
    neutral: f32,
    max_time_scale: f32,
}

impl<H: AnimationHandle> AnimationDriver<H> {
    pub fn new(cfg: &ControlConfig) -> Self {
        Self {
            handle: None,
            speed_gain: cfg.speed_gain,
            smoothing: cfg.smoothing,
            neutral: cfg.neutral_time_scale,
            max_time_scale: cfg.max_time_scale,
        }
    }

    /// Bind a loaded animation, returning the previously bound one (if any).
    pub fn bind(&mut self, mut handle: H) -> Option<H> {
        handle.set_time_scale(self.neutral);
        self.handle.replace(handle)
    }

    pub fn unbind(&mut self) -> Option<H> {
        self.handle.take()
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    /// Current playback rate, `None` while unbound.
    pub fn time_scale(&self) -> Option<f32> {
        self.handle.as_ref().map(|h| h.time_scale())
    }

    /// Restart playback from the first pose at neutral speed.
    pub fn on_interaction_start(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.reset();
            h.play();
            h.set_time_scale(self.neutral);
        }
    }

    pub fn tick(&mut self, dt: f32, interacting: bool, pointer_speed: f32) {
        let Some(h) = self.handle.as_mut() else {
            return;
        };
        h.advance(dt);
        if interacting {
            let target = pointer_speed * self.speed_gain;
            if !target.is_finite() {
                return;
            }
            let next = lerp(h.time_scale(), target, self.smoothing);
            if next.is_finite() {
                h.set_time_scale(next.clamp(-self.max_time_scale, self.max_time_scale));
            }
        } else {
            // Snap to the rest pose instead of drifting.
            h.reset();
            h.advance(0.0);
        }
    }

    pub fn on_interaction_end(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::LoopMode;
    use crate::mixer::ClipMixer;

    #[test]
    fn unbound_driver_is_inert() {
        let mut d: AnimationDriver<ClipMixer> = AnimationDriver::new(&ControlConfig::default());
        d.on_interaction_start();
        d.tick(0.016, true, 3.0);
        d.tick(0.016, false, 0.0);
        d.on_interaction_end();
        assert!(!d.is_bound());
        assert_eq!(d.time_scale(), None);
    }

    #[test]
    fn time_scale_is_clamped() {
        let mut d = AnimationDriver::new(&ControlConfig {
            smoothing: 1.0,
            ..ControlConfig::default()
        });
        d.bind(ClipMixer::new(1.0, LoopMode::Once));
        d.on_interaction_start();
        d.tick(0.0, true, 1e9);
        assert_eq!(d.time_scale(), Some(8.0));
        d.tick(0.0, true, -1e9);
        assert_eq!(d.time_scale(), Some(-8.0));
        d.tick(0.0, true, f32::NAN);
        assert_eq!(d.time_scale(), Some(-8.0));
    }
}
