//! BoneOverride: post-animation rotation of one joint driven by vertical pointer motion.
//!
//! Must run after the animation tick of the same frame, otherwise the baked
//! pose overwrites the override.

use crate::handle::BoneHandle;

#[derive(Clone, Debug)]
pub struct BoneOverride {
    sensitivity: f32,
    was_interacting: bool,
    /// Rotation applied since the last reset (radians).
    accumulated: f32,
}

impl BoneOverride {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            was_interacting: false,
            accumulated: 0.0,
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn apply<B: BoneHandle + ?Sized>(
        &mut self,
        bone: Option<&mut B>,
        vertical_delta: f32,
        interacting: bool,
    ) {
        let was = std::mem::replace(&mut self.was_interacting, interacting);
        let Some(bone) = bone else {
            return;
        };
        if interacting {
            let radians = vertical_delta * self.sensitivity;
            if radians.is_finite() && radians != 0.0 {
                bone.rotate(radians);
                self.accumulated += radians;
            }
        } else if was {
            bone.reset_rotation();
            self.accumulated = 0.0;
        }
    }

    /// Restore the rest rotation now (interaction end).
    pub fn reset<B: BoneHandle + ?Sized>(&mut self, bone: Option<&mut B>) {
        self.was_interacting = false;
        self.accumulated = 0.0;
        if let Some(bone) = bone {
            bone.reset_rotation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::AxisBone;

    #[test]
    fn rotates_only_while_interacting() {
        let mut o = BoneOverride::new(0.5);
        let mut b = AxisBone::new(0.0);
        o.apply(Some(&mut b), 0.2, false);
        assert_eq!(b.angle, 0.0);
        o.apply(Some(&mut b), 0.2, true);
        assert!((b.angle - 0.1).abs() < 1e-6);
        assert!((o.accumulated() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn falling_edge_resets_to_rest() {
        let mut o = BoneOverride::new(1.2);
        let mut b = AxisBone::new(-0.25);
        for _ in 0..5 {
            o.apply(Some(&mut b), 0.03, true);
        }
        o.apply(Some(&mut b), 0.0, false);
        assert_eq!(b.angle, -0.25);
        assert_eq!(o.accumulated(), 0.0);
    }

    #[test]
    fn unbound_bone_is_noop() {
        let mut o = BoneOverride::new(1.0);
        o.apply(None::<&mut AxisBone>, 1.0, true);
        o.reset(None::<&mut AxisBone>);
        assert_eq!(o.accumulated(), 0.0);
    }
}
