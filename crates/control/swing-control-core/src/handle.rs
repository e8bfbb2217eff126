//! Handle traits for externally owned animation playback and skeletal joints.
//!
//! Adapters (Bevy/WASM) implement these over whatever the host engine owns.
//! The core only mutates the time scale, calls lifecycle methods and applies
//! incremental bone rotation.

/// Opaque animation-playback object (a mixer driving one clip).
pub trait AnimationHandle {
    fn time_scale(&self) -> f32;
    fn set_time_scale(&mut self, scale: f32);
    /// Advance playback by `dt` seconds of wall time (scaled internally).
    fn advance(&mut self, dt: f32);
    /// Rewind to the first pose.
    fn reset(&mut self);
    fn play(&mut self);
}

/// One rotatable degree of freedom of a skeletal joint.
pub trait BoneHandle {
    /// Compose an incremental rotation (radians) about the fixed axis with the current pose.
    fn rotate(&mut self, radians: f32);
    /// Restore the rest rotation exactly.
    fn reset_rotation(&mut self);
}

/// Single-axis bone state: a rest angle plus the current angle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisBone {
    pub rest: f32,
    pub angle: f32,
}

impl AxisBone {
    pub fn new(rest: f32) -> Self {
        Self { rest, angle: rest }
    }

    /// Offset from rest currently applied.
    pub fn offset(&self) -> f32 {
        self.angle - self.rest
    }
}

impl BoneHandle for AxisBone {
    fn rotate(&mut self, radians: f32) {
        if radians.is_finite() {
            self.angle += radians;
        }
    }

    fn reset_rotation(&mut self) {
        self.angle = self.rest;
    }
}

impl<T: BoneHandle + ?Sized> BoneHandle for Box<T> {
    fn rotate(&mut self, radians: f32) {
        (**self).rotate(radians)
    }

    fn reset_rotation(&mut self) {
        (**self).reset_rotation()
    }
}

impl<T: AnimationHandle + ?Sized> AnimationHandle for Box<T> {
    fn time_scale(&self) -> f32 {
        (**self).time_scale()
    }
    fn set_time_scale(&mut self, scale: f32) {
        (**self).set_time_scale(scale)
    }
    fn advance(&mut self, dt: f32) {
        (**self).advance(dt)
    }
    fn reset(&mut self) {
        (**self).reset()
    }
    fn play(&mut self) {
        (**self).play()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_bone_reset_is_exact() {
        let mut b = AxisBone::new(0.3);
        for _ in 0..17 {
            b.rotate(0.1);
        }
        b.rotate(f32::NAN);
        assert!(b.offset() > 1.0);
        b.reset_rotation();
        assert_eq!(b.angle, 0.3);
        assert_eq!(b.offset(), 0.0);
    }
}
