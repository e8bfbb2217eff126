//! Transient objects: one short-lived ball per interaction.
//!
//! Re-spawn policy: replace. Spawning while an object is alive disposes the
//! old one first and hands it back so the host can release its resources.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransientObject {
    pub id: u64,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
}

impl TransientObject {
    fn step(&mut self) {
        for (p, v) in self.position.iter_mut().zip(self.velocity) {
            *p += v;
        }
    }
}

#[derive(Debug, Default)]
pub struct TransientObjectManager {
    velocity: [f32; 3],
    alive: Option<TransientObject>,
    next_id: u64,
}

impl TransientObjectManager {
    pub fn new(velocity: [f32; 3]) -> Self {
        Self {
            velocity,
            alive: None,
            next_id: 0,
        }
    }

    pub fn alive(&self) -> Option<&TransientObject> {
        self.alive.as_ref()
    }

    /// Create the object; returns the replaced one, already disposed.
    pub fn spawn(&mut self, position: [f32; 3]) -> (TransientObject, Option<TransientObject>) {
        let replaced = self.dispose();
        let obj = TransientObject {
            id: self.next_id,
            position,
            velocity: self.velocity,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.alive = Some(obj);
        (obj, replaced)
    }

    pub fn step(&mut self) {
        if let Some(obj) = self.alive.as_mut() {
            obj.step();
        }
    }

    /// Release the alive object, if any.
    pub fn dispose(&mut self) -> Option<TransientObject> {
        self.alive.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_steps_drift_sideways() {
        let mut m = TransientObjectManager::new([-0.05, 0.0, 0.0]);
        m.spawn([2.0, 1.0, 0.0]);
        for _ in 0..3 {
            m.step();
        }
        let p = m.alive().unwrap().position;
        assert!((p[0] - 1.85).abs() < 1e-6, "x={}", p[0]);
        assert_eq!(p[1], 1.0);
        assert_eq!(p[2], 0.0);
    }

    #[test]
    fn respawn_replaces_and_returns_previous() {
        let mut m = TransientObjectManager::new([0.0, 0.1, 0.0]);
        let (first, replaced) = m.spawn([0.0; 3]);
        assert!(replaced.is_none());
        let (second, replaced) = m.spawn([1.0; 3]);
        assert_eq!(replaced.map(|o| o.id), Some(first.id));
        assert_ne!(first.id, second.id);
        assert_eq!(m.alive().map(|o| o.id), Some(second.id));
    }

    #[test]
    fn dispose_without_object_is_noop() {
        let mut m = TransientObjectManager::new([0.0; 3]);
        assert!(m.dispose().is_none());
        m.step();
        assert!(m.alive().is_none());
    }
}
