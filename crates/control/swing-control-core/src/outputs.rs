//! Output contracts from the controller.
//!
//! Outputs carry the per-frame state adapters need to mirror onto the host
//! (time scale, transient object) plus discrete events (interaction edges,
//! spawn/dispose, asset failures) that adapters transport or act on.

use serde::{Deserialize, Serialize};

use crate::inputs::DeviceClass;
use crate::transient::TransientObject;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ControlEvent {
    InteractionStarted { device: DeviceClass },
    InteractionEnded { device: DeviceClass },
    /// Host should create a visual for this object.
    TransientSpawned { object: TransientObject },
    /// Host should release the visual (buffers, materials) for this id.
    TransientDisposed { id: u64 },
    AssetUnavailable { reason: String },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FrameOutputs {
    pub interacting: bool,
    /// `None` while no animation is bound.
    #[serde(default)]
    pub time_scale: Option<f32>,
    #[serde(default)]
    pub transient: Option<TransientObject>,
    #[serde(default)]
    pub events: Vec<ControlEvent>,
}

impl FrameOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.interacting = false;
        self.time_scale = None;
        self.transient = None;
        self.events.clear();
    }
}
