//! Input contracts: raw pointer/touch events as delivered by the host.
//!
//! Coordinates are raw device pixels (origin top-left); the controller
//! normalizes them against its viewport. Timestamps are host seconds.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mouse,
    Touch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, timestamp: f64 },
    PointerMove { x: f32, y: f32, timestamp: f64 },
    PointerUp { x: f32, y: f32, timestamp: f64 },
    TouchStart { x: f32, y: f32, timestamp: f64 },
    TouchMove { x: f32, y: f32, timestamp: f64 },
    TouchEnd { x: f32, y: f32, timestamp: f64 },
}

impl InputEvent {
    pub fn new(device: DeviceClass, phase: PointerPhase, x: f32, y: f32, timestamp: f64) -> Self {
        match (device, phase) {
            (DeviceClass::Mouse, PointerPhase::Start) => Self::PointerDown { x, y, timestamp },
            (DeviceClass::Mouse, PointerPhase::Move) => Self::PointerMove { x, y, timestamp },
            (DeviceClass::Mouse, PointerPhase::End) => Self::PointerUp { x, y, timestamp },
            (DeviceClass::Touch, PointerPhase::Start) => Self::TouchStart { x, y, timestamp },
            (DeviceClass::Touch, PointerPhase::Move) => Self::TouchMove { x, y, timestamp },
            (DeviceClass::Touch, PointerPhase::End) => Self::TouchEnd { x, y, timestamp },
        }
    }

    pub fn device(&self) -> DeviceClass {
        match self {
            Self::PointerDown { .. } | Self::PointerMove { .. } | Self::PointerUp { .. } => {
                DeviceClass::Mouse
            }
            Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd { .. } => {
                DeviceClass::Touch
            }
        }
    }

    pub fn phase(&self) -> PointerPhase {
        match self {
            Self::PointerDown { .. } | Self::TouchStart { .. } => PointerPhase::Start,
            Self::PointerMove { .. } | Self::TouchMove { .. } => PointerPhase::Move,
            Self::PointerUp { .. } | Self::TouchEnd { .. } => PointerPhase::End,
        }
    }

    /// `(x, y, timestamp)` payload shared by every variant.
    pub fn position(&self) -> (f32, f32, f64) {
        match *self {
            Self::PointerDown { x, y, timestamp }
            | Self::PointerMove { x, y, timestamp }
            | Self::PointerUp { x, y, timestamp }
            | Self::TouchStart { x, y, timestamp }
            | Self::TouchMove { x, y, timestamp }
            | Self::TouchEnd { x, y, timestamp } => (x, y, timestamp),
        }
    }
}
