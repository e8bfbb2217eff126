//! Swing Control Core (engine-agnostic)
//!
//! Pointer-driven control loop for a skinned, skeletally animated model:
//! swipe speed drives clip playback rate, vertical pointer motion rotates one
//! bone on top of the animated pose, and a transient object lives for the
//! duration of each interaction.
//!
//! Host adapters (Bevy/WASM) own the scene, the renderer and the real mixer.
//! They implement [`AnimationHandle`] / [`BoneHandle`], feed [`InputEvent`]s
//! into a [`SwingController`] and call [`SwingController::tick`] once per frame.

pub mod bone;
pub mod clip;
pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod handle;
pub mod inputs;
pub mod mixer;
pub mod outputs;
pub mod pointer;
pub mod transient;

// Re-exports for consumers (adapters)
pub use bone::BoneOverride;
pub use clip::{ClipInfo, ClipRef, ClipSelection, LoopMode};
pub use config::{
    AppConfig, Axis, CameraConfig, ControlConfig, LightRig, MaterialOverrides, SceneConfig,
};
pub use controller::{InteractionState, LoadedRig, SwingController};
pub use driver::AnimationDriver;
pub use error::SwingError;
pub use handle::{AnimationHandle, AxisBone, BoneHandle};
pub use inputs::{DeviceClass, InputEvent, PointerPhase};
pub use mixer::ClipMixer;
pub use outputs::{ControlEvent, FrameOutputs};
pub use pointer::{PointerSample, PointerTracker, Viewport};
pub use transient::{TransientObject, TransientObjectManager};
