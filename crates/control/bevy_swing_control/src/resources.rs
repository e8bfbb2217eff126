use bevy::prelude::*;
use swing_control_core::{
    BoneHandle, ClipMixer, ControlConfig, InputEvent, SceneConfig, SwingController,
};

/// Controller driving the swing: clip clock in core, bone writes staged for the ECS.
#[derive(Resource)]
pub struct SwingControl(pub SwingController<ClipMixer, BoneProxy>);

impl SwingControl {
    pub fn new(cfg: ControlConfig) -> Self {
        Self(SwingController::new(cfg))
    }
}

/// Raw pointer/touch input for the controller. The input plugin produces these
/// from Bevy events; tests and custom hosts can send them directly.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwingInput(pub InputEvent);

#[derive(Resource, Debug, Clone)]
pub struct SwingSceneConfig(pub SceneConfig);

/// Bevy animation player entity and graph node the clip clock is copied onto.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SwingRig {
    pub player: Entity,
    pub node: AnimationNodeIndex,
}

/// Appearance of the transient ball.
#[derive(Resource, Debug, Clone)]
pub struct BallStyle {
    pub radius: f32,
    pub color: Color,
}

impl Default for BallStyle {
    fn default() -> Self {
        Self {
            radius: 0.08,
            color: Color::WHITE,
        }
    }
}

/// BoneHandle staging rotation for one joint entity.
///
/// The controller runs in `Update`; the staged rotation is written onto the
/// joint's `Transform` in `PostUpdate`, after Bevy's animation systems wrote
/// the baked pose.
#[derive(Debug, Clone)]
pub struct BoneProxy {
    pub entity: Entity,
    pub axis: Vec3,
    /// Local rotation captured when the rig was bound.
    pub rest: Quat,
    pending: f32,
    reset_requested: bool,
}

impl BoneProxy {
    pub fn new(entity: Entity, axis: Vec3, rest: Quat) -> Self {
        Self {
            entity,
            axis: axis.normalize_or_zero(),
            rest,
            pending: 0.0,
            reset_requested: false,
        }
    }

    /// Apply staged writes to the joint transform and clear them.
    pub fn flush(&mut self, transform: &mut Transform) {
        if std::mem::take(&mut self.reset_requested) {
            transform.rotation = self.rest;
        }
        let radians = std::mem::take(&mut self.pending);
        if radians != 0.0 && self.axis != Vec3::ZERO {
            transform.rotation *= Quat::from_axis_angle(self.axis, radians);
        }
    }
}

impl BoneHandle for BoneProxy {
    fn rotate(&mut self, radians: f32) {
        if radians.is_finite() {
            self.pending += radians;
        }
    }

    fn reset_rotation(&mut self) {
        self.pending = 0.0;
        self.reset_requested = true;
    }
}

/// Progress of the asynchronous model load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Pending,
    /// Scene spawned; waiting for its hierarchy to bind the rig.
    Spawned {
        clip: Option<SelectedClip>,
    },
    Bound,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedClip {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    pub duration: f32,
}

#[derive(Resource, Debug)]
pub struct SwingAssets {
    pub gltf: Handle<bevy::gltf::Gltf>,
    pub phase: LoadPhase,
}
