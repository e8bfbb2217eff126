//! Bevy adapter for the swing control core.
//!
//! - [`SwingControlPlugin`]: controller resource, transient visuals, clip clock
//!   and bone override application. Works headless (`MinimalPlugins`).
//! - [`SwingInputPlugin`]: mouse/touch/window events → [`SwingInput`].
//! - [`SwingScenePlugin`]: camera, light rig, background, glTF load and rig binding.
//! - [`SwingPlugins`]: all of the above from one [`AppConfig`].

pub mod components;
pub mod input;
pub mod resources;
pub mod scene;
pub mod systems;

use bevy::animation::transition::{advance_transitions, expire_completed_transitions};
use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub use components::{SwingBall, SwingModelRoot};
pub use resources::{
    BallStyle, BoneProxy, LoadPhase, SwingAssets, SwingControl, SwingInput, SwingRig,
    SwingSceneConfig,
};
pub use swing_control_core::{AppConfig, ControlConfig, SceneConfig};

#[derive(Default)]
pub struct SwingControlPlugin {
    pub config: ControlConfig,
}

impl Plugin for SwingControlPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SwingControl::new(self.config.clone()))
            .init_resource::<BallStyle>()
            .add_event::<SwingInput>()
            .add_systems(
                Update,
                (
                    systems::drive_controller_system,
                    systems::sync_transients_system,
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                (
                    systems::sync_clip_time_system.before(advance_transitions),
                    systems::apply_bone_override_system
                        .after(expire_completed_transitions)
                        .before(TransformSystem::TransformPropagate),
                ),
            );
    }
}

/// Requires Bevy's window and input plugins.
pub struct SwingInputPlugin;

impl Plugin for SwingInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (
                input::sync_viewport_system,
                input::mouse_input_system,
                input::touch_input_system,
            )
                .chain()
                .after(bevy::input::InputSystem),
        );
    }
}

/// Requires `DefaultPlugins` (asset, glTF, animation, PBR, gizmos).
#[derive(Default)]
pub struct SwingScenePlugin {
    pub scene: SceneConfig,
}

impl Plugin for SwingScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SwingSceneConfig(self.scene.clone()))
            .add_systems(Startup, scene::bootstrap_scene_system)
            .add_systems(
                Update,
                (scene::spawn_model_system, scene::bind_rig_system)
                    .chain()
                    .before(systems::drive_controller_system),
            )
            .add_systems(
                PostUpdate,
                scene::draw_skeleton_system
                    .run_if(scene::show_skeleton)
                    .after(TransformSystem::TransformPropagate),
            );
    }
}

/// Control, input and scene plugins configured from one [`AppConfig`].
#[derive(Default)]
pub struct SwingPlugins {
    pub config: AppConfig,
}

impl Plugin for SwingPlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SwingControlPlugin {
                config: self.config.control.clone(),
            },
            SwingInputPlugin,
            SwingScenePlugin {
                scene: self.config.scene.clone(),
            },
        ));
    }
}
