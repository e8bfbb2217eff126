//! Scene bootstrap: camera, light rig, background, model load and rig binding.

use bevy::animation::AnimationTarget;
use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use hashbrown::HashMap;

use crate::components::SwingModelRoot;
use crate::resources::{
    BoneProxy, LoadPhase, SelectedClip, SwingAssets, SwingControl, SwingRig, SwingSceneConfig,
};
use swing_control_core::{Axis, ClipInfo, ClipMixer, LightRig, LoadedRig, SceneConfig, SwingError};

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

fn axis_vec(axis: Axis) -> Vec3 {
    vec3(axis.unit())
}

fn spawn_directional(
    commands: &mut Commands,
    name: &str,
    from: Vec3,
    color: Color,
    lux: f32,
    shadows: bool,
) {
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                color,
                illuminance: lux,
                shadows_enabled: shadows,
                ..default()
            },
            transform: Transform::from_translation(from).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Name::new(name.to_string()),
    ));
}

fn spawn_light_rig(commands: &mut Commands, rig: LightRig, cast_shadows: bool) {
    match rig {
        LightRig::Studio => {
            // Hemisphere: white sky key from above, dark grey bounce from below.
            spawn_directional(
                commands,
                "Sky",
                Vec3::new(0.0, 10.0, 0.1),
                Color::WHITE,
                2_500.0,
                false,
            );
            spawn_directional(
                commands,
                "Ground",
                Vec3::new(0.0, -10.0, 0.1),
                Color::srgb(0.27, 0.27, 0.27),
                1_000.0,
                false,
            );
            spawn_directional(
                commands,
                "Key",
                Vec3::new(3.0, 10.0, 10.0),
                Color::WHITE,
                8_000.0,
                cast_shadows,
            );
            commands.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 500.0,
            });
        }
        LightRig::KeyFill => {
            spawn_directional(
                commands,
                "Key",
                Vec3::new(5.0, 8.0, 5.0),
                Color::WHITE,
                12_000.0,
                cast_shadows,
            );
            spawn_directional(
                commands,
                "Fill",
                Vec3::new(-5.0, 3.0, -2.0),
                Color::WHITE,
                3_000.0,
                false,
            );
            commands.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 150.0,
            });
        }
        LightRig::Flat => {
            commands.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 1_500.0,
            });
        }
    }
}

/// Startup: camera, lights, background and the model load request.
pub fn bootstrap_scene_system(
    mut commands: Commands,
    cfg: Res<SwingSceneConfig>,
    asset_server: Res<AssetServer>,
) {
    let scene: &SceneConfig = &cfg.0;
    let [r, g, b] = scene.background;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));

    let cam = &scene.camera;
    commands.spawn((
        Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: cam.fov_degrees.to_radians(),
                near: cam.near,
                far: cam.far,
                ..default()
            }),
            transform: Transform::from_translation(vec3(cam.position))
                .looking_at(vec3(cam.look_at), Vec3::Y),
            ..default()
        },
        Name::new("SwingCamera"),
    ));

    spawn_light_rig(&mut commands, scene.light_rig, scene.materials.cast_shadows);

    info!("swing: loading {}", scene.model_path);
    let gltf: Handle<Gltf> = asset_server.load(scene.model_path.clone());
    commands.insert_resource(SwingAssets {
        gltf,
        phase: LoadPhase::Pending,
    });
}

/// Once the glTF (and its sub-assets) loaded: pick the clip and spawn the scene.
/// A failed load is reported to the controller; rendering continues without a model.
#[allow(clippy::too_many_arguments)]
pub fn spawn_model_system(
    mut commands: Commands,
    assets: Option<ResMut<SwingAssets>>,
    cfg: Res<SwingSceneConfig>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut ctl: ResMut<SwingControl>,
) {
    let Some(mut assets) = assets else {
        return;
    };
    if assets.phase != LoadPhase::Pending {
        return;
    }
    let path = cfg.0.model_path.clone();

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&assets.gltf) {
        ctl.0.on_assets_loaded(Err(SwingError::AssetLoad {
            path,
            reason: err.to_string(),
        }));
        assets.phase = LoadPhase::Failed;
        return;
    }
    if !asset_server.is_loaded_with_dependencies(&assets.gltf) {
        return;
    }
    let Some(gltf) = gltfs.get(&assets.gltf) else {
        return;
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        ctl.0.on_assets_loaded(Err(SwingError::AssetLoad {
            path,
            reason: "file contains no scene".to_string(),
        }));
        assets.phase = LoadPhase::Failed;
        return;
    };

    let names: HashMap<AssetId<AnimationClip>, String> = gltf
        .named_animations
        .iter()
        .map(|(name, handle)| (handle.id(), name.to_string()))
        .collect();
    let infos: Vec<ClipInfo> = gltf
        .animations
        .iter()
        .map(|handle| ClipInfo {
            name: names.get(&handle.id()).cloned(),
            duration: clips.get(handle).map(AnimationClip::duration).unwrap_or(0.0),
        })
        .collect();

    let clip = match cfg.0.clip.resolve(&infos) {
        Some(i) => {
            let (graph, node) = AnimationGraph::from_clip(gltf.animations[i].clone());
            info!(
                "swing: using clip {} ({:?}, {:.2}s)",
                i, infos[i].name, infos[i].duration
            );
            Some(SelectedClip {
                graph: graphs.add(graph),
                node,
                duration: infos[i].duration,
            })
        }
        None => {
            warn!("swing: {}", SwingError::NoClips { path });
            None
        }
    };

    commands.spawn((
        SceneBundle { scene, ..default() },
        SwingModelRoot,
        Name::new("SwingModel"),
    ));
    assets.phase = LoadPhase::Spawned { clip };
}

fn collect_descendants(root: Entity, children: &Query<&Children>, out: &mut Vec<Entity>) {
    if let Ok(cs) = children.get(root) {
        for &c in cs.iter() {
            out.push(c);
            collect_descendants(c, children, out);
        }
    }
}

fn find_named(entities: &[Entity], names: &Query<&Name>, wanted: &str) -> Option<Entity> {
    entities
        .iter()
        .copied()
        .find(|e| names.get(*e).map(|n| n.as_str() == wanted).unwrap_or(false))
}

/// After the scene instantiated: find the animation player, armature and bone,
/// strip excluded tracks, apply material overrides, and bind the controller.
#[allow(clippy::too_many_arguments)]
pub fn bind_rig_system(
    mut commands: Commands,
    assets: Option<ResMut<SwingAssets>>,
    cfg: Res<SwingSceneConfig>,
    roots: Query<Entity, With<SwingModelRoot>>,
    children: Query<&Children>,
    names: Query<&Name>,
    players: Query<(), With<AnimationPlayer>>,
    transforms: Query<&Transform>,
    targets: Query<(), With<AnimationTarget>>,
    mesh_materials: Query<(Entity, &Handle<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ctl: ResMut<SwingControl>,
) {
    let Some(mut assets) = assets else {
        return;
    };
    let LoadPhase::Spawned { clip } = &assets.phase else {
        return;
    };
    let Ok(root) = roots.get_single() else {
        return;
    };
    let mut all = Vec::new();
    collect_descendants(root, &children, &mut all);
    if all.is_empty() {
        // scene not instantiated yet
        return;
    }
    let scene = &cfg.0;

    let player = all.iter().copied().find(|e| players.contains(*e));
    if clip.is_some() && player.is_none() {
        return;
    }

    let scope = match scene.animation_root.as_deref() {
        Some(name) => match find_named(&all, &names, name) {
            Some(e) => {
                let mut sub = vec![e];
                collect_descendants(e, &children, &mut sub);
                sub
            }
            None => {
                let err = SwingError::MissingNode {
                    name: name.to_string(),
                };
                warn!("swing: {err}; using model root");
                all.clone()
            }
        },
        None => all.clone(),
    };

    let bone = scene.bone_name.as_deref().and_then(|name| {
        let found = find_named(&scope, &names, name);
        if found.is_none() {
            let err = SwingError::MissingNode {
                name: name.to_string(),
            };
            warn!("swing: {err}");
        }
        found
    });
    let bone = bone.map(|e| {
        let rest = transforms.get(e).map(|t| t.rotation).unwrap_or(Quat::IDENTITY);
        BoneProxy::new(e, axis_vec(ctl.0.config().bone_axis), rest)
    });

    for &e in &all {
        if !targets.contains(e) {
            continue;
        }
        if let Ok(name) = names.get(e) {
            if scene.clip.is_track_excluded(name.as_str()) {
                commands.entity(e).remove::<AnimationTarget>();
            }
        }
    }

    for (e, handle) in mesh_materials.iter_many(&all) {
        if scene.materials.double_sided {
            if let Some(mat) = materials.get_mut(handle) {
                mat.double_sided = true;
                mat.cull_mode = None;
            }
        }
        if !scene.materials.cast_shadows {
            commands.entity(e).insert(NotShadowCaster);
        }
    }

    let animation = match (clip, player) {
        (Some(clip), Some(player)) => {
            commands.entity(player).insert(clip.graph.clone());
            commands.insert_resource(SwingRig {
                player,
                node: clip.node,
            });
            Some(ClipMixer::new(clip.duration, scene.clip.loop_mode))
        }
        _ => None,
    };

    info!(
        "swing: rig bound (animation: {}, bone: {})",
        animation.is_some(),
        bone.is_some()
    );
    ctl.0.on_assets_loaded(Ok(LoadedRig { animation, bone }));
    assets.phase = LoadPhase::Bound;
}

/// Debug overlay: a line from each animated joint to its parent.
pub fn draw_skeleton_system(
    mut gizmos: Gizmos,
    joints: Query<(&GlobalTransform, &Parent), With<AnimationTarget>>,
    globals: Query<&GlobalTransform>,
) {
    for (tf, parent) in joints.iter() {
        if let Ok(parent_tf) = globals.get(parent.get()) {
            gizmos.line(
                parent_tf.translation(),
                tf.translation(),
                Color::srgb(0.1, 0.9, 0.3),
            );
        }
    }
}

pub fn show_skeleton(cfg: Res<SwingSceneConfig>) -> bool {
    cfg.0.show_skeleton
}
