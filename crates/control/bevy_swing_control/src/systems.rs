use bevy::prelude::*;

use crate::components::SwingBall;
use crate::resources::{BallStyle, SwingControl, SwingInput, SwingRig};
use swing_control_core::{AnimationHandle, ControlEvent, TransientObject};

/// Feed this frame's inputs into the controller and tick it with the frame delta.
pub fn drive_controller_system(
    mut ctl: ResMut<SwingControl>,
    mut inputs: EventReader<SwingInput>,
    time: Res<Time>,
) {
    for SwingInput(event) in inputs.read() {
        ctl.0.handle_event(*event);
    }
    ctl.0.tick(time.delta_seconds());
}

fn spawn_ball(
    commands: &mut Commands,
    object: &TransientObject,
    style: &BallStyle,
    meshes: Option<&mut Assets<Mesh>>,
    materials: Option<&mut Assets<StandardMaterial>>,
) {
    let transform = Transform::from_translation(Vec3::from_array(object.position));
    match (meshes, materials) {
        (Some(meshes), Some(materials)) => {
            let mesh = meshes.add(Sphere::new(style.radius));
            let material = materials.add(StandardMaterial {
                base_color: style.color,
                ..default()
            });
            commands.spawn((
                PbrBundle {
                    mesh: mesh.clone(),
                    material: material.clone(),
                    transform,
                    ..default()
                },
                SwingBall {
                    id: object.id,
                    mesh: Some(mesh),
                    material: Some(material),
                },
                Name::new("SwingBall"),
            ));
        }
        // Headless: no render assets, keep the transform only.
        _ => {
            commands.spawn((
                SpatialBundle::from_transform(transform),
                SwingBall {
                    id: object.id,
                    mesh: None,
                    material: None,
                },
                Name::new("SwingBall"),
            ));
        }
    }
}

/// Mirror transient objects: spawn on spawn events, release on dispose events,
/// and follow the alive object's position every frame.
pub fn sync_transients_system(
    mut commands: Commands,
    ctl: Res<SwingControl>,
    style: Res<BallStyle>,
    mut balls: Query<(Entity, &SwingBall, &mut Transform)>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let outputs = ctl.0.outputs();
    for event in &outputs.events {
        match event {
            ControlEvent::TransientSpawned { object } => {
                // Spawn at the already stepped position when it is still alive.
                let current = outputs
                    .transient
                    .filter(|t| t.id == object.id)
                    .unwrap_or(*object);
                spawn_ball(
                    &mut commands,
                    &current,
                    &style,
                    meshes.as_deref_mut(),
                    materials.as_deref_mut(),
                );
            }
            ControlEvent::TransientDisposed { id } => {
                for (entity, ball, _) in balls.iter() {
                    if ball.id != *id {
                        continue;
                    }
                    if let (Some(h), Some(meshes)) = (&ball.mesh, meshes.as_deref_mut()) {
                        meshes.remove(h);
                    }
                    if let (Some(h), Some(materials)) = (&ball.material, materials.as_deref_mut())
                    {
                        materials.remove(h);
                    }
                    commands.entity(entity).despawn_recursive();
                }
            }
            ControlEvent::AssetUnavailable { reason } => {
                warn!("swing: model unavailable, continuing without animation: {reason}");
            }
            _ => {}
        }
    }

    if let Some(alive) = outputs.transient {
        for (_, ball, mut tf) in balls.iter_mut() {
            if ball.id == alive.id {
                tf.translation = Vec3::from_array(alive.position);
            }
        }
    }
}

/// Copy the core clip clock onto Bevy's (paused) active animation before
/// Bevy's animation systems sample it.
pub fn sync_clip_time_system(
    ctl: Res<SwingControl>,
    rig: Option<Res<SwingRig>>,
    mut players: Query<&mut AnimationPlayer>,
) {
    let (Some(rig), Some(mixer)) = (rig, ctl.0.animation()) else {
        return;
    };
    let Ok(mut player) = players.get_mut(rig.player) else {
        return;
    };
    let active = player.play(rig.node);
    active.pause();
    active.set_speed(mixer.time_scale());
    active.seek_to(mixer.time());
}

/// Write staged bone rotation after the animated pose, before transform propagation.
pub fn apply_bone_override_system(
    mut ctl: ResMut<SwingControl>,
    mut transforms: Query<&mut Transform>,
) {
    let Some(bone) = ctl.0.bone_mut() else {
        return;
    };
    if let Ok(mut tf) = transforms.get_mut(bone.entity) {
        bone.flush(&mut tf);
    }
}
