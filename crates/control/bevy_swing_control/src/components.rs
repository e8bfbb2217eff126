use bevy::prelude::*;

/// Marker on the spawned glTF scene root. Rig binding walks its descendants.
#[derive(Component)]
pub struct SwingModelRoot;

/// Visual for a core transient object, matched by id.
/// Mesh/material handles are kept so disposal can release the assets.
#[derive(Component, Debug, Clone)]
pub struct SwingBall {
    pub id: u64,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<StandardMaterial>>,
}
