//! Swing a batter model with the mouse or a finger.
//!
//! Usage: cargo run -p bevy_swing_control --example batter [config.json]
//!
//! The model path in the config is resolved against Bevy's `assets/` folder.
//! A missing model is logged and the scene keeps rendering.

use bevy::prelude::*;
use bevy_swing_control::SwingPlugins;
use swing_control_core::AppConfig;

fn load_config() -> AppConfig {
    let Some(path) = std::env::args().nth(1) else {
        return AppConfig::default();
    };
    match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| AppConfig::from_json_str(&s).map_err(|e| e.to_string()))
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config {path}: {e}; using defaults");
            AppConfig::default()
        }
    }
}

fn main() {
    let config = load_config();
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Swing".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SwingPlugins { config })
        .run();
}
