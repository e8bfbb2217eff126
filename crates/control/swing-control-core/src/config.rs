//! Configuration for the control loop and the scene bootstrap collaborator.
//!
//! Every field has a default so hosts can pass partial JSON objects.

use serde::{Deserialize, Serialize};

use crate::clip::ClipSelection;
use crate::error::SwingError;

/// Top-level configuration handed to adapters.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub control: ControlConfig,
    pub scene: SceneConfig,
}

impl AppConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, SwingError> {
        let cfg: AppConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SwingError> {
        self.control.validate()?;
        self.scene.validate()
    }
}

/// Fixed axis a bone override rotates about.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// Tuning constants for the pointer → animation mapping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlConfig {
    /// Multiplier from horizontal pointer speed (NDC units/s) to target time scale.
    pub speed_gain: f32,
    /// Lerp factor applied each tick towards the target time scale, in [0, 1].
    pub smoothing: f32,
    /// Floor for the sample interval when estimating speed (seconds).
    pub speed_epsilon: f32,
    /// Time scale set when an interaction starts.
    pub neutral_time_scale: f32,
    /// Magnitude clamp for the time scale.
    pub max_time_scale: f32,
    /// Radians of bone rotation per NDC unit of vertical pointer motion.
    pub bone_sensitivity: f32,
    pub bone_axis: Axis,
    /// Where the transient ball appears on interaction start.
    pub ball_spawn: [f32; 3],
    /// Ball displacement per tick.
    pub ball_velocity: [f32; 3],
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            speed_gain: 2.0,
            smoothing: 0.2,
            speed_epsilon: 1e-4,
            neutral_time_scale: 1.0,
            max_time_scale: 8.0,
            bone_sensitivity: 0.8,
            bone_axis: Axis::X,
            ball_spawn: [2.0, 1.0, 0.0],
            ball_velocity: [-0.05, 0.0, 0.0],
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), SwingError> {
        let finite = [
            ("speed_gain", self.speed_gain),
            ("smoothing", self.smoothing),
            ("speed_epsilon", self.speed_epsilon),
            ("neutral_time_scale", self.neutral_time_scale),
            ("max_time_scale", self.max_time_scale),
            ("bone_sensitivity", self.bone_sensitivity),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(SwingError::invalid_config(format!("{name} must be finite")));
            }
        }
        if self
            .ball_spawn
            .iter()
            .chain(self.ball_velocity.iter())
            .any(|v| !v.is_finite())
        {
            return Err(SwingError::invalid_config("ball vectors must be finite"));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(SwingError::invalid_config(format!(
                "smoothing {} outside [0, 1]",
                self.smoothing
            )));
        }
        if self.speed_epsilon <= 0.0 {
            return Err(SwingError::invalid_config("speed_epsilon must be positive"));
        }
        if self.max_time_scale <= 0.0 {
            return Err(SwingError::invalid_config("max_time_scale must be positive"));
        }
        if self.neutral_time_scale.abs() > self.max_time_scale {
            return Err(SwingError::invalid_config(
                "neutral_time_scale exceeds max_time_scale",
            ));
        }
        Ok(())
    }
}

/// Light rig presets observed across the scene variants.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LightRig {
    /// Hemisphere (sky/ground) + directional key + ambient fill.
    #[default]
    Studio,
    /// Directional key and a weaker directional fill, low ambient.
    KeyFill,
    /// Ambient only.
    Flat,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            position: [4.0, 3.0, 6.0],
            look_at: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialOverrides {
    /// Render both faces of every mesh material.
    pub double_sided: bool,
    /// Whether skinned meshes cast shadows.
    pub cast_shadows: bool,
}

impl Default for MaterialOverrides {
    fn default() -> Self {
        Self {
            double_sided: true,
            cast_shadows: true,
        }
    }
}

/// Scene bootstrap parameters (camera, lights, model and rig names).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Background color, sRGB components in [0, 1].
    pub background: [f32; 3],
    pub camera: CameraConfig,
    pub light_rig: LightRig,
    pub model_path: String,
    /// Node the animation is bound to; the model root is used when absent.
    pub animation_root: Option<String>,
    /// Bone rotated by vertical pointer motion.
    pub bone_name: Option<String>,
    pub clip: ClipSelection,
    pub materials: MaterialOverrides,
    /// Draw the skeleton as debug lines.
    pub show_skeleton: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            // 0x87ceeb
            background: [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0],
            camera: CameraConfig::default(),
            light_rig: LightRig::Studio,
            model_path: "baseball_batter.glb".to_string(),
            animation_root: Some("Armature001".to_string()),
            bone_name: Some("Bat".to_string()),
            clip: ClipSelection::default(),
            materials: MaterialOverrides::default(),
            show_skeleton: false,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SwingError> {
        if self.model_path.trim().is_empty() {
            return Err(SwingError::invalid_config("model_path is empty"));
        }
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(SwingError::invalid_config(format!(
                "camera fov {} outside (0, 180)",
                cam.fov_degrees
            )));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(SwingError::invalid_config(
                "camera planes must satisfy 0 < near < far",
            ));
        }
        if self.background.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(SwingError::invalid_config(
                "background components must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.control.speed_gain, 2.0);
        assert_eq!(cfg.control.smoothing, 0.2);
        assert_eq!(cfg.scene.model_path, "baseball_batter.glb");
    }

    #[test]
    fn partial_json_overrides_single_field() {
        let cfg =
            AppConfig::from_json_str(r#"{ "control": { "bone_sensitivity": 1.2, "bone_axis": "z" } }"#)
                .unwrap();
        assert_eq!(cfg.control.bone_sensitivity, 1.2);
        assert_eq!(cfg.control.bone_axis, Axis::Z);
        assert_eq!(cfg.control.speed_gain, 2.0);
    }

    #[test]
    fn smoothing_out_of_range_is_rejected() {
        let err = AppConfig::from_json_str(r#"{ "control": { "smoothing": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, SwingError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AppConfig::from_json_str("{ control: }").unwrap_err();
        assert!(matches!(err, SwingError::Parse(_)));
    }

    #[test]
    fn camera_planes_are_checked() {
        let mut cfg = AppConfig::default();
        cfg.scene.camera.near = 10.0;
        cfg.scene.camera.far = 1.0;
        assert!(cfg.validate().is_err());
    }
}
