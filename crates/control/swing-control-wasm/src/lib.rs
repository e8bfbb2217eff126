use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use swing_control_core::{
    AxisBone, ClipMixer, ControlConfig, FrameOutputs, InputEvent, LoopMode,
    SwingController, SwingError, Viewport,
};

/// Browser-facing controller. The host owns the renderer: it feeds pointer
/// events, calls `tick` once per frame and mirrors the returned outputs.
#[wasm_bindgen]
pub struct SwingControl {
    core: SwingController<ClipMixer, AxisBone>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn init_logging() {
    // A second init fails because the logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// `tick` payload: the core outputs plus the clip clock and bone state the
/// host applies to its own mixer and skeleton.
#[derive(Serialize)]
struct TickOutputs<'a> {
    #[serde(flatten)]
    frame: &'a FrameOutputs,
    clip_time: Option<f32>,
    clip_playing: bool,
    bone_angle: Option<f32>,
}

#[wasm_bindgen]
impl SwingControl {
    /// Create a controller. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new SwingControl({ speed_gain: 3.0, smoothing: 0.1 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SwingControl, JsError> {
        console_error_panic_hook::set_once();
        init_logging();

        let cfg: ControlConfig = if jsvalue_is_undefined_or_null(&config) {
            ControlConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        cfg.validate()
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(SwingControl {
            core: SwingController::new(cfg),
        })
    }

    /// Canvas size in CSS pixels; used to normalize pointer coordinates.
    #[wasm_bindgen(js_name = set_viewport)]
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.core.set_viewport(Viewport::new(width, height));
    }

    /// Bind the loaded clip by duration (seconds). `looping` defaults to play-once.
    #[wasm_bindgen(js_name = bind_clip)]
    pub fn bind_clip(&mut self, duration: f32, looping: Option<bool>) -> Result<(), JsError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(JsError::new(&format!(
                "bind_clip: invalid duration {duration}"
            )));
        }
        let mode = if looping.unwrap_or(false) {
            LoopMode::Repeat
        } else {
            LoopMode::Once
        };
        self.core.bind_animation(ClipMixer::new(duration, mode));
        Ok(())
    }

    /// Bind the override bone by its rest angle (radians) about the configured axis.
    #[wasm_bindgen(js_name = bind_bone)]
    pub fn bind_bone(&mut self, rest: f32) {
        self.core.bind_bone(AxisBone::new(rest));
    }

    /// Report that the host failed to load the model. Handles stay unbound and
    /// the next `tick` carries an `asset_unavailable` event.
    #[wasm_bindgen(js_name = report_load_error)]
    pub fn report_load_error(&mut self, path: String, message: String) {
        let err = SwingError::AssetLoad {
            path,
            reason: message,
        };
        self.core.on_assets_loaded(Err(err));
    }

    /// Push one input event, e.g. `{ type: "pointer_down", x, y, timestamp }`.
    #[wasm_bindgen(js_name = handle_event)]
    pub fn handle_event(&mut self, event: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&event) {
            return Err(JsError::new("handle_event: event is null/undefined"));
        }
        let ev: InputEvent = swb::from_value(event)
            .map_err(|e| JsError::new(&format!("handle_event parse error: {e}")))?;
        self.core.handle_event(ev);
        Ok(())
    }

    /// Same as `handle_event` but takes a JSON string.
    #[wasm_bindgen(js_name = handle_event_json)]
    pub fn handle_event_json(&mut self, json: String) -> Result<(), JsError> {
        let ev: InputEvent = serde_json::from_str(&json)
            .map_err(|e| JsError::new(&format!("handle_event_json parse error: {e}")))?;
        self.core.handle_event(ev);
        Ok(())
    }

    #[wasm_bindgen(js_name = pointer_down)]
    pub fn pointer_down(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core
            .handle_event(InputEvent::PointerDown { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core
            .handle_event(InputEvent::PointerMove { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = pointer_up)]
    pub fn pointer_up(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core.handle_event(InputEvent::PointerUp { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = touch_start)]
    pub fn touch_start(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core
            .handle_event(InputEvent::TouchStart { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = touch_move)]
    pub fn touch_move(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core
            .handle_event(InputEvent::TouchMove { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = touch_end)]
    pub fn touch_end(&mut self, x: f32, y: f32, timestamp: f64) {
        self.core.handle_event(InputEvent::TouchEnd { x, y, timestamp });
    }

    #[wasm_bindgen(js_name = is_interacting)]
    pub fn is_interacting(&self) -> bool {
        self.core.is_interacting()
    }

    /// Advance one frame by dt (seconds). Returns the frame outputs as a JS object.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) -> Result<JsValue, JsError> {
        let out = self.tick_outputs(dt);
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Same as `tick` but returns a JSON string.
    #[wasm_bindgen(js_name = tick_json)]
    pub fn tick_json(&mut self, dt: f32) -> Result<String, JsError> {
        let out = self.tick_outputs(dt);
        serde_json::to_string(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Current config as a plain JS object.
    #[wasm_bindgen]
    pub fn config(&self) -> Result<JsValue, JsError> {
        let s = serde_json::to_string(self.core.config())
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        JSON::parse(&s).map_err(|e| JsError::new(&format!("config parse error: {e:?}")))
    }
}

impl SwingControl {
    fn tick_outputs(&mut self, dt: f32) -> TickOutputs<'_> {
        self.core.tick(dt);
        let core = &self.core;
        TickOutputs {
            frame: core.outputs(),
            clip_time: core.animation().map(ClipMixer::time),
            clip_playing: core.animation().map(ClipMixer::is_playing).unwrap_or(false),
            bone_angle: core.bone().map(|b| b.angle),
        }
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
