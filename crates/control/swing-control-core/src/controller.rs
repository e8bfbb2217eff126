//! SwingController: the interaction context owned by the per-frame driver.
//!
//! Holds the mutable interaction state: pointer, animation binding, bone
//! binding, transient object and interaction flag. Hosts push [`InputEvent`]s as they arrive and call
//! [`SwingController::tick`] once per frame before rendering.
//!
//! Per-tick order: pointer speed/delta → animation → bone override →
//! transient step → pointer settle. Reversing animation and bone override
//! would let the baked pose clobber the override.

use crate::bone::BoneOverride;
use crate::config::ControlConfig;
use crate::driver::AnimationDriver;
use crate::error::SwingError;
use crate::handle::{AnimationHandle, BoneHandle};
use crate::inputs::{DeviceClass, InputEvent, PointerPhase};
use crate::outputs::{ControlEvent, FrameOutputs};
use crate::pointer::{PointerSample, PointerTracker, Viewport};
use crate::transient::{TransientObject, TransientObjectManager};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Interacting {
        device: DeviceClass,
    },
}

/// Handles produced by an adapter once the model finished loading.
#[derive(Debug)]
pub struct LoadedRig<A, B> {
    /// `None` when the asset carries no usable clip.
    pub animation: Option<A>,
    /// `None` when the bone name was not found.
    pub bone: Option<B>,
}

#[derive(Debug)]
pub struct SwingController<A, B> {
    cfg: ControlConfig,
    viewport: Viewport,
    state: InteractionState,
    tracker: PointerTracker,
    driver: AnimationDriver<A>,
    bone_override: BoneOverride,
    bone: Option<B>,
    transients: TransientObjectManager,
    // Events raised by input handling, drained into the next frame's outputs.
    pending: Vec<ControlEvent>,
    outputs: FrameOutputs,
}

impl<A: AnimationHandle, B: BoneHandle> SwingController<A, B> {
    pub fn new(cfg: ControlConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            state: InteractionState::Idle,
            tracker: PointerTracker::new(cfg.speed_epsilon),
            driver: AnimationDriver::new(&cfg),
            bone_override: BoneOverride::new(cfg.bone_sensitivity),
            bone: None,
            transients: TransientObjectManager::new(cfg.ball_velocity),
            pending: Vec::new(),
            outputs: FrameOutputs::default(),
            cfg,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.cfg
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Viewport used to normalize raw coordinates. Does not touch interaction state.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_interacting(&self) -> bool {
        matches!(self.state, InteractionState::Interacting { .. })
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn driver(&self) -> &AnimationDriver<A> {
        &self.driver
    }

    pub fn animation(&self) -> Option<&A> {
        self.driver.handle()
    }

    pub fn animation_mut(&mut self) -> Option<&mut A> {
        self.driver.handle_mut()
    }

    pub fn bone(&self) -> Option<&B> {
        self.bone.as_ref()
    }

    pub fn bone_mut(&mut self) -> Option<&mut B> {
        self.bone.as_mut()
    }

    pub fn bone_override(&self) -> &BoneOverride {
        &self.bone_override
    }

    pub fn transient(&self) -> Option<&TransientObject> {
        self.transients.alive()
    }

    /// Outputs of the most recent tick.
    pub fn outputs(&self) -> &FrameOutputs {
        &self.outputs
    }

    pub fn bind_animation(&mut self, animation: A) {
        self.driver.bind(animation);
        if self.is_interacting() {
            self.driver.on_interaction_start();
        }
    }

    pub fn bind_bone(&mut self, bone: B) {
        self.bone = Some(bone);
    }

    /// Completion of the external asynchronous load. Failures leave every
    /// handle unbound and are logged, never returned to the frame loop.
    pub fn on_assets_loaded(&mut self, result: Result<LoadedRig<A, B>, SwingError>) {
        match result {
            Ok(rig) => {
                match rig.animation {
                    Some(anim) => self.bind_animation(anim),
                    None => log::warn!("swing: model has no usable clip; animation stays unbound"),
                }
                match rig.bone {
                    Some(bone) => self.bind_bone(bone),
                    None => log::warn!("swing: override bone not found; bone override disabled"),
                }
            }
            Err(err) => {
                log::error!("swing: {err}");
                self.driver.unbind();
                self.bone = None;
                self.pending.push(ControlEvent::AssetUnavailable {
                    reason: err.to_string(),
                });
            }
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        let (x, y, timestamp) = event.position();
        let device = event.device();
        match event.phase() {
            PointerPhase::Start => self.start(device, x, y, timestamp),
            PointerPhase::Move => {
                if let InteractionState::Interacting { device: active } = self.state {
                    if active != device {
                        return;
                    }
                }
                self.tracker.sample(x, y, timestamp, &self.viewport);
            }
            PointerPhase::End => self.end(device),
        }
    }

    fn start(&mut self, device: DeviceClass, x: f32, y: f32, timestamp: f64) {
        if self.is_interacting() {
            log::debug!("swing: start from {device:?} ignored, already interacting");
            return;
        }
        self.state = InteractionState::Interacting { device };
        let (nx, ny) = self.viewport.normalize(x, y);
        self.tracker.begin(PointerSample {
            x: nx,
            y: ny,
            timestamp,
        });
        self.driver.on_interaction_start();
        let (object, replaced) = self.transients.spawn(self.cfg.ball_spawn);
        if let Some(old) = replaced {
            self.pending
                .push(ControlEvent::TransientDisposed { id: old.id });
        }
        self.pending
            .push(ControlEvent::InteractionStarted { device });
        self.pending.push(ControlEvent::TransientSpawned { object });
        log::debug!("swing: interaction started ({device:?})");
    }

    fn end(&mut self, device: DeviceClass) {
        match self.state {
            InteractionState::Interacting { device: active } if active == device => {}
            _ => {
                log::debug!("swing: end from {device:?} without matching start ignored");
                return;
            }
        }
        self.bone_override.reset(self.bone.as_mut());
        self.driver.on_interaction_end();
        if let Some(old) = self.transients.dispose() {
            self.pending
                .push(ControlEvent::TransientDisposed { id: old.id });
        }
        self.tracker.clear();
        self.state = InteractionState::Idle;
        self.pending.push(ControlEvent::InteractionEnded { device });
        log::debug!("swing: interaction ended ({device:?})");
    }

    /// Advance one frame by `dt` seconds and return this frame's outputs.
    pub fn tick(&mut self, dt: f32) -> &FrameOutputs {
        self.outputs.clear();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let interacting = self.is_interacting();

        let speed = self.tracker.horizontal_speed();
        let vertical = self.tracker.vertical_delta();

        self.driver.tick(dt, interacting, speed);
        self.bone_override
            .apply(self.bone.as_mut(), vertical, interacting);
        self.transients.step();
        self.tracker.settle();

        self.outputs.interacting = interacting;
        self.outputs.time_scale = self.driver.time_scale();
        self.outputs.transient = self.transients.alive().copied();
        self.outputs.events.append(&mut self.pending);
        &self.outputs
    }
}
