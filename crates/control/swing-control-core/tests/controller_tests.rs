use swing_control_core::{
    AnimationHandle, AxisBone, ClipMixer, ControlConfig, ControlEvent, DeviceClass, InputEvent,
    InteractionState, LoadedRig, LoopMode, SwingController, SwingError, Viewport,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// Mixer double recording lifecycle calls.
#[derive(Debug, Default)]
struct RecordingMixer {
    time_scale: f32,
    time: f32,
    resets: u32,
    plays: u32,
    advances: Vec<f32>,
}

impl AnimationHandle for RecordingMixer {
    fn time_scale(&self) -> f32 {
        self.time_scale
    }
    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }
    fn advance(&mut self, dt: f32) {
        self.time += dt * self.time_scale;
        self.advances.push(dt);
    }
    fn reset(&mut self) {
        self.time = 0.0;
        self.resets += 1;
    }
    fn play(&mut self) {
        self.plays += 1;
    }
}

type Ctl = SwingController<RecordingMixer, AxisBone>;

fn controller() -> Ctl {
    let mut c = Ctl::new(ControlConfig::default());
    c.set_viewport(Viewport::new(200.0, 200.0));
    c
}

fn down(x: f32, y: f32, t: f64) -> InputEvent {
    InputEvent::PointerDown { x, y, timestamp: t }
}
fn mv(x: f32, y: f32, t: f64) -> InputEvent {
    InputEvent::PointerMove { x, y, timestamp: t }
}
fn up(t: f64) -> InputEvent {
    InputEvent::PointerUp {
        x: 0.0,
        y: 0.0,
        timestamp: t,
    }
}

fn count(events: &[ControlEvent], pred: impl Fn(&ControlEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn idle_ticks_keep_the_rest_pose() {
    let mut c = controller();
    c.bind_animation(RecordingMixer::default());
    for _ in 0..5 {
        c.tick(0.25);
        let m = c.animation().unwrap();
        assert_eq!(m.time, 0.0);
        assert_eq!(m.advances.last(), Some(&0.0));
    }
}

#[test]
fn unbound_ticks_are_noops() {
    let mut c = controller();
    for dt in [0.016, 1.0, 10.0] {
        let out = c.tick(dt);
        assert!(out.time_scale.is_none());
        assert!(out.events.is_empty());
    }
    assert!(c.animation().is_none());
    assert_eq!(c.state(), InteractionState::Idle);
}

#[test]
fn start_start_end_spawns_and_disposes_once() {
    let mut c = controller();
    c.handle_event(down(100.0, 100.0, 0.0));
    c.handle_event(down(120.0, 100.0, 0.01));
    c.handle_event(up(0.02));
    let events = c.tick(0.016).events.clone();

    assert_eq!(
        count(&events, |e| matches!(e, ControlEvent::TransientSpawned { .. })),
        1
    );
    assert_eq!(
        count(&events, |e| matches!(e, ControlEvent::TransientDisposed { .. })),
        1
    );
    assert_eq!(c.state(), InteractionState::Idle);
    assert!(c.transient().is_none());
}

#[test]
fn end_without_start_is_ignored() {
    let mut c = controller();
    c.handle_event(up(0.0));
    c.handle_event(InputEvent::TouchEnd {
        x: 0.0,
        y: 0.0,
        timestamp: 0.0,
    });
    assert!(c.tick(0.016).events.is_empty());
}

#[test]
fn end_from_other_device_does_not_end_interaction() {
    let mut c = controller();
    c.handle_event(down(10.0, 10.0, 0.0));
    c.handle_event(InputEvent::TouchEnd {
        x: 10.0,
        y: 10.0,
        timestamp: 0.1,
    });
    assert_eq!(
        c.state(),
        InteractionState::Interacting {
            device: DeviceClass::Mouse
        }
    );
    c.handle_event(up(0.2));
    assert_eq!(c.state(), InteractionState::Idle);
}

#[test]
fn bone_returns_exactly_to_rest_after_interaction() {
    let mut c = controller();
    c.bind_animation(RecordingMixer::default());
    c.bind_bone(AxisBone::new(0.125));

    c.handle_event(down(100.0, 100.0, 0.0));
    let mut t = 0.0;
    for i in 0..12 {
        t += 0.016;
        c.handle_event(mv(100.0 + i as f32, 100.0 - 3.0 * i as f32, t));
        c.tick(0.016);
    }
    assert!(c.bone().unwrap().offset() > 0.0, "upward drag rotates positively");
    c.handle_event(up(t + 0.016));
    c.tick(0.016);
    assert_eq!(c.bone().unwrap().angle, 0.125);
    assert_eq!(c.bone_override().accumulated(), 0.0);
}

#[test]
fn one_unit_per_second_swipe_scales_to_1_2() {
    let mut c = Ctl::new(ControlConfig::default());
    c.set_viewport(Viewport::new(2.0, 2.0));
    c.bind_animation(RecordingMixer::default());

    // Pixel 1.0 on a 2px viewport is NDC 0.0; pixel 1.1 is NDC 0.1.
    c.handle_event(down(1.0, 1.0, 0.0));
    assert_eq!(c.animation().unwrap().time_scale, 1.0);
    c.handle_event(mv(1.1, 1.0, 0.1));
    approx(c.tracker().horizontal_speed(), 1.0, 1e-4);

    let out = c.tick(0.0);
    approx(out.time_scale.unwrap(), 1.2, 1e-4);
}

#[test]
fn same_timestamp_moves_accumulate_over_the_frame() {
    let mut c = controller();
    c.bind_animation(RecordingMixer::default());
    c.bind_bone(AxisBone::new(0.0));
    c.handle_event(down(100.0, 100.0, 0.0));
    c.tick(0.016);

    c.handle_event(mv(101.0, 90.0, 0.016));
    c.handle_event(mv(102.0, 80.0, 0.016));
    approx(c.tracker().horizontal_speed(), 1.25, 1e-4);
    approx(c.tracker().vertical_delta(), 0.2, 1e-5);

    let scale = c.tick(0.016).time_scale.unwrap();
    assert!(scale < c.config().max_time_scale, "scale={scale}");
    approx(c.bone().unwrap().offset(), 0.16, 1e-5);
}

#[test]
fn ball_drifts_three_ticks() {
    let mut c = controller();
    c.handle_event(down(0.0, 0.0, 0.0));
    for _ in 0..3 {
        c.tick(0.016);
    }
    let p = c.transient().unwrap().position;
    approx(p[0], 1.85, 1e-5);
    assert_eq!(p[1], 1.0);
    assert_eq!(p[2], 0.0);
}

#[test]
fn interaction_start_restarts_playback() {
    let mut c = controller();
    c.bind_animation(RecordingMixer::default());
    c.handle_event(down(50.0, 50.0, 0.0));
    let m = c.animation().unwrap();
    assert_eq!(m.plays, 1);
    assert_eq!(m.resets, 1);
    assert_eq!(m.time_scale, 1.0);
}

#[test]
fn still_pointer_decays_time_scale() {
    let mut c = controller();
    c.bind_animation(RecordingMixer::default());
    c.handle_event(down(100.0, 100.0, 0.0));
    let mut prev = c.tick(0.016).time_scale.unwrap();
    for _ in 0..10 {
        let next = c.tick(0.016).time_scale.unwrap();
        assert!(next < prev);
        prev = next;
    }
}

#[test]
fn asset_failure_leaves_handles_unbound_and_reports() {
    let mut c = controller();
    c.on_assets_loaded(Err(SwingError::AssetLoad {
        path: "baseball_batter.glb".into(),
        reason: "404".into(),
    }));
    c.handle_event(down(10.0, 10.0, 0.0));
    let out = c.tick(0.016);
    assert!(out.time_scale.is_none());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, ControlEvent::AssetUnavailable { reason } if reason.contains("404"))));
}

#[test]
fn late_binding_during_interaction_starts_playback() {
    let mut c: SwingController<ClipMixer, AxisBone> = SwingController::new(ControlConfig::default());
    c.handle_event(down(10.0, 10.0, 0.0));
    c.on_assets_loaded(Ok(LoadedRig {
        animation: Some(ClipMixer::new(2.0, LoopMode::Once)),
        bone: None,
    }));
    c.tick(0.5);
    let m = c.animation().unwrap();
    assert!(m.is_playing());
    assert!(m.time() > 0.0);
}
