//! Translation from Bevy window/mouse/touch events into controller inputs.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::resources::{SwingControl, SwingInput};
use swing_control_core::{DeviceClass, InputEvent, PointerPhase, Viewport};

/// Left mouse button press/release plus cursor motion, in window logical pixels.
pub fn mouse_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut out: EventWriter<SwingInput>,
) {
    let now = time.elapsed_seconds_f64();
    let cursor_pos = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position);

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(p) = cursor_pos {
            out.send(SwingInput(InputEvent::PointerDown {
                x: p.x,
                y: p.y,
                timestamp: now,
            }));
        }
    }
    for ev in cursor.read() {
        out.send(SwingInput(InputEvent::PointerMove {
            x: ev.position.x,
            y: ev.position.y,
            timestamp: now,
        }));
    }
    if buttons.just_released(MouseButton::Left) {
        let p = cursor_pos.unwrap_or_default();
        out.send(SwingInput(InputEvent::PointerUp {
            x: p.x,
            y: p.y,
            timestamp: now,
        }));
    }
}

/// Touch events of the first finger down; other fingers are ignored until it lifts.
pub fn touch_input_system(
    mut touches: EventReader<TouchInput>,
    mut primary: Local<Option<u64>>,
    time: Res<Time>,
    mut out: EventWriter<SwingInput>,
) {
    let now = time.elapsed_seconds_f64();
    for t in touches.read() {
        let phase = match t.phase {
            TouchPhase::Started => {
                if primary.is_some() {
                    continue;
                }
                *primary = Some(t.id);
                PointerPhase::Start
            }
            TouchPhase::Moved => PointerPhase::Move,
            // A cancelled touch ends the interaction like a lift.
            TouchPhase::Ended | TouchPhase::Canceled => PointerPhase::End,
        };
        if *primary != Some(t.id) {
            continue;
        }
        if phase == PointerPhase::End {
            *primary = None;
        }
        out.send(SwingInput(InputEvent::new(
            DeviceClass::Touch,
            phase,
            t.position.x,
            t.position.y,
            now,
        )));
    }
}

/// Keep the controller's normalization viewport in sync with the primary window.
/// Camera aspect and surface size follow the window through Bevy itself.
pub fn sync_viewport_system(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut ctl: ResMut<SwingControl>,
) {
    if let Ok(window) = windows.get_single() {
        ctl.0
            .set_viewport(Viewport::new(window.width(), window.height()));
    }
}
