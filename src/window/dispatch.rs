//! Raw-notification dispatch: registry lookup, translation, queue append

use glam::Vec2;
use tracing::trace;
use winit::event::{ElementState, MouseScrollDelta};

use crate::backend::{RawWindowEvent, WindowHandle};
use crate::input::{Event, KeyAction, KeyCode, Modifiers, translate_button, translate_key};

use super::registry::Registry;

/// Pixels per scroll line for backends that report line deltas
const LINE_SCROLL_PX: f32 = 20.0;

fn key_action(state: ElementState, repeat: bool) -> KeyAction {
    match (state, repeat) {
        (ElementState::Released, _) => KeyAction::Release,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Pressed, false) => KeyAction::Press,
    }
}

fn to_vec2(position: winit::dpi::PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}

/// Translate one backend notification and append the result to the owning
/// window's queue.
///
/// Runs synchronously inside the pump; never blocks and never calls back
/// into the backend. A handle the registry does not know is a lifecycle bug
/// and panics in [`Registry::lookup`].
pub(crate) fn dispatch(registry: &Registry, handle: WindowHandle, raw: RawWindowEvent) {
    let window = registry.lookup(handle);
    let mut state = window.lock().expect("window state lock poisoned");

    match raw {
        RawWindowEvent::Key {
            key,
            scancode,
            state: element_state,
            repeat,
            modifiers,
        } => {
            state.push_event(Event::Key {
                code: translate_key(key).unwrap_or(KeyCode::Unknown),
                scancode,
                modifiers: Modifiers::from(modifiers),
                action: key_action(element_state, repeat),
            });
        }

        RawWindowEvent::Text { character } => {
            state.push_event(Event::Text { character });
        }

        RawWindowEvent::CursorMoved { position } => {
            let position = to_vec2(position);
            let delta = state
                .last_cursor
                .map(|previous| position - previous)
                .unwrap_or(Vec2::ZERO);
            state.last_cursor = Some(position);
            state.push_event(Event::MouseMove { position, delta });
        }

        RawWindowEvent::MouseButton {
            button,
            state: element_state,
            modifiers,
            position,
        } => match translate_button(button) {
            Some(button) => {
                state.push_event(Event::MouseButton {
                    button,
                    modifiers: Modifiers::from(modifiers),
                    action: key_action(element_state, false),
                    position: to_vec2(position),
                });
            }
            None => {
                trace!(?button, "dropping mouse button with no portable code");
            }
        },

        RawWindowEvent::Scroll { delta } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => {
                    Vec2::new(x * LINE_SCROLL_PX, y * LINE_SCROLL_PX)
                }
                MouseScrollDelta::PixelDelta(position) => to_vec2(position),
            };
            state.push_event(Event::MouseScroll { delta });
        }

        RawWindowEvent::Focus { focused } => {
            // Flag and event mutate together so accessors agree with the stream
            state.focused = focused;
            state.push_event(Event::Focus { focused });
        }
    }
}
