/// Input sampling.
///
/// The simulation only ever sees a `FrameInput`: the state of every control
/// for one frame. `KeyTracker` builds those snapshots out of the raw
/// crossterm event stream.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;

use crate::display::Viewport;
use crate::maps::MapId;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// OS key-repeat runs at 15 Hz or faster, so 8 frames @ 60 FPS (≈133 ms)
/// is refreshed before it expires.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Primary fire is held this frame.
    pub fire: bool,
    /// Pointer position in world units.
    pub pointer: Vec2,
    pub restart: bool,
    pub quit: bool,
    pub map_choice: Option<MapId>,
}

/// Turns press / repeat / release and mouse events into per-frame snapshots.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): real `Release`
///   events remove keys immediately.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Held key → frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    pointer: Vec2,
    mouse_fire: bool,
    restart: bool,
    quit: bool,
    map_choice: Option<MapId>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame; call once before draining that frame's events.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: &Event, viewport: &Viewport) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, viewport),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, self.frame);
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
                    KeyCode::Char(c) => {
                        if let Some(map) = MapId::from_key(c) {
                            self.map_choice = Some(map);
                        }
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, viewport: &Viewport) {
        self.pointer = viewport.to_world(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.mouse_fire = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_fire = false,
            _ => {}
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    /// Snapshot the current frame. One-shot actions (restart, quit, map
    /// choice) are reported once and then cleared.
    pub fn sample(&mut self) -> FrameInput {
        let input = FrameInput {
            up: self.any_held(&[KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Up]),
            down: self.any_held(&[KeyCode::Char('s'), KeyCode::Char('S'), KeyCode::Down]),
            left: self.any_held(&[KeyCode::Char('a'), KeyCode::Char('A'), KeyCode::Left]),
            right: self.any_held(&[KeyCode::Char('d'), KeyCode::Char('D'), KeyCode::Right]),
            fire: self.mouse_fire || self.is_held(KeyCode::Char(' ')),
            pointer: self.pointer,
            restart: self.restart,
            quit: self.quit,
            map_choice: self.map_choice,
        };
        self.restart = false;
        self.quit = false;
        self.map_choice = None;
        input
    }
}
