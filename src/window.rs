// Desktop host: a minifb window that shows the pencil's frame buffer and feeds it input.
// minifb is polled, so edges (press / release / motion) are derived by comparing frames.

use minifb::{Key as WindowKey, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::{Error, Result};
use crate::input::{Device, InputEvent, Key, PointerEvent};
use crate::types::FrameBuffer;

/// Keys the host handles itself; they never reach the pencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Clear,
    Save,
    ShrinkPixels,
    GrowPixels,
    /// Palette slot 0..=7, from keys 1..8.
    Palette(usize),
}

const PALETTE_KEYS: [WindowKey; 8] = [
    WindowKey::Key1,
    WindowKey::Key2,
    WindowKey::Key3,
    WindowKey::Key4,
    WindowKey::Key5,
    WindowKey::Key6,
    WindowKey::Key7,
    WindowKey::Key8,
];

pub struct Drawer {
    window: Window,
    mouse_down: bool,
    last_pos: Option<(f32, f32)>,
}

impl Drawer {
    /// Create a window sized to the drawing surface.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, mouse_down: false, last_pos: None })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Pointer and key events since the last call, in the order a browser would fire them.
    /// Positions are window-local, so the surface origin is (0, 0).
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        // Pass, not Clamp: dragging off the window must still produce samples.
        let pos = self.window.get_mouse_pos(MouseMode::Pass);
        let down = self.window.get_mouse_down(MouseButton::Left);

        match (self.mouse_down, down, pos) {
            (false, true, Some((x, y))) => {
                events.push(InputEvent::Down(PointerEvent::mouse(x as f64, y as f64)));
                self.mouse_down = true;
            },
            (true, true, Some((x, y))) if self.last_pos != pos => {
                events.push(InputEvent::Move(PointerEvent::mouse(x as f64, y as f64)));
            },
            (true, false, _) => {
                events.push(InputEvent::Up(Device::Mouse));
                self.mouse_down = false;
            },
            _ => {},
        }
        self.last_pos = pos.or(self.last_pos);

        if self.window.is_key_pressed(WindowKey::Escape, KeyRepeat::No) {
            events.push(InputEvent::KeyDown(Key::Escape));
        }
        events
    }

    pub fn commands(&self) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        if self.pressed_once(WindowKey::C) {
            commands.push(HostCommand::Clear);
        }
        if self.pressed_once(WindowKey::S) {
            commands.push(HostCommand::Save);
        }
        if self.pressed_once(WindowKey::LeftBracket) {
            commands.push(HostCommand::ShrinkPixels);
        }
        if self.pressed_once(WindowKey::RightBracket) {
            commands.push(HostCommand::GrowPixels);
        }
        for (slot, key) in PALETTE_KEYS.iter().enumerate() {
            if self.pressed_once(*key) {
                commands.push(HostCommand::Palette(slot));
            }
        }
        commands
    }

    fn pressed_once(&self, key: WindowKey) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }
}
