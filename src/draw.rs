// The on-screen window: shows the composited image and turns key presses into commands.
// Q / Esc quit, C clears the canvas, closing the window ends the session.

use crate::app::{Command, DisplaySink};
use crate::error::{Error, Result};
use crate::types::FrameBuffer;
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window,
    screen: FrameBuffer, // reused every frame
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self {
            window,
            screen: FrameBuffer::new(width, height),
        })
    }

    fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }
}

impl DisplaySink for Drawer {
    fn present(&mut self, image: &RgbImage) -> Result<()> {
        self.screen.fill_from(image);
        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn is_visible(&self) -> bool {
        self.window.is_open()
    }

    // Key state is refreshed by `update_with_buffer`, so this reflects the last present.
    fn poll_key(&mut self) -> Option<Command> {
        if self.pressed_once(Key::Q) || self.window.is_key_down(Key::Escape) {
            Some(Command::Quit)
        } else if self.pressed_once(Key::C) {
            Some(Command::Clear)
        } else {
            None
        }
    }
}
