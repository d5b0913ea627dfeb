use super::framebuffer::{Framebuffer, Raster};
use super::surface::{Color, Rect, Surface};
use super::text::TextRenderer;
use crate::error::{DisplayError, InitError};
use minifb::{Scale, Window, WindowOptions};

/// Borderless window scaled to the screen, showing a software framebuffer.
pub struct Display {
    window: Window,
    frame: Framebuffer,
    text: TextRenderer,
}

impl Display {
    pub fn open(
        title: &str,
        width: i32,
        height: i32,
        text: TextRenderer,
    ) -> Result<Self, InitError> {
        let mut window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions {
                borderless: true,
                resize: false,
                scale: Scale::FitScreen,
                ..WindowOptions::default()
            },
        )
        .map_err(InitError::Window)?;
        window.set_cursor_visibility(false);

        Ok(Self {
            window,
            frame: Framebuffer::new(width, height),
            text,
        })
    }
}

impl Surface for Display {
    type Raster = Raster;

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rect(rect, color);
    }

    fn hollow_rect(&mut self, rect: Rect, color: Color) {
        self.frame.hollow_rect(rect, color);
    }

    fn render_text(&mut self, text: &str, color: Color) -> Raster {
        self.text.render(text, color)
    }

    fn raster_size(&self, raster: &Raster) -> (i32, i32) {
        (raster.width, raster.height)
    }

    fn blit(&mut self, raster: &Raster, dest: Rect) {
        self.frame.blit(raster, dest);
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.window
            .update_with_buffer(
                self.frame.as_words(),
                self.frame.width() as usize,
                self.frame.height() as usize,
            )
            .map_err(DisplayError::Present)
    }

    fn close_requested(&self) -> bool {
        !self.window.is_open()
    }
}
