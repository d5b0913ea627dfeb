#![allow(dead_code)]

use input_tester::error::DisplayError;
use input_tester::render::{Color, Rect, Surface};
use std::cell::RefCell;
use std::rc::Rc;

// Fake font metrics: every character is 6x14.
pub const CHAR_W: i32 = 6;
pub const LINE_H: i32 = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Fill(Rect, Color),
    Hollow(Rect, Color),
    Blit { text: String, rect: Rect },
    Present,
    /// A text raster was freed.
    Dropped(String),
}

type CallLog = Rc<RefCell<Vec<DrawCall>>>;

/// Rendered text that records its own drop in the surface's call log.
pub struct TextRaster {
    pub text: String,
    pub color: Color,
    log: CallLog,
}

impl Drop for TextRaster {
    fn drop(&mut self) {
        self.log.borrow_mut().push(DrawCall::Dropped(self.text.clone()));
    }
}

/// Records draw calls instead of drawing; one `Present` ends a frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: CallLog,
    pub texts_rendered: Vec<String>,
    pub closed: bool,
    pub fail_present: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, drops included.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().clone()
    }

    /// Draw calls grouped per presented frame. Drops are left out.
    pub fn frames(&self) -> Vec<Vec<DrawCall>> {
        let calls: Vec<DrawCall> = self
            .calls()
            .into_iter()
            .filter(|c| !matches!(c, DrawCall::Dropped(_)))
            .collect();
        calls
            .split_inclusive(|c| *c == DrawCall::Present)
            .filter(|f| f.last() == Some(&DrawCall::Present))
            .map(<[DrawCall]>::to_vec)
            .collect()
    }

    pub fn last_frame(&self) -> Vec<DrawCall> {
        self.frames().pop().unwrap_or_default()
    }

    pub fn blits(frame: &[DrawCall]) -> Vec<(&str, Rect)> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCall::Blit { text, rect } => Some((text.as_str(), *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn blitted(frame: &[DrawCall], text: &str) -> bool {
        Self::blits(frame).iter().any(|(t, _)| *t == text)
    }

    pub fn fill_at(frame: &[DrawCall], rect: Rect) -> Option<Color> {
        frame.iter().rev().find_map(|c| match c {
            DrawCall::Fill(r, color) if *r == rect => Some(*color),
            _ => None,
        })
    }

    /// Fills of the given size, in draw order.
    pub fn fills_sized(frame: &[DrawCall], w: i32, h: i32) -> Vec<(Rect, Color)> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill(r, color) if r.w == w && r.h == h => Some((*r, *color)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: DrawCall) {
        self.log.borrow_mut().push(call);
    }
}

impl Surface for RecordingSurface {
    type Raster = TextRaster;

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCall::Fill(rect, color));
    }

    fn hollow_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCall::Hollow(rect, color));
    }

    fn render_text(&mut self, text: &str, color: Color) -> TextRaster {
        self.texts_rendered.push(text.to_string());
        TextRaster { text: text.to_string(), color, log: Rc::clone(&self.log) }
    }

    fn raster_size(&self, raster: &TextRaster) -> (i32, i32) {
        (raster.text.chars().count() as i32 * CHAR_W, LINE_H)
    }

    fn blit(&mut self, raster: &TextRaster, dest: Rect) {
        self.record(DrawCall::Blit { text: raster.text.clone(), rect: dest });
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.record(DrawCall::Present);
        if self.fail_present {
            let lost = minifb::Error::UpdateFailed("surface lost".to_string());
            return Err(DisplayError::Present(lost));
        }
        Ok(())
    }

    fn close_requested(&self) -> bool {
        self.closed
    }
}
