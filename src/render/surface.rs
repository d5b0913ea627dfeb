use crate::error::DisplayError;
use bytemuck::{Pod, Zeroable};

/// One pixel. The field order makes a little-endian `u32` view read as
/// `0xAARRGGBB`, which is what the window backend takes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 255 }
    }

    /// Mixes `self` over `below` with the given coverage (0 = none, 255 = full).
    pub fn blend_over(self, below: Color, coverage: u8) -> Color {
        let mix = |top: u8, bottom: u8| -> u8 {
            let c = coverage as u32;
            ((top as u32 * c + bottom as u32 * (255 - c) + 127) / 255) as u8
        };
        Color {
            b: mix(self.b, below.b),
            g: mix(self.g, below.g),
            r: mix(self.r, below.r),
            a: 255,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }
}

/// Drawing primitives the renderer needs. Rasters are pre-rendered text.
pub trait Surface {
    type Raster;

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn hollow_rect(&mut self, rect: Rect, color: Color);
    fn render_text(&mut self, text: &str, color: Color) -> Self::Raster;
    /// Width and height in pixels.
    fn raster_size(&self, raster: &Self::Raster) -> (i32, i32);
    fn blit(&mut self, raster: &Self::Raster, dest: Rect);
    /// Shows the composed frame. Rasters blitted during the frame must stay
    /// alive until this returns.
    fn present(&mut self) -> Result<(), DisplayError>;

    /// True once the user asked to close the display.
    fn close_requested(&self) -> bool {
        false
    }
}
