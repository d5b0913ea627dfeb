use super::surface::{Color, Rect};

/// Single-color coverage bitmap, the result of rendering a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: i32,
    pub height: i32,
    pub color: Color,
    pub coverage: Vec<u8>,
}

impl Raster {
    pub fn new(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            color,
            coverage: vec![0; (width * height) as usize],
        }
    }

    /// Keeps the strongest coverage where glyphs overlap.
    pub fn cover(&mut self, x: i32, y: i32, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) as usize;
        self.coverage[idx] = self.coverage[idx].max(coverage);
    }

    pub fn coverage_at(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Software render target; everything is clipped to its bounds.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::default(); (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// The frame as `0xAARRGGBB` words.
    pub fn as_words(&self) -> &[u32] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn clip(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(self.width);
        let y1 = (rect.y + rect.h).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// One-pixel outline drawn inside `rect`.
    pub fn hollow_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.h - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.x + rect.w - 1, rect.y, 1, rect.h), color);
    }

    pub fn blit(&mut self, raster: &Raster, dest: Rect) {
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = raster.coverage_at(x - dest.x, y - dest.y);
                if coverage == 0 {
                    continue;
                }
                let idx = (y * self.width + x) as usize;
                self.pixels[idx] = raster.color.blend_over(self.pixels[idx], coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const WHITE: Color = Color::rgb(255, 255, 255);

    #[test]
    fn fill_is_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_rect(Rect::new(-2, 6, 4, 10), RED);
        assert_eq!(fb.pixel(0, 6), Some(RED));
        assert_eq!(fb.pixel(1, 7), Some(RED));
        assert_eq!(fb.pixel(2, 7), Some(Color::default()));
        assert_eq!(fb.pixel(0, 5), Some(Color::default()));
    }

    #[test]
    fn hollow_leaves_the_middle() {
        let mut fb = Framebuffer::new(10, 10);
        fb.hollow_rect(Rect::new(1, 1, 5, 4), WHITE);
        assert_eq!(fb.pixel(1, 1), Some(WHITE));
        assert_eq!(fb.pixel(5, 4), Some(WHITE));
        assert_eq!(fb.pixel(3, 2), Some(Color::default()));
        assert_eq!(fb.pixel(6, 1), Some(Color::default()));
    }

    #[test]
    fn blit_blends_by_coverage() {
        let mut fb = Framebuffer::new(4, 4);
        let mut raster = Raster::new(2, 1, WHITE);
        raster.cover(0, 0, 255);
        raster.cover(1, 0, 0);
        raster.cover(5, 5, 255);
        fb.blit(&raster, Rect::new(1, 1, 2, 1));
        assert_eq!(fb.pixel(1, 1), Some(WHITE));
        assert_eq!(fb.pixel(2, 1), Some(Color::default()));
    }

    #[test]
    fn words_follow_pixels() {
        let mut fb = Framebuffer::new(2, 1);
        fb.fill_rect(Rect::new(1, 0, 1, 1), Color::rgb(1, 2, 3));
        assert_eq!(fb.as_words().len(), 2);
        if cfg!(target_endian = "little") {
            assert_eq!(fb.as_words()[1], 0xFF01_0203);
        }
    }
}
