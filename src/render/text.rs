use super::framebuffer::Raster;
use super::surface::Color;
use crate::error::InitError;
use ab_glyph::{point, Font, FontArc, FontVec, PxScale, ScaleFont};
use std::path::Path;

/// Rasterizes single lines of text with one TTF font at one size.
pub struct TextRenderer {
    font: FontArc,
    scale: PxScale,
}

impl TextRenderer {
    pub fn load(path: &Path, point_size: f32) -> Result<Self, InitError> {
        let bytes = std::fs::read(path).map_err(|source| InitError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes, point_size).map_err(|source| InitError::FontParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, point_size: f32) -> Result<Self, ab_glyph::InvalidFont> {
        let font = FontArc::new(FontVec::try_from_vec(bytes)?);
        Ok(Self::from_font(font, point_size))
    }

    /// Sizes the font so one em is `point_size` pixels (72 dpi).
    pub fn from_font(font: FontArc, point_size: f32) -> Self {
        let scale = match font.units_per_em() {
            Some(units) if units > 0.0 => {
                PxScale::from(point_size * font.height_unscaled() / units)
            }
            _ => PxScale::from(point_size),
        };
        Self { font, scale }
    }

    pub fn render(&self, text: &str, color: Color) -> Raster {
        let scaled = self.font.as_scaled(self.scale);

        let mut width = 0.0f32;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        let mut raster = Raster::new(
            width.ceil() as i32,
            (scaled.ascent() - scaled.descent()).ceil() as i32,
            color,
        );

        let mut caret = point(0.0, scaled.ascent());
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, c| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                raster.cover(x, y, (c.clamp(0.0, 1.0) * 255.0).round() as u8);
            });
        }

        raster
    }
}
