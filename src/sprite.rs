//! Sprite decoding and half-block rendering

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::widgets::Widget;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const ALPHA_THRESHOLD: u8 = 128;

#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no visible pixels")]
    Empty,
}

/// Decoded RGBA sprite, cropped to its visible pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpriteData {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = self.pixels.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        let [r, g, b, a] = self.pixel(x, y)?;
        (a >= ALPHA_THRESHOLD).then_some(Color::Rgb(r, g, b))
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, SpriteError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in image.enumerate_pixels() {
        if px[3] >= ALPHA_THRESHOLD {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return Err(SpriteError::Empty);
    }

    let cropped_width = max_x - min_x + 1;
    let cropped_height = max_y - min_y + 1;
    let mut pixels = Vec::with_capacity((cropped_width * cropped_height * 4) as usize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            pixels.extend_from_slice(&image.get_pixel(x, y).0);
        }
    }

    Ok(SpriteData {
        width: cropped_width,
        height: cropped_height,
        pixels,
    })
}

/// Draws a sprite with upper half blocks, two pixel rows per terminal row.
pub struct SpriteView<'a> {
    pub sprite: &'a SpriteData,
}

impl Widget for SpriteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sprite = self.sprite;
        if area.is_empty() || sprite.width == 0 || sprite.height == 0 {
            return;
        }

        let (cols, rows, scale) = sprite_fit(sprite, area.width, area.height);
        let offset_x = area.x + area.width.saturating_sub(cols) / 2;
        let offset_y = area.y + area.height.saturating_sub(rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let src_x = (col as f32 * scale) as u32;
                let top = sprite.color_at(src_x, ((row * 2) as f32 * scale) as u32);
                let bottom = sprite.color_at(src_x, ((row * 2 + 1) as f32 * scale) as u32);
                let Some(cell) = buf.cell_mut(Position::new(offset_x + col, offset_y + row))
                else {
                    continue;
                };
                match (top, bottom) {
                    (Some(top), Some(bottom)) => {
                        cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                    }
                    (Some(top), None) => {
                        cell.set_symbol("▀").set_fg(top);
                    }
                    (None, Some(bottom)) => {
                        cell.set_symbol("▄").set_fg(bottom);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

/// Returns (cols, rows, source pixels per target pixel).
fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16, f32) {
    let scale_x = sprite.width as f32 / max_cols as f32;
    let scale_y = sprite.height as f32 / (max_rows as f32 * 2.0);
    let scale = scale_x.max(scale_y).max(f32::EPSILON);
    let cols = ((sprite.width as f32 / scale).floor() as u16).clamp(1, max_cols);
    let rows = ((sprite.height as f32 / scale / 2.0).ceil() as u16).clamp(1, max_rows);
    (cols, rows, scale)
}
