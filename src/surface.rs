//! Drawing boundary with the host. The scene emits `DrawCommand`s and any
//! `Surface` can replay them.

use log::trace;

use crate::camera::Viewport;
use crate::points::Rgb;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillCircle {
        x: i32,
        y: i32,
        radius: i32,
        color: Rgb,
        alpha: u8,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        color: Rgb,
    },
}

pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn clear(&mut self, color: Rgb);
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb, alpha: u8);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Rgb);

    fn execute(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color,
                    alpha,
                } => self.fill_circle(*x, *y, *radius, *color, *alpha),
                DrawCommand::FillText {
                    text,
                    x,
                    y,
                    font,
                    color,
                } => self.fill_text(text, *x, *y, font, *color),
            }
        }
    }
}

#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u16;
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// RGBA8 software canvas.
pub struct PixelSurface {
    pixels: Vec<u8>,
    viewport: Viewport,
    texts: Vec<String>,
}

impl PixelSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pixels: vec![0; Self::byte_len(viewport)],
            viewport,
            texts: vec![],
        }
    }

    fn byte_len(viewport: Viewport) -> usize {
        viewport.width as usize * viewport.height as usize * 4
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pixels = vec![0; Self::byte_len(viewport)];
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if !self.viewport.contains(x as i32, y as i32) {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Text drawn since the last clear. Glyphs are not rasterized.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Pixels that are not pure black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| px[0] != 0 || px[1] != 0 || px[2] != 0)
            .count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.viewport.width as usize + x as usize) * 4
    }
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
        self.texts.clear();
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb, alpha: u8) {
        if radius <= 0 || alpha == 0 {
            return;
        }
        let r = radius as f32;
        let min_x = (x - radius).max(0);
        let max_x = (x + radius).min(self.viewport.width as i32 - 1);
        let min_y = (y - radius).max(0);
        let max_y = (y + radius).min(self.viewport.height as i32 - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                // sample at the pixel centre
                let dx = px as f32 + 0.5 - x as f32;
                let dy = py as f32 + 0.5 - y as f32;
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let i = self.index(px as u32, py as u32);
                let dst = &mut self.pixels[i..i + 3];
                dst[0] = blend_channel(color.r, dst[0], alpha);
                dst[1] = blend_channel(color.g, dst[1], alpha);
                dst[2] = blend_channel(color.b, dst[2], alpha);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, _color: Rgb) {
        trace!("Text {text:?} at ({x}, {y}) in {font}");
        self.texts.push(text.to_string());
    }
}

/// Keeps every command it is handed.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: vec![],
        }
    }
}

impl Surface for CommandRecorder {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb, alpha: u8) {
        self.commands.push(DrawCommand::FillCircle {
            x,
            y,
            radius,
            color,
            alpha,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Rgb) {
        self.commands.push(DrawCommand::FillText {
            text: text.into(),
            x,
            y,
            font: font.into(),
            color,
        });
    }
}
