use std::io::{self, Write};

use crate::color::Rgb;

/// RGB raster addressed in world units and presented as half-block characters.
///
/// Drawing works like a 2D canvas context: a fill style with its own alpha,
/// a global alpha shared by every later fill, and `fill_rect` blending over
/// whatever is already there.
pub struct Surface {
    width: usize,
    height: usize,
    scale: f32,
    pixels: Vec<Rgb>,
    fill_color: Rgb,
    fill_alpha: f32,
    global_alpha: f32,
    output_buf: Vec<u8>,
}

impl Surface {
    /// `width` and `height` are in pixels, `scale` is world units per pixel.
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            pixels: vec![(0, 0, 0); width * height],
            fill_color: (0, 0, 0),
            fill_alpha: 1.0,
            global_alpha: 1.0,
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    /// Surface for a terminal of `cols` x `rows` cells (two pixels per cell).
    pub fn for_terminal(cols: u16, rows: u16, scale: f32) -> Self {
        Self::new(cols as usize, rows as usize * 2, scale)
    }

    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.scale
    }

    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.scale
    }

    /// World point at the middle of a terminal cell.
    pub fn cell_center(&self, column: u16, row: u16) -> (f32, f32) {
        let x = (column as f32 + 0.5) * self.scale;
        let y = (row as f32 * 2.0 + 1.0) * self.scale;
        (x, y)
    }

    pub fn set_fill_style(&mut self, color: Rgb, alpha: f32) {
        self.fill_color = color;
        self.fill_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Blends the current fill style over a world-space rectangle.
    ///
    /// Anything outside the raster is clipped. A rectangle smaller than a pixel
    /// still covers the pixel it starts in.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let alpha = self.fill_alpha * self.global_alpha;
        if alpha <= 0.0 {
            return;
        }

        let (x0, x1) = Self::span(x, w, self.scale);
        let (y0, y1) = Self::span(y, h, self.scale);
        let x0 = x0.clamp(0, self.width as i64) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        let y0 = y0.clamp(0, self.height as i64) as usize;
        let y1 = y1.clamp(0, self.height as i64) as usize;

        let src = self.fill_color;
        for py in y0..y1 {
            for px in x0..x1 {
                let idx = py * self.width + px;
                self.pixels[idx] = blend(src, self.pixels[idx], alpha);
            }
        }
    }

    fn span(start: f32, len: f32, scale: f32) -> (i64, i64) {
        let lo = (start / scale).floor() as i64;
        let hi = ((start + len) / scale).ceil() as i64;
        (lo, hi.max(lo + 1))
    }

    /// Writes the raster as one frame of half-block characters, clipped to a
    /// terminal of `cols` x `rows` cells.
    pub fn present<W: Write>(&mut self, out: &mut W, cols: usize, rows: usize) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let width = self.width.min(cols);
        let height = self.height.min(rows * 2);

        let mut prev_top_color: Rgb = (255, 255, 255);
        let mut prev_bot_color: Rgb = (255, 255, 255);

        for y in (0..height).step_by(2) {
            for x in 0..width {
                let top_color = self.pixels[y * self.width + x];
                let bot_color = if y + 1 < height {
                    self.pixels[(y + 1) * self.width + x]
                } else {
                    top_color
                };

                if top_color != prev_top_color {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = top_color;
                }
                if bot_color != prev_bot_color {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = bot_color;
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top_color = (255, 255, 255);
            prev_bot_color = (255, 255, 255);
            if y + 2 < height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }
}

/// Source-over blend of one 8-bit pixel.
fn blend(src: Rgb, dst: Rgb, alpha: f32) -> Rgb {
    let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
    (mix(src.0, dst.0), mix(src.1, dst.1), mix(src.2, dst.2))
}
