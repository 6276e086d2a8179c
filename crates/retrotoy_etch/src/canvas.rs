use std::io::Cursor;

use anyhow::{bail, Context, Result};
use image::{ImageFormat, RgbImage};
use retrotoy_common::color::Color;

/// The persistent raster the user draws on.
///
/// Pixels are stored as a flat RGB24 buffer, the same layout the frontends
/// consume, so presenting a frame is a single copy. Dimensions are fixed at
/// creation; only pixel contents change, via `stroke` and `clear`.
#[derive(Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a raster filled with `background`.
    ///
    /// Zero dimensions are the only construction failure and are fatal at
    /// startup, never recovered from.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Canvas> {
        if width == 0 || height == 0 {
            bail!("canvas dimensions must be positive, got {width}x{height}");
        }
        let mut canvas = Canvas {
            width,
            height,
            background,
            pixels: vec![0; width * height * 3],
        };
        canvas.clear();
        Ok(canvas)
    }

    /// Refill every pixel with the background color.
    pub fn clear(&mut self) {
        for pixel in self.pixels.chunks_exact_mut(3) {
            pixel[0] = self.background.r;
            pixel[1] = self.background.g;
            pixel[2] = self.background.b;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Raw RGB24 contents, row-major.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} canvas",
            self.width,
            self.height
        );
        let idx = (y * self.width + x) * 3;
        Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
    }

    /// Stamp a square of side `width` around (x, y), clipped to the raster.
    fn dab(&mut self, x: i32, y: i32, color: Color, width: u32) {
        let side = width as i32;
        let offset = side / 2;
        for dy in 0..side {
            for dx in 0..side {
                self.put_pixel(x + dx - offset, y + dy - offset, color);
            }
        }
    }

    /// Rasterize a straight segment from `from` to `to`.
    ///
    /// Bresenham walk with a square dab of side `width` at every visited
    /// point, so consecutive small displacements leave a continuous trace.
    /// `from == to` degenerates to a single dab.
    pub fn stroke(&mut self, from: (i32, i32), to: (i32, i32), color: Color, width: u32) {
        debug_assert!(width > 0);
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.dab(x0, y0, color, width);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Copy the raster into a frontend RGB24 frame buffer.
    pub fn blit(&self, screen: &mut [u8]) {
        debug_assert_eq!(screen.len(), self.pixels.len());
        screen.copy_from_slice(&self.pixels);
    }

    /// Encode the raster as PNG bytes.
    ///
    /// PNG is lossless: decoding the result yields the exact pixel contents.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = RgbImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
            .context("raster does not match canvas dimensions")?;
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .context("failed to encode canvas as PNG")?;
        Ok(bytes.into_inner())
    }
}
