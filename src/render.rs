//! Putting a decoded image on screen.
//!
//! This is presentation only. The decoder never calls into it.

use crate::{PixelBuffer, PngResult, RGB8};

/// A grid of cells that can each be filled with one opaque color.
pub trait Surface {
  /// Width in cells.
  fn width(&self) -> u32;
  /// Height in cells.
  fn height(&self) -> u32;
  /// Fills the cell at `(x, y)`.
  fn fill_cell(&mut self, x: u32, y: u32, color: RGB8);
}

/// The size to draw a `width` by `height` image at so that it fits in a
/// `max_width` by `max_height` surface.
///
/// Images that already fit keep their size. Otherwise the overflowing side is
/// clamped to the surface and the other side is scaled to keep the aspect
/// ratio (rounded down, but never below 1). If the image or the surface is
/// empty in either direction there's nothing to draw, and this is `(0, 0)`.
#[inline]
#[must_use]
pub const fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
  if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
    return (0, 0);
  }
  if width <= max_width && height <= max_height {
    return (width, height);
  }
  let (w, h, mw, mh) = (width as u64, height as u64, max_width as u64, max_height as u64);
  let (new_w, new_h) = if w * mh <= h * mw {
    // height is the tighter limit
    (w * mh / h, mh)
  } else {
    (mw, h * mw / w)
  };
  (if new_w == 0 { 1 } else { new_w as u32 }, if new_h == 0 { 1 } else { new_h as u32 })
}

/// Draws the image onto `surface`, one cell per pixel.
///
/// If the image is bigger than the surface it's [resized](PixelBuffer::resize)
/// first, so `pixels` may come back smaller. Alpha is ignored and gray is
/// expanded to RGB. An empty image or surface draws nothing.
pub fn draw<S: Surface + ?Sized>(pixels: &mut PixelBuffer, surface: &mut S) -> PngResult<()> {
  let (w, h) = fit_within(pixels.width(), pixels.height(), surface.width(), surface.height());
  if w == 0 || h == 0 {
    return Ok(());
  }
  if (w, h) != (pixels.width(), pixels.height()) {
    pixels.resize(h, w)?;
  }
  for y in 0..pixels.height() {
    for x in 0..pixels.width() {
      surface.fill_cell(x, y, pixels.get_pixel(x, y)?.to_rgb8());
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::{vec, vec::Vec};

  struct Canvas {
    width: u32,
    height: u32,
    cells: Vec<Option<RGB8>>,
  }
  impl Canvas {
    fn new(width: u32, height: u32) -> Self {
      Self { width, height, cells: vec![None; (width * height) as usize] }
    }
  }
  impl Surface for Canvas {
    fn width(&self) -> u32 {
      self.width
    }
    fn height(&self) -> u32 {
      self.height
    }
    fn fill_cell(&mut self, x: u32, y: u32, color: RGB8) {
      self.cells[(y * self.width + x) as usize] = Some(color);
    }
  }

  #[test]
  fn test_fit_within() {
    assert_eq!(fit_within(10, 10, 20, 20), (10, 10));
    assert_eq!(fit_within(100, 50, 20, 20), (20, 10));
    assert_eq!(fit_within(50, 100, 20, 20), (10, 20));
    assert_eq!(fit_within(1000, 1, 10, 10), (10, 1));
  }

  #[test]
  fn test_fit_within_empty() {
    assert_eq!(fit_within(5, 0, 2, 0), (0, 0));
    assert_eq!(fit_within(0, 5, 2, 2), (0, 0));
    assert_eq!(fit_within(5, 5, 0, 0), (0, 0));
  }

  #[test]
  fn test_draw_empty() {
    let mut pixels = PixelBuffer::new(2, 1, 1);
    pixels.add_row(vec![1, 2]).unwrap();
    let mut canvas = Canvas::new(0, 0);
    draw(&mut pixels, &mut canvas).unwrap();
    assert!(canvas.cells.is_empty());
    assert_eq!((pixels.width(), pixels.height()), (2, 1));

    let mut empty = PixelBuffer::new(3, 0, 1);
    let mut canvas = Canvas::new(2, 2);
    draw(&mut empty, &mut canvas).unwrap();
    assert_eq!(canvas.cells, vec![None; 4]);
  }

  #[test]
  fn test_draw_gray_downscaled() {
    let mut pixels = PixelBuffer::new(4, 2, 1);
    pixels.add_row(vec![10, 20, 30, 40]).unwrap();
    pixels.add_row(vec![50, 60, 70, 80]).unwrap();
    let mut canvas = Canvas::new(2, 2);
    draw(&mut pixels, &mut canvas).unwrap();
    assert_eq!((pixels.width(), pixels.height()), (2, 1));
    let gray = |y| Some(RGB8 { r: y, g: y, b: y });
    assert_eq!(canvas.cells, vec![gray(10), gray(30), None, None]);
  }
}
