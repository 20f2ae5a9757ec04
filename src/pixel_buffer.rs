#![forbid(unsafe_code)]

//! Provides the heap-allocated pixel grid that decoding produces.

use alloc::vec::Vec;

use crate::{Pixel, PngError, PngResult};

/// A grid of 8-bit-per-channel pixels, stored one byte row at a time.
///
/// Rows are filled top to bottom with [`add_row`](Self::add_row). Each row is
/// exactly `width * channels` bytes, and there are never more than `height`
/// rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
  width: u32,
  height: u32,
  channels: usize,
  rows: Vec<Vec<u8>>,
}
impl PixelBuffer {
  /// Makes an empty buffer, with no rows populated yet.
  #[inline]
  #[must_use]
  pub const fn new(width: u32, height: u32, channels: usize) -> Self {
    Self { width, height, channels, rows: Vec::new() }
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Bytes per pixel.
  #[inline]
  #[must_use]
  pub const fn channels(&self) -> usize {
    self.channels
  }

  /// Bytes per row.
  #[inline]
  #[must_use]
  pub const fn row_len(&self) -> usize {
    self.width as usize * self.channels
  }

  /// The rows populated so far.
  #[inline]
  #[must_use]
  pub fn rows(&self) -> &[Vec<u8>] {
    &self.rows
  }

  /// The row at `y`, if it's been populated.
  #[inline]
  #[must_use]
  pub fn row(&self, y: usize) -> Option<&[u8]> {
    self.rows.get(y).map(Vec::as_slice)
  }

  /// If all `height` rows are present.
  #[inline]
  #[must_use]
  pub fn is_complete(&self) -> bool {
    self.rows.len() == self.height as usize
  }

  /// Appends one row below the existing rows.
  ///
  /// ## Failure
  /// * `RowOverflow` if there's already `height` rows.
  /// * `RowLengthMismatch` if the row isn't `width * channels` bytes.
  pub fn add_row(&mut self, row: Vec<u8>) -> PngResult<()> {
    if self.is_complete() {
      return Err(PngError::RowOverflow);
    }
    if row.len() != self.row_len() {
      return Err(PngError::RowLengthMismatch);
    }
    self.rows.try_reserve(1)?;
    self.rows.push(row);
    Ok(())
  }

  #[inline]
  fn check_xy(&self, x: u32, y: u32) -> PngResult<()> {
    if x < self.width && y < self.height {
      Ok(())
    } else {
      Err(PngError::IndexOutOfBounds)
    }
  }

  /// Gets the pixel at `(x, y)`.
  ///
  /// A position inside the image whose row hasn't been populated yet is also
  /// `IndexOutOfBounds`.
  pub fn get_pixel(&self, x: u32, y: u32) -> PngResult<Pixel> {
    self.check_xy(x, y)?;
    let row = self.row(y as usize).ok_or(PngError::IndexOutOfBounds)?;
    let start = x as usize * self.channels;
    let bytes = row.get(start..start + self.channels).ok_or(PngError::IndexOutOfBounds)?;
    Pixel::from_bytes(bytes).ok_or(PngError::ChannelMismatch)
  }

  /// Sets the pixel at `(x, y)`.
  ///
  /// Any unpopulated rows up to and including `y` are filled with zeroes
  /// first.
  pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> PngResult<()> {
    self.check_xy(x, y)?;
    if pixel.channel_count() != self.channels {
      return Err(PngError::ChannelMismatch);
    }
    let row_len = self.row_len();
    while self.rows.len() <= y as usize {
      let mut row = Vec::new();
      row.try_reserve_exact(row_len)?;
      row.resize(row_len, 0);
      self.rows.try_reserve(1)?;
      self.rows.push(row);
    }
    let start = x as usize * self.channels;
    self.rows[y as usize][start..start + self.channels].copy_from_slice(pixel.as_bytes());
    Ok(())
  }

  /// Nearest-neighbor resamples this buffer to a new size, in place.
  ///
  /// Target pixel `(x, y)` takes its value from source pixel
  /// `(x * width / new_width, y * height / new_height)`, rounded down.
  pub fn resize(&mut self, new_height: u32, new_width: u32) -> PngResult<()> {
    if new_height == 0 || new_width == 0 {
      return Err(PngError::WidthOrHeightZero);
    }
    log::debug!("png: resizing {}x{} to {}x{}", self.width, self.height, new_width, new_height);
    let mut scaled = Self::new(new_width, new_height, self.channels);
    for y in 0..new_height {
      let src_y = nearest(y, self.height, new_height);
      for x in 0..new_width {
        let src_x = nearest(x, self.width, new_width);
        scaled.set_pixel(x, y, self.get_pixel(src_x, src_y)?)?;
      }
    }
    *self = scaled;
    Ok(())
  }
}

/// `floor(dst / (new / old))`, done exactly in integers.
#[inline]
#[must_use]
const fn nearest(dst: u32, old: u32, new: u32) -> u32 {
  ((dst as u64 * old as u64) / new as u64) as u32
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{RGB8, RGBA8, Y8};
  use alloc::vec;

  fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    Pixel::RGB(RGB8 { r, g, b })
  }

  #[test]
  fn test_add_row_overflow() {
    let mut buf = PixelBuffer::new(1, 2, 3);
    buf.add_row(vec![1, 2, 3]).unwrap();
    buf.add_row(vec![4, 5, 6]).unwrap();
    assert!(buf.is_complete());
    assert_eq!(buf.add_row(vec![7, 8, 9]), Err(PngError::RowOverflow));
    assert_eq!(buf.rows().len(), 2);
  }

  #[test]
  fn test_add_row_wrong_length() {
    let mut buf = PixelBuffer::new(2, 1, 3);
    assert_eq!(buf.add_row(vec![1, 2, 3]), Err(PngError::RowLengthMismatch));
  }

  #[test]
  fn test_pixel_bounds() {
    let mut buf = PixelBuffer::new(2, 2, 3);
    buf.add_row(vec![10, 20, 30, 40, 50, 60]).unwrap();
    buf.add_row(vec![70, 80, 90, 100, 110, 120]).unwrap();
    assert_eq!(buf.get_pixel(1, 0), Ok(rgb(40, 50, 60)));
    assert_eq!(buf.get_pixel(2, 0), Err(PngError::IndexOutOfBounds));
    assert_eq!(buf.get_pixel(0, 2), Err(PngError::IndexOutOfBounds));
    assert_eq!(buf.set_pixel(2, 1, rgb(0, 0, 0)), Err(PngError::IndexOutOfBounds));
    assert_eq!(buf.set_pixel(1, 2, rgb(0, 0, 0)), Err(PngError::IndexOutOfBounds));
  }

  #[test]
  fn test_unpopulated_row() {
    let buf = PixelBuffer::new(3, 3, 1);
    assert_eq!(buf.get_pixel(0, 0), Err(PngError::IndexOutOfBounds));
  }

  #[test]
  fn test_set_pixel_fills_rows() {
    let mut buf = PixelBuffer::new(2, 3, 4);
    let p = Pixel::RGBA(RGBA8 { r: 1, g: 2, b: 3, a: 4 });
    buf.set_pixel(1, 2, p).unwrap();
    assert_eq!(buf.rows().len(), 3);
    assert_eq!(buf.get_pixel(1, 2), Ok(p));
    assert_eq!(buf.get_pixel(0, 0), Ok(Pixel::RGBA(RGBA8::default())));
    assert_eq!(buf.set_pixel(0, 0, rgb(1, 2, 3)), Err(PngError::ChannelMismatch));
  }

  #[test]
  fn test_resize_down_and_up() {
    let mut buf = PixelBuffer::new(4, 2, 1);
    buf.add_row(vec![0, 1, 2, 3]).unwrap();
    buf.add_row(vec![4, 5, 6, 7]).unwrap();
    buf.resize(1, 2).unwrap();
    assert_eq!((buf.width(), buf.height()), (2, 1));
    assert_eq!(buf.rows(), &[vec![0_u8, 2]]);

    buf.resize(2, 4).unwrap();
    assert_eq!(buf.rows(), &[vec![0_u8, 0, 2, 2], vec![0_u8, 0, 2, 2]]);
    assert_eq!(buf.get_pixel(3, 1), Ok(Pixel::Y(Y8 { y: 2 })));
  }

  #[test]
  fn test_resize_to_zero() {
    let mut buf = PixelBuffer::new(1, 1, 3);
    buf.add_row(vec![1, 2, 3]).unwrap();
    assert_eq!(buf.resize(0, 1), Err(PngError::WidthOrHeightZero));
  }
}
