//! Module for pixel formats.
//!
//! Only the 8-bits-per-channel direct color formats are provided. Each one
//! is `repr(C)` with alignment 1, so a row of bytes can be viewed as a slice
//! of pixels with [`bytemuck::cast_slice`].
//!
//! ### Between Gray and RGB
//! When going from grayscale to RGB one just simply copies the gray value to
//! each of the RGB channels. That's the only conversion done here, it's what
//! [`Pixel::to_rgb8`] uses for display.

use bytemuck::{Pod, Zeroable};

/// An 8-bit greyscale pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Y8 {
  pub y: u8,
}

/// An 8-bits per channel greyscale + alpha pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct YA8 {
  pub y: u8,
  pub a: u8,
}

/// An RGB value, 8-bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An 8-bits per channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

/// One pixel of any supported channel layout.
///
/// Which variant you get out of a [`PixelBuffer`](crate::PixelBuffer) depends
/// only on its channel count: 1 is `Y` (this includes palette indexes), 2 is
/// `YA`, 3 is `RGB`, 4 is `RGBA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Pixel {
  Y(Y8),
  YA(YA8),
  RGB(RGB8),
  RGBA(RGBA8),
}
impl Pixel {
  /// The number of channels in this pixel.
  #[inline]
  #[must_use]
  pub const fn channel_count(&self) -> usize {
    match self {
      Self::Y(_) => 1,
      Self::YA(_) => 2,
      Self::RGB(_) => 3,
      Self::RGBA(_) => 4,
    }
  }

  /// The pixel's bytes, in channel order.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Y(p) => bytemuck::bytes_of(p),
      Self::YA(p) => bytemuck::bytes_of(p),
      Self::RGB(p) => bytemuck::bytes_of(p),
      Self::RGBA(p) => bytemuck::bytes_of(p),
    }
  }

  /// Reads a pixel from exactly 1 to 4 channel bytes.
  #[inline]
  #[must_use]
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    Some(match bytes.len() {
      1 => Self::Y(bytemuck::pod_read_unaligned(bytes)),
      2 => Self::YA(bytemuck::pod_read_unaligned(bytes)),
      3 => Self::RGB(bytemuck::pod_read_unaligned(bytes)),
      4 => Self::RGBA(bytemuck::pod_read_unaligned(bytes)),
      _ => return None,
    })
  }

  /// Drops any alpha and expands gray into all three color channels.
  #[inline]
  #[must_use]
  pub const fn to_rgb8(self) -> RGB8 {
    match self {
      Self::Y(Y8 { y }) | Self::YA(YA8 { y, .. }) => RGB8 { r: y, g: y, b: y },
      Self::RGB(rgb) => rgb,
      Self::RGBA(RGBA8 { r, g, b, .. }) => RGB8 { r, g, b },
    }
  }
}
impl From<RGB8> for Pixel {
  #[inline]
  fn from(p: RGB8) -> Self {
    Self::RGB(p)
  }
}
impl From<RGBA8> for Pixel {
  #[inline]
  fn from(p: RGBA8) -> Self {
    Self::RGBA(p)
  }
}
impl From<Y8> for Pixel {
  #[inline]
  fn from(p: Y8) -> Self {
    Self::Y(p)
  }
}
impl From<YA8> for Pixel {
  #[inline]
  fn from(p: YA8) -> Self {
    Self::YA(p)
  }
}
