use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Grayscale = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  IndexedColor = 3,
  /// Greyscale + Alpha
  GrayscaleAlpha = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Grayscale => 1,
      Self::RGB => 3,
      Self::IndexedColor => 1,
      Self::GrayscaleAlpha => 2,
      Self::RGBA => 4,
    }
  }

  /// If `bit_depth` is allowed with this color type.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Grayscale => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::IndexedColor => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::GrayscaleAlpha | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Grayscale,
      2 => Self::RGB,
      3 => Self::IndexedColor,
      4 => Self::GrayscaleAlpha,
      6 => Self::RGBA,
      other => return Err(PngError::UnsupportedColorModel(other)),
    })
  }
}

/// How the scanlines of the image are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InterlaceMethod {
  /// Rows are stored top to bottom.
  #[default]
  None = 0,
  /// Adam7: seven reduced images, stored one after the other.
  Progressive = 1,
}
impl TryFrom<u8> for InterlaceMethod {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::None),
      1 => Ok(Self::Progressive),
      _ => Err(PngError::MalformedChunk),
    }
  }
}

/// `IHDR`: Image header
///
/// This is always the first chunk, and it describes everything you need to
/// know to turn the decompressed image data into rows of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels, never 0
  pub width: u32,
  /// height in pixels, never 0
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// always 0 (zlib)
  pub compression_method: u8,
  /// always 0 (adaptive, five filter types)
  pub filter_method: u8,
  /// if the image data is stored interlaced.
  pub interlace_method: InterlaceMethod,
}
impl IHDR {
  /// The number of channels per pixel.
  #[inline]
  #[must_use]
  pub const fn channel_count(&self) -> usize {
    self.color_type.channel_count()
  }

  /// The filter unit: bytes per complete pixel, rounded up to at least 1.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    ((self.bit_depth as usize + 7) / 8) * self.channel_count()
  }

  /// Bytes of pixel data in one scanline of the given width.
  ///
  /// When pixels are less than 8 bits per channel it's possible to end up with
  /// partial bytes on the end, so we must round up.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self, width: u32) -> usize {
    (width as usize * self.channel_count() * self.bit_depth as usize + 7) / 8
  }

  /// Scanline bytes plus the leading filter tag byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self, width: u32) -> usize {
    1 + self.bytes_per_scanline(width)
  }

  /// The decompressed byte count a non-interlaced image needs.
  #[inline]
  pub fn decompressed_len(&self) -> PngResult<usize> {
    self
      .bytes_per_filterline(self.width)
      .checked_mul(usize::try_from(self.height)?)
      .ok_or(PngError::CheckedMath)
  }

  /// Checks that we can actually reconstruct this image's pixels.
  ///
  /// Parsing accepts any legal header, but only non-interlaced 8-bit images
  /// are decoded.
  #[inline]
  pub const fn check_decodable(&self) -> PngResult<()> {
    if matches!(self.interlace_method, InterlaceMethod::Progressive) {
      return Err(PngError::UnsupportedInterlacing);
    }
    if self.bit_depth != 8 {
      return Err(PngError::UnsupportedBitDepth(self.bit_depth));
    }
    Ok(())
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != 13 {
      return Err(PngError::MalformedChunk);
    }
    let mut c = Cursor::new(data);
    let width: u32 = c.read_int()?;
    let height: u32 = c.read_int()?;
    let bit_depth = c.read_byte()?;
    let color_type = PngColorType::try_from(c.read_byte()?)?;
    let compression_method = c.read_byte()?;
    let filter_method = c.read_byte()?;
    let interlace_method = InterlaceMethod::try_from(c.read_byte()?)?;
    if width == 0 || height == 0 {
      return Err(PngError::WidthOrHeightZero);
    }
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(PngError::UnsupportedBitDepth(bit_depth));
    }
    if compression_method != 0 {
      return Err(PngError::UnsupportedCompression(compression_method));
    }
    if filter_method != 0 {
      return Err(PngError::UnsupportedFilterMethod(filter_method));
    }
    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      interlace_method,
    })
  }
}
