use core::{num::TryFromIntError, str::Utf8Error};

/// Shorthand for results within this crate.
pub type PngResult<T> = Result<T, PngError>;

/// An error from the `pngscan` crate.
///
/// Every error is fatal to the decode that produced it. Problems with
/// ancillary chunks are only logged and never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PngError {
  /// The first eight bytes were not the PNG signature.
  CorruptHeader,

  /// A read went past the end of the available bytes.
  UnexpectedEndOfData,

  /// A chunk's declared length runs past the end of the data, or its fields
  /// don't make sense for its type.
  MalformedChunk,

  /// The signature was fine but no chunks followed it.
  NoChunksPresent,

  /// The first chunk after the signature must be `IHDR`.
  FirstChunkNotIHDR,

  /// More than one `IHDR` chunk was found.
  DuplicateHeader,

  /// No `IHDR` was available when it was needed.
  MissingHeader,

  /// The declared width and/or height of this image is 0.
  WidthOrHeightZero,

  /// The width or height is above the configured
  /// [`max_dimension`](crate::png::DecodeOptions::max_dimension).
  DimensionsTooLarge,

  /// The color type byte isn't one PNG defines.
  UnsupportedColorModel(u8),

  /// The bit depth isn't legal for the color type, or isn't one we decode.
  UnsupportedBitDepth(u8),

  /// Only compression method 0 (zlib) exists.
  UnsupportedCompression(u8),

  /// Only filter method 0 (adaptive) exists.
  UnsupportedFilterMethod(u8),

  /// Interlaced (Adam7) images are not decoded.
  UnsupportedInterlacing,

  /// A scanline's filter tag was above 4.
  UnknownFilterType(u8),

  /// The decompressed data was shorter than the header requires.
  TruncatedBitmapData,

  /// A row was added to a pixel buffer that already has all its rows.
  RowOverflow,

  /// A row's length didn't match the pixel buffer's row length.
  RowLengthMismatch,

  /// A pixel position was outside the pixel buffer.
  IndexOutOfBounds,

  /// A pixel's channel count didn't match the pixel buffer.
  ChannelMismatch,

  /// A chunk's declared CRC didn't match the computed one.
  ChecksumMismatch,

  /// The zlib codec rejected the compressed stream.
  CodecError,

  /// Text that should have been UTF-8 wasn't.
  InvalidText,

  /// A checked math operation failed.
  CheckedMath,

  /// The allocator couldn't give us enough space.
  Alloc,
}

impl core::fmt::Display for PngError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::CorruptHeader => write!(f, "corrupted header"),
      Self::UnexpectedEndOfData => write!(f, "unexpected end of data"),
      Self::MalformedChunk => write!(f, "malformed chunk"),
      Self::NoChunksPresent => write!(f, "no chunks present"),
      Self::FirstChunkNotIHDR => write!(f, "first chunk is not IHDR"),
      Self::DuplicateHeader => write!(f, "more than one IHDR chunk"),
      Self::MissingHeader => write!(f, "no IHDR chunk"),
      Self::WidthOrHeightZero => write!(f, "width or height is zero"),
      Self::DimensionsTooLarge => write!(f, "image dimensions too large"),
      Self::UnsupportedColorModel(c) => write!(f, "unsupported color type {c}"),
      Self::UnsupportedBitDepth(d) => write!(f, "unsupported bit depth {d}"),
      Self::UnsupportedCompression(c) => write!(f, "unsupported compression method {c}"),
      Self::UnsupportedFilterMethod(m) => write!(f, "unsupported filter method {m}"),
      Self::UnsupportedInterlacing => write!(f, "interlaced images are not supported"),
      Self::UnknownFilterType(t) => write!(f, "unknown scanline filter type {t}"),
      Self::TruncatedBitmapData => write!(f, "truncated bitmap data"),
      Self::RowOverflow => write!(f, "number of rows is already equal to the height"),
      Self::RowLengthMismatch => write!(f, "row length doesn't match the image width"),
      Self::IndexOutOfBounds => write!(f, "pixel position out of bounds"),
      Self::ChannelMismatch => write!(f, "pixel channel count doesn't match the image"),
      Self::ChecksumMismatch => write!(f, "chunk CRC mismatch"),
      Self::CodecError => write!(f, "zlib decompression failed"),
      Self::InvalidText => write!(f, "invalid text"),
      Self::CheckedMath => write!(f, "arithmetic overflow"),
      Self::Alloc => write!(f, "allocation failure"),
    }
  }
}

impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<Utf8Error> for PngError {
  #[inline]
  fn from(_: Utf8Error) -> Self {
    Self::InvalidText
  }
}
impl From<TryFromIntError> for PngError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
