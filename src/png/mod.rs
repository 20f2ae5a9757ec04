//! Holds all the tools for decoding PNG data.
//!
//! ## Automated PNG Decoding
//! If you don't need control over the process, [`decode_png`] takes the bytes
//! of a PNG file and gives back a [`DecodedPng`] with the image's pixels and
//! dimensions. This needs the `miniz_oxide` feature (on by default).
//! [`decode_png_with`] lets you pass your own [`DecodeOptions`] and zlib
//! [`Inflater`].
//!
//! ## How It Works
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! After an eight byte signature, each chunk is a big-endian length, a four
//! letter type, that many bytes of data, and a CRC. The chunks we act on:
//! * **Header** (`IHDR`) - The image's dimensions, pixel format, and if the
//!   image is interlaced or not. It's always the first chunk.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream.
//! * **End** (`IEND`) - The last chunk, lets you know you had the full PNG.
//!
//! Text and timestamp chunks are read and logged, everything else is skipped.
//!
//! Decoding is then three stages:
//! * [`ContainerParser`] walks the chunks and collects the header and the
//!   concatenated `IDAT` bytes.
//! * An [`Inflater`] decompresses those bytes.
//! * [`reconstruct`] splits the decompressed data into scanlines, each with a
//!   leading filter byte, and reverses each line's filter against the line
//!   above it, producing a [`PixelBuffer`].
//!
//! Only non-interlaced, 8-bits-per-channel images get their pixels decoded.
//! Other images still parse, but decoding them returns an error.

use alloc::{string::String, vec::Vec};

use crate::{AsciiArray, Cursor, PixelBuffer, PngError, PngResult};

mod ancillary;
pub use ancillary::*;

mod chunks;
pub use chunks::*;

mod container;
pub use container::*;

mod crc32;
pub use crc32::*;

mod ihdr;
pub use ihdr::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;


/// Settings for a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Fail with `ChecksumMismatch` when a chunk's CRC is wrong. When this is
  /// off a bad CRC is only a warning.
  pub check_crc: bool,
  /// Images wider or taller than this fail with `DimensionsTooLarge`.
  pub max_dimension: u32,
  /// Read `tEXt`, `zTXt`, and `tIME` chunks. When this is off they're skipped
  /// like any other unknown chunk.
  pub decode_text: bool,
  /// Inflated `zTXt` text is cut off after this many bytes.
  pub max_text_len: usize,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { check_crc: false, max_dimension: 17_000, decode_text: true, max_text_len: 1 << 20 }
  }
}

/// A decoded image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedPng {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: PngColorType,
  /// Bytes per pixel in `pixels`.
  pub channels: usize,
  pub pixels: PixelBuffer,
  pub text: Vec<PngText>,
  pub last_modified: Option<tIME>,
}

/// Decodes a PNG using the given options and zlib implementation.
///
/// ## Failure
/// Every error is fatal, there's never a partial image. In order:
/// * Container errors, see [`ContainerParser::run`].
/// * `UnsupportedInterlacing` or `UnsupportedBitDepth`, before any
///   decompression happens.
/// * Whatever the `inflater` fails with. It's never asked for more than
///   [`IHDR::decompressed_len`] bytes.
/// * Reconstruction errors, see [`reconstruct`].
pub fn decode_png_with<I: Inflater + ?Sized>(
  png: &[u8], options: &DecodeOptions, inflater: &I,
) -> PngResult<DecodedPng> {
  let PngContainer { header, idat, text, last_modified, .. } =
    ContainerParser::new(png, *options).run(inflater)?;
  header.check_decodable()?;
  let needed = header.decompressed_len()?;
  let decompressed = inflater.inflate(&idat, needed)?;
  log::debug!("png: inflated {} bytes to {}, need {}", idat.len(), decompressed.len(), needed);
  let pixels = reconstruct(&header, &decompressed)?;
  Ok(DecodedPng {
    width: header.width,
    height: header.height,
    bit_depth: header.bit_depth,
    color_type: header.color_type,
    channels: header.channel_count(),
    pixels,
    text,
    last_modified,
  })
}

/// Decodes a PNG with default options and the `miniz_oxide` inflater.
///
/// ```no_run
/// # fn main() -> pngscan::PngResult<()> {
/// let bytes: &[u8] = unimplemented!("data from somewhere");
/// let png = pngscan::png::decode_png(bytes)?;
/// let top_left = png.pixels.get_pixel(0, 0)?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn decode_png(png: &[u8]) -> PngResult<DecodedPng> {
  decode_png_with(png, &DecodeOptions::default(), &ZlibInflater)
}
