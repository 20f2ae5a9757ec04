use super::*;

/// The per-scanline filter types of filter method 0.
///
/// Each filter predicts a byte from its neighbors, and the stored byte is the
/// difference from that prediction. All math is wrapping `u8` math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// The bytes are stored as-is.
  None = 0,
  /// Predicts the byte one pixel to the left.
  Sub = 1,
  /// Predicts the byte directly above.
  Up = 2,
  /// Predicts the floored mean of left and above.
  Average = 3,
  /// Predicts whichever of left, above, and upper-left is closest to
  /// `left + above - upper_left`.
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(PngError::UnknownFilterType(other)),
    })
  }
}

/// Picks the Paeth predictor out of `a` (left), `b` (above), and `c`
/// (upper left).
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Ties go to `a`, then `b`. Encoders rely on this exact order.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses one scanline's filter, in place.
///
/// * `prev` is the previous row *after* its own reconstruction, or `None` for
///   the top row (which treats everything above as 0).
/// * `bpp` is the filter unit, see [`IHDR::bytes_per_pixel`]. Bytes less than
///   `bpp` from the start of the row have a left neighbor of 0.
///
/// ## Panics
/// * If `prev` is given and is shorter than `row`.
pub fn unfilter_row(filter: FilterType, row: &mut [u8], prev: Option<&[u8]>, bpp: usize) {
  match filter {
    FilterType::None => (),
    FilterType::Sub => {
      for j in bpp..row.len() {
        row[j] = row[j].wrapping_add(row[j - bpp]);
      }
    }
    FilterType::Up => {
      if let Some(prev) = prev {
        row.iter_mut().zip(prev.iter()).for_each(|(x, b)| *x = x.wrapping_add(*b));
      }
    }
    FilterType::Average => {
      for j in 0..row.len() {
        let a = if j >= bpp { row[j - bpp] } else { 0 };
        let b = prev.map_or(0, |p| p[j]);
        let avg = ((a as u16 + b as u16) / 2) as u8;
        row[j] = row[j].wrapping_add(avg);
      }
    }
    FilterType::Paeth => {
      for j in 0..row.len() {
        let a = if j >= bpp { row[j - bpp] } else { 0 };
        let (b, c) = match prev {
          Some(p) => (p[j], if j >= bpp { p[j - bpp] } else { 0 }),
          None => (0, 0),
        };
        row[j] = row[j].wrapping_add(paeth_predict(a, b, c));
      }
    }
  }
}

/// Turns the decompressed image data into a [`PixelBuffer`].
///
/// The data is `height` lines, each a filter type byte followed by
/// [`bytes_per_scanline`](IHDR::bytes_per_scanline) bytes. Lines are
/// reconstructed top to bottom, each one against the already reconstructed
/// line above it, and then moved into the buffer.
///
/// ## Failure
/// * `UnsupportedInterlacing` / `UnsupportedBitDepth` from
///   [`IHDR::check_decodable`], before anything is read.
/// * `TruncatedBitmapData` if `decompressed` runs out early.
/// * `UnknownFilterType` for a filter byte above 4.
///
/// Extra bytes after the last line are ignored.
pub fn reconstruct(header: &IHDR, decompressed: &[u8]) -> PngResult<PixelBuffer> {
  header.check_decodable()?;
  let bpp = header.bytes_per_pixel();
  let scanline_len = header.bytes_per_scanline(header.width);
  let truncated = |_| PngError::TruncatedBitmapData;

  let mut pixels = PixelBuffer::new(header.width, header.height, header.channel_count());
  let mut cursor = Cursor::new(decompressed);
  for y in 0..header.height as usize {
    let filter = FilterType::try_from(cursor.read_byte().map_err(truncated)?)?;
    let line = cursor.read_bytes(scanline_len).map_err(truncated)?;
    let mut row = Vec::new();
    row.try_reserve_exact(scanline_len)?;
    row.extend_from_slice(line);
    let prev = if y > 0 { pixels.row(y - 1) } else { None };
    unfilter_row(filter, &mut row, prev, bpp);
    pixels.add_row(row)?;
  }
  if !cursor.at_end() {
    log::debug!("png: ignoring {} bytes after the last scanline", cursor.remaining());
  }
  Ok(pixels)
}
