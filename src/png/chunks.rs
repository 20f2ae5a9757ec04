#![allow(non_camel_case_types)]

use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// A chunk's four letter type tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub AsciiArray<4>);
#[allow(nonstandard_style)]
impl ChunkType {
  pub const IHDR: Self = Self(AsciiArray(*b"IHDR"));
  pub const PLTE: Self = Self(AsciiArray(*b"PLTE"));
  pub const IDAT: Self = Self(AsciiArray(*b"IDAT"));
  pub const IEND: Self = Self(AsciiArray(*b"IEND"));
  pub const tEXt: Self = Self(AsciiArray(*b"tEXt"));
  pub const zTXt: Self = Self(AsciiArray(*b"zTXt"));
  pub const tIME: Self = Self(AsciiArray(*b"tIME"));

  /// The raw tag bytes.
  #[inline]
  #[must_use]
  pub const fn bytes(self) -> [u8; 4] {
    self.0 .0
  }

  /// Ancillary chunks have a lowercase first letter. A decoder that doesn't
  /// understand them can skip them safely.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.0 .0[0] & 32) != 0
  }
}
impl core::fmt::Debug for ChunkType {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.0, f)
  }
}
impl core::fmt::Display for ChunkType {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.0, f)
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPngChunk<'b> {
  pub chunk_ty: ChunkType,
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl<'b> RawPngChunk<'b> {
  /// Reads the length, type, payload, and CRC of the next chunk.
  ///
  /// Running out of bytes partway through a chunk is `MalformedChunk`.
  pub fn read_from(cursor: &mut Cursor<'b>) -> PngResult<Self> {
    let eof = |e: PngError| match e {
      PngError::UnexpectedEndOfData => PngError::MalformedChunk,
      other => other,
    };
    let len: u32 = cursor.read_int().map_err(eof)?;
    let chunk_ty = ChunkType(AsciiArray(cursor.read_array().map_err(eof)?));
    let data = cursor.read_bytes(usize::try_from(len)?).map_err(eof)?;
    let declared_crc: u32 = cursor.read_int().map_err(eof)?;
    Ok(Self { chunk_ty, data, declared_crc })
  }

  /// The CRC computed from the chunk's type and data.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    chunk_crc(self.chunk_ty.bytes(), self.data)
  }
}
impl core::fmt::Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// After the first error the iterator is fused and only returns `None`.
#[derive(Debug, Clone)]
pub struct RawPngChunkIter<'b> {
  cursor: Cursor<'b>,
}
impl<'b> RawPngChunkIter<'b> {
  /// Pass the full PNG bytes, the signature is checked and removed.
  ///
  /// ## Failure
  /// * `CorruptHeader` if the bytes don't start with [`PNG_SIGNATURE`].
  pub fn new(png: &'b [u8]) -> PngResult<Self> {
    let mut cursor = Cursor::new(png);
    match cursor.read_array::<8>() {
      Ok(PNG_SIGNATURE) => Ok(Self { cursor }),
      _ => Err(PngError::CorruptHeader),
    }
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = PngResult<RawPngChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.cursor.at_end() {
      return None;
    }
    let out = RawPngChunk::read_from(&mut self.cursor);
    if out.is_err() {
      self.cursor = Cursor::new(&[]);
    }
    Some(out)
  }
}

/// `IDAT`: Image data
///
/// * Image data is stored with Zlib compression applied.
/// * Images can have more than one IDAT chunk. Multiple chunks are treated as
///   a single Zlib datastream, in the order they appear.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IDAT<'b> {
  pub data: &'b [u8],
}
impl core::fmt::Debug for IDAT<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("IDAT").field(&&self.data[..self.data.len().min(12)]).field(&self.data.len()).finish()
  }
}

/// A parsed PNG chunk.
///
/// Anything not listed here comes out as `Unknown`, which is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PngChunk<'b> {
  /// Image Header
  IHDR(IHDR),
  /// Image Data
  IDAT(IDAT<'b>),
  /// Image End
  IEND,
  /// Textual data
  tEXt(tEXt<'b>),
  /// Compressed textual data
  zTXt(zTXt<'b>),
  /// Last modification time
  tIME(tIME),
  /// A chunk type we don't handle.
  Unknown(RawPngChunk<'b>),
}
impl<'b> TryFrom<RawPngChunk<'b>> for PngChunk<'b> {
  type Error = PngError;
  fn try_from(raw: RawPngChunk<'b>) -> Result<Self, Self::Error> {
    Ok(match raw.chunk_ty {
      ChunkType::IHDR => PngChunk::IHDR(IHDR::try_from(raw.data)?),
      ChunkType::IDAT => PngChunk::IDAT(IDAT { data: raw.data }),
      ChunkType::IEND => PngChunk::IEND,
      ChunkType::tEXt => PngChunk::tEXt(tEXt::try_from(raw.data)?),
      ChunkType::zTXt => PngChunk::zTXt(zTXt::try_from(raw.data)?),
      ChunkType::tIME => PngChunk::tIME(tIME::try_from(raw.data)?),
      _ => PngChunk::Unknown(raw),
    })
  }
}
