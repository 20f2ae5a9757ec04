#![allow(non_camel_case_types)]

//! The ancillary chunks we bother to read.
//!
//! None of these affect the pixels. They're parsed so that they can be logged
//! and handed back to the caller, and any problem with them is only a warning.

use super::*;

/// `tEXt`: Textual data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct tEXt<'b> {
  /// Normally 1-79 bytes of Latin-1.
  pub keyword: &'b [u8],
  /// Should contain Latin-1 text.
  pub text: &'b [u8],
}
impl<'b> TryFrom<&'b [u8]> for tEXt<'b> {
  type Error = PngError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let mut c = Cursor::new(data);
    let keyword = c.read_until_nul()?;
    Ok(Self { keyword, text: c.read_rest() })
  }
}

/// `zTXt`: Compressed textual data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct zTXt<'b> {
  /// Normally 1-79 bytes of Latin-1.
  pub keyword: &'b [u8],
  /// Only 0 (zlib) is defined.
  pub compression_method: u8,
  /// Zlib stream which inflates to Latin-1 text.
  pub zlib_data: &'b [u8],
}
impl<'b> TryFrom<&'b [u8]> for zTXt<'b> {
  type Error = PngError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let mut c = Cursor::new(data);
    let keyword = c.read_until_nul()?;
    let compression_method = c.read_byte()?;
    Ok(Self { keyword, compression_method, zlib_data: c.read_rest() })
  }
}

/// `tIME`: Image last-modification time, UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct tIME {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (use 60 for leap seconds)
  pub second: u8,
}
impl TryFrom<&[u8]> for tIME {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != 7 {
      return Err(PngError::MalformedChunk);
    }
    let mut c = Cursor::new(data);
    Ok(Self {
      year: c.read_int()?,
      month: c.read_byte()?,
      day: c.read_byte()?,
      hour: c.read_byte()?,
      minute: c.read_byte()?,
      second: c.read_byte()?,
    })
  }
}
/// Formats as `hh:mm:ss dd/mm/yyyy`.
impl core::fmt::Display for tIME {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let Self { year, month, day, hour, minute, second } = self;
    write!(f, "{hour:02}:{minute:02}:{second:02} {day:02}/{month:02}/{year}")
  }
}

/// A keyword/text pair pulled out of a `tEXt` or `zTXt` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngText {
  pub keyword: String,
  pub text: String,
  /// If this came from a `zTXt`.
  pub compressed: bool,
}

/// Latin-1 maps each byte directly to the same code point.
#[inline]
#[must_use]
pub fn latin1_to_string(bytes: &[u8]) -> String {
  bytes.iter().map(|&b| char::from(b)).collect()
}

impl tEXt<'_> {
  /// Decodes the text into an owned value.
  #[inline]
  #[must_use]
  pub fn to_text(&self) -> PngText {
    PngText {
      keyword: latin1_to_string(self.keyword),
      text: latin1_to_string(self.text),
      compressed: false,
    }
  }
}

impl zTXt<'_> {
  /// Inflates and decodes the text into an owned value, keeping at most
  /// `max_len` bytes of it.
  ///
  /// ## Failure
  /// * `UnsupportedCompression` if the method byte isn't 0.
  /// * Whatever the `inflater` returns.
  pub fn to_text<I: Inflater + ?Sized>(&self, inflater: &I, max_len: usize) -> PngResult<PngText> {
    if self.compression_method != 0 {
      return Err(PngError::UnsupportedCompression(self.compression_method));
    }
    let text = inflater.inflate(self.zlib_data, max_len)?;
    Ok(PngText {
      keyword: latin1_to_string(self.keyword),
      text: latin1_to_string(&text),
      compressed: true,
    })
  }
}
