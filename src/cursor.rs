#![forbid(unsafe_code)]

//! A forward-only reader over a byte slice.
//!
//! PNG stores all of its integers in network byte order, so the integer reads
//! here are big-endian.

use crate::{PngError, PngResult};

/// Integer types that can be read out of big-endian bytes.
pub trait BigEndianInt: Sized {
  /// How many bytes the value occupies.
  const WIDTH: usize;

  /// `bytes` is always exactly `WIDTH` long.
  fn from_be_slice(bytes: &[u8]) -> Self;
}
macro_rules! impl_big_endian_int {
  ($($t:ty),+ $(,)?) => {
    $(
      impl BigEndianInt for $t {
        const WIDTH: usize = core::mem::size_of::<$t>();
        #[inline]
        fn from_be_slice(bytes: &[u8]) -> Self {
          let mut a = [0_u8; core::mem::size_of::<$t>()];
          a.copy_from_slice(bytes);
          <$t>::from_be_bytes(a)
        }
      }
    )+
  };
}
impl_big_endian_int!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reads bytes off the front of a slice.
///
/// The cursor only ever shrinks its view, it never moves backward. A failed
/// read doesn't consume anything, but callers are expected to give up on the
/// cursor after any failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Cursor<'b> {
  spare: &'b [u8],
}
impl<'b> Cursor<'b> {
  /// Makes a cursor positioned at the start of `bytes`.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { spare: bytes }
  }

  /// If there's nothing left to read.
  #[inline]
  #[must_use]
  pub const fn at_end(&self) -> bool {
    self.spare.is_empty()
  }

  /// How many bytes are left.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.spare.len()
  }

  /// Reads one byte.
  #[inline]
  pub fn read_byte(&mut self) -> PngResult<u8> {
    match self.spare {
      [b, rest @ ..] => {
        self.spare = rest;
        Ok(*b)
      }
      [] => Err(PngError::UnexpectedEndOfData),
    }
  }

  /// Reads the next `count` bytes.
  #[inline]
  pub fn read_bytes(&mut self, count: usize) -> PngResult<&'b [u8]> {
    if self.spare.len() < count {
      return Err(PngError::UnexpectedEndOfData);
    }
    let (head, tail) = self.spare.split_at(count);
    self.spare = tail;
    Ok(head)
  }

  /// Reads everything that's left, possibly an empty slice.
  #[inline]
  pub fn read_rest(&mut self) -> &'b [u8] {
    core::mem::take(&mut self.spare)
  }

  /// Reads the next `N` bytes as an array.
  #[inline]
  pub fn read_array<const N: usize>(&mut self) -> PngResult<[u8; N]> {
    let mut a = [0_u8; N];
    a.copy_from_slice(self.read_bytes(N)?);
    Ok(a)
  }

  /// Reads a big-endian integer of whatever width `T` is.
  ///
  /// ```
  /// # use pngscan::Cursor;
  /// let mut c = Cursor::new(&[0, 0, 1, 2, 0xFF, 0xFE]);
  /// assert_eq!(c.read_int::<u32>(), Ok(258));
  /// assert_eq!(c.read_int::<i16>(), Ok(-2));
  /// assert!(c.at_end());
  /// ```
  #[inline]
  pub fn read_int<T: BigEndianInt>(&mut self) -> PngResult<T> {
    self.read_bytes(T::WIDTH).map(T::from_be_slice)
  }

  /// Reads `count` bytes (or all that's left, when `None`) as UTF-8 text.
  #[inline]
  pub fn read_text(&mut self, count: Option<usize>) -> PngResult<&'b str> {
    let bytes = match count {
      Some(count) => self.read_bytes(count)?,
      None => self.read_rest(),
    };
    Ok(core::str::from_utf8(bytes)?)
  }

  /// Reads up to the next `0` byte, consuming the `0` but not returning it.
  ///
  /// If there's no `0` this fails and consumes nothing.
  #[inline]
  pub fn read_until_nul(&mut self) -> PngResult<&'b [u8]> {
    let pos =
      self.spare.iter().position(|&b| b == 0).ok_or(PngError::UnexpectedEndOfData)?;
    let (head, tail) = self.spare.split_at(pos);
    self.spare = &tail[1..];
    Ok(head)
  }
}
