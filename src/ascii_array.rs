use core::fmt::Write;

/// An array of bytes expected to contain ascii data.
///
/// There's no actual enforced encoding! The `Debug` and `Display` impls will
/// just `as` cast each byte into a character, which is right for the ascii
/// range and harmless (if odd looking) for anything else.
///
/// PNG chunk type tags are four ascii letters, and this gives them readable
/// `Debug` output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct AsciiArray<const N: usize>(pub [u8; N]);

impl<const N: usize> AsciiArray<N> {
  /// The raw bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; N] {
    &self.0
  }
}

impl<const N: usize> Default for AsciiArray<N> {
  #[inline]
  fn default() -> Self {
    Self([0; N])
  }
}

impl<const N: usize> core::fmt::Debug for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl<const N: usize> core::fmt::Display for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

impl<const N: usize> From<[u8; N]> for AsciiArray<N> {
  #[inline]
  fn from(array: [u8; N]) -> Self {
    Self(array)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::format;

  #[test]
  fn test_default_and_from() {
    assert_eq!(AsciiArray::<2>::default().as_bytes(), &[0, 0]);
    let tag = AsciiArray::from(*b"IDAT");
    assert_eq!(format!("{tag}"), "IDAT");
    assert_eq!(format!("{tag:?}"), "\"IDAT\"");
  }
}
