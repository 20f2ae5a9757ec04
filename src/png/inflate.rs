use super::*;

/// Something that can decompress a zlib data stream.
///
/// All of a PNG's `IDAT` payloads are concatenated and handed over in one
/// call. `zTXt` text goes through here too.
pub trait Inflater {
  /// Inflates `compressed`, keeping at most `max_output` bytes.
  ///
  /// Output past `max_output` is dropped, and must never be allocated. A
  /// malformed stream should be reported as [`PngError::CodecError`].
  fn inflate(&self, compressed: &[u8], max_output: usize) -> PngResult<Vec<u8>>;
}
impl<I: Inflater + ?Sized> Inflater for &I {
  #[inline]
  fn inflate(&self, compressed: &[u8], max_output: usize) -> PngResult<Vec<u8>> {
    (**self).inflate(compressed, max_output)
  }
}

/// The default [`Inflater`], backed by `miniz_oxide`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
pub struct ZlibInflater;
#[cfg(feature = "miniz_oxide")]
impl Inflater for ZlibInflater {
  fn inflate(&self, compressed: &[u8], max_output: usize) -> PngResult<Vec<u8>> {
    use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};
    match decompress_to_vec_zlib_with_limit(compressed, max_output) {
      Ok(out) => Ok(out),
      // stopped at the limit, `output` holds the first `max_output` bytes
      Err(e) if e.status == TINFLStatus::HasMoreOutput => {
        log::debug!("png: zlib stream has more than {} bytes, dropping the rest", max_output);
        Ok(e.output)
      }
      Err(e) => {
        log::warn!("png: zlib inflate of {} bytes failed: {:?}", compressed.len(), e.status);
        Err(PngError::CodecError)
      }
    }
  }
}

#[cfg(test)]
#[cfg(feature = "miniz_oxide")]
mod tests {
  use super::*;
  use miniz_oxide::deflate::compress_to_vec_zlib;

  #[test]
  fn test_zlib_output_is_capped() {
    let z = compress_to_vec_zlib(&[7; 4096], 6);
    assert_eq!(ZlibInflater.inflate(&z, 3), Ok(alloc::vec![7, 7, 7]));
    assert_eq!(ZlibInflater.inflate(&z, usize::MAX).map(|v| v.len()), Ok(4096));
    assert_eq!(ZlibInflater.inflate(&[0xFF; 4], 16), Err(PngError::CodecError));
  }
}
