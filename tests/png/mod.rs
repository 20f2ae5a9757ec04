use miniz_oxide::deflate::compress_to_vec_zlib;
use pngscan::{
  png::{
    chunk_crc, decode_png, decode_png_with, paeth_predict, DecodeOptions, Inflater, PngChunk,
    PngColorType, RawPngChunkIter, ZlibInflater, PNG_SIGNATURE,
  },
  Pixel, PngError, RGBA8, Y8, YA8,
};
use walkdir::WalkDir;

fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  out.extend_from_slice(&chunk_crc(*ty, data).to_be_bytes());
  out
}

fn header(width: u32, height: u32, color_type: u8) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&width.to_be_bytes());
  out.extend_from_slice(&height.to_be_bytes());
  out.extend_from_slice(&[8, color_type, 0, 0, 0]);
  chunk(b"IHDR", &out)
}

/// Signature, then the chunks, then `IEND`.
fn build_png(chunks: &[Vec<u8>]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for c in chunks {
    out.extend_from_slice(c);
  }
  out.extend_from_slice(&chunk(b"IEND", &[]));
  out
}

#[test]
fn test_RawPngChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    if let Ok(iter) = RawPngChunkIter::new(&v) {
      for raw in iter.flatten() {
        let _ = PngChunk::try_from(raw);
      }
    }
    let _ = decode_png(&v);
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    assert!(RawPngChunkIter::new(&v).is_err());
    let mut signed = PNG_SIGNATURE.to_vec();
    signed.extend_from_slice(&v);
    if let Ok(iter) = RawPngChunkIter::new(&signed) {
      for _ in iter {
        //
      }
    }
    let _ = decode_png(&signed);
  }
}

#[test]
fn test_decode_png_random_idat_no_panics() {
  for _ in 0..10 {
    let garbage = super::rand_bytes(256);
    let png = build_png(&[header(4, 4, 6), chunk(b"IDAT", &garbage)]);
    // random bytes might happen to be a valid zlib stream, but it shouldn't panic.
    let _ = decode_png(&png);
  }
}

#[test]
fn test_decode_gray_alpha_mixed_filters() {
  // 3x2 gray+alpha, row 0 Sub, row 1 Average.
  let raw = [1, 10, 20, 5, 5, 5, 5, 3, 4, 6, 8, 10, 12, 14];
  let png = build_png(&[header(3, 2, 4), chunk(b"IDAT", &compress_to_vec_zlib(&raw, 6))]);
  let out = decode_png(&png).unwrap();
  assert_eq!(out.color_type, PngColorType::GrayscaleAlpha);
  assert_eq!((out.width, out.height, out.channels, out.bit_depth), (3, 2, 2, 8));
  // row 0: 10,20 | 15,25 | 20,30
  assert_eq!(out.pixels.row(0), Some(&[10_u8, 20, 15, 25, 20, 30][..]));
  // row 1: 4+10/2, 6+20/2 | 8+(9+15)/2, 10+(16+25)/2 | 12+(20+20)/2, ...
  assert_eq!(out.pixels.get_pixel(0, 1), Ok(Pixel::YA(YA8 { y: 9, a: 16 })));
  assert_eq!(out.pixels.get_pixel(1, 1), Ok(Pixel::YA(YA8 { y: 20, a: 30 })));
}

#[test]
fn test_decode_rgba_paeth() {
  let above = [10_u8, 20, 30, 255, 40, 50, 60, 255];
  let wanted = [12_u8, 22, 32, 255, 90, 80, 70, 128];
  let mut raw = vec![0];
  raw.extend_from_slice(&above);
  raw.push(4);
  for j in 0..wanted.len() {
    let a = if j >= 4 { wanted[j - 4] } else { 0 };
    let c = if j >= 4 { above[j - 4] } else { 0 };
    raw.push(wanted[j].wrapping_sub(paeth_predict(a, above[j], c)));
  }
  // split the zlib stream over two IDAT chunks
  let z = compress_to_vec_zlib(&raw, 9);
  let (z1, z2) = z.split_at(z.len() / 2);
  let png = build_png(&[header(2, 2, 6), chunk(b"IDAT", z1), chunk(b"IDAT", z2)]);
  let out = decode_png(&png).unwrap();
  assert!(out.pixels.is_complete());
  assert_eq!(out.pixels.get_pixel(1, 1), Ok(Pixel::RGBA(RGBA8 { r: 90, g: 80, b: 70, a: 128 })));
  assert_eq!(out.pixels.row(1), Some(&wanted[..]));
}

#[test]
fn test_decode_ztxt() {
  let mut ztxt = b"Description\0\0".to_vec();
  ztxt.extend_from_slice(&compress_to_vec_zlib(b"a single gray pixel", 6));
  let png = build_png(&[
    header(1, 1, 0),
    chunk(b"zTXt", &ztxt),
    chunk(b"IDAT", &compress_to_vec_zlib(&[0, 128], 6)),
  ]);
  let out = decode_png(&png).unwrap();
  assert_eq!(out.text.len(), 1);
  assert_eq!(out.text[0].keyword, "Description");
  assert_eq!(out.text[0].text, "a single gray pixel");
  assert!(out.text[0].compressed);
  assert_eq!(out.pixels.get_pixel(0, 0).map(|p| p.to_rgb8().g), Ok(128));
}

#[test]
fn test_decode_bad_zlib() {
  let png = build_png(&[header(1, 1, 0), chunk(b"IDAT", &[0xFF, 0xFF, 0xFF, 0xFF])]);
  assert_eq!(decode_png(&png), Err(PngError::CodecError));
}

#[test]
fn test_decode_inflate_limit() {
  // a 1x1 gray image whose IDAT inflates to 8 MiB
  let mut raw = vec![0, 5];
  raw.resize(8 << 20, 0);
  let z = compress_to_vec_zlib(&raw, 9);
  assert!(z.len() < raw.len() / 100);
  let png = build_png(&[header(1, 1, 0), chunk(b"IDAT", &z)]);
  let out = decode_png_with(&png, &DecodeOptions::default(), &ZlibInflater).unwrap();
  assert_eq!(out.pixels.get_pixel(0, 0), Ok(Pixel::Y(Y8 { y: 5 })));
  // only what the header needs ever comes out
  assert_eq!(ZlibInflater.inflate(&z, 2), Ok(vec![0, 5]));
}

#[test]
fn test_decode_short_stream() {
  // enough for one row of two
  let raw = [0, 1, 2, 3];
  let png = build_png(&[header(1, 2, 2), chunk(b"IDAT", &compress_to_vec_zlib(&raw, 6))]);
  assert_eq!(decode_png(&png), Err(PngError::TruncatedBitmapData));
}

#[test]
fn test_resize_decoded() {
  // 4x4 gray, every pixel is its own index
  let raw: Vec<u8> =
    (0..4_u8).flat_map(|y| core::iter::once(0).chain((0..4).map(move |x| y * 4 + x))).collect();
  let png = build_png(&[header(4, 4, 0), chunk(b"IDAT", &compress_to_vec_zlib(&raw, 6))]);
  let mut out = decode_png(&png).unwrap();
  out.pixels.resize(2, 2).unwrap();
  assert_eq!(out.pixels.rows(), &[vec![0_u8, 2], vec![8_u8, 10]]);
}
