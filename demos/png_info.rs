use pngscan::png::{decode_png, PngChunk, RawPngChunkIter};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let iter = match RawPngChunkIter::new(&bytes) {
      Ok(iter) => iter,
      Err(e) => {
        println!("not a PNG: {e}");
        continue;
      }
    };
    for (n, raw_chunk) in iter.enumerate() {
      let chunk_res = raw_chunk.and_then(PngChunk::try_from);
      println!("{n}: {chunk_res:?}");
    }
    match decode_png(&bytes) {
      Ok(png) => println!(
        "{}x{} {:?}, {} bit, {} rows",
        png.width,
        png.height,
        png.color_type,
        png.bit_depth,
        png.pixels.rows().len()
      ),
      Err(e) => println!("decode failed: {e}"),
    }
  }
}
