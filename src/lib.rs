#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! A crate for decoding PNG image data.
//!
//! The whole file is expected to already be in memory as a byte slice. See
//! the [`png`] module for the decoding steps, or just call
//! [`png::decode_png`].

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod cursor;
pub use cursor::*;

pub mod ascii_array;
pub use ascii_array::*;

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod pixel_buffer;
pub use pixel_buffer::*;

pub mod render;

pub mod png;
