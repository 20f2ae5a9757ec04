use super::*;

/// Where a [`ContainerParser`] is in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
  /// Nothing has been read yet.
  ExpectingSignature,
  /// The signature was good, chunks are being read.
  IteratingChunks,
  /// All the bytes were consumed.
  Done,
  /// A step failed. Every later step returns the same error.
  Failed(PngError),
}

/// Everything the container holds that decoding needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngContainer {
  pub header: IHDR,
  /// All `IDAT` payloads, concatenated in file order.
  pub idat: Vec<u8>,
  pub text: Vec<PngText>,
  pub last_modified: Option<tIME>,
  pub saw_iend: bool,
}

/// Walks a PNG's chunks, one per [`step`](Self::step).
#[derive(Debug, Clone)]
pub struct ContainerParser<'b> {
  cursor: Cursor<'b>,
  state: ParseState,
  options: DecodeOptions,
  chunks_seen: usize,
  header: Option<IHDR>,
  idat: Vec<u8>,
  text: Vec<PngText>,
  last_modified: Option<tIME>,
  saw_iend: bool,
}
impl<'b> ContainerParser<'b> {
  /// Makes a parser over the full PNG bytes.
  #[inline]
  #[must_use]
  pub const fn new(png: &'b [u8], options: DecodeOptions) -> Self {
    Self {
      cursor: Cursor::new(png),
      state: ParseState::ExpectingSignature,
      options,
      chunks_seen: 0,
      header: None,
      idat: Vec::new(),
      text: Vec::new(),
      last_modified: None,
      saw_iend: false,
    }
  }

  #[inline]
  #[must_use]
  pub const fn state(&self) -> ParseState {
    self.state
  }

  /// The header, once the first chunk has been read.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> Option<IHDR> {
    self.header
  }

  /// Advances by one unit of work: the signature, or one chunk.
  ///
  /// Stepping once `Done` does nothing. Once a step fails the parser is
  /// `Failed`, and every later step returns that first error again.
  pub fn step<I: Inflater + ?Sized>(&mut self, inflater: &I) -> PngResult<ParseState> {
    if let ParseState::Failed(e) = self.state {
      return Err(e);
    }
    match self.try_step(inflater) {
      Ok(()) => Ok(self.state),
      Err(e) => {
        self.state = ParseState::Failed(e);
        Err(e)
      }
    }
  }

  fn try_step<I: Inflater + ?Sized>(&mut self, inflater: &I) -> PngResult<()> {
    match self.state {
      ParseState::ExpectingSignature => {
        match self.cursor.read_array::<8>() {
          Ok(PNG_SIGNATURE) => (),
          _ => return Err(PngError::CorruptHeader),
        }
        self.state = ParseState::IteratingChunks;
      }
      ParseState::IteratingChunks => {
        if self.cursor.at_end() {
          self.state = ParseState::Done;
        } else {
          let raw = RawPngChunk::read_from(&mut self.cursor)?;
          self.process_chunk(raw, inflater)?;
          self.chunks_seen += 1;
        }
      }
      ParseState::Done | ParseState::Failed(_) => (),
    }
    Ok(())
  }

  /// Steps until `Done` and hands back what was collected.
  ///
  /// ## Failure
  /// * `NoChunksPresent` if the signature wasn't followed by any chunks.
  /// * Anything a [`step`](Self::step) fails with, including an earlier
  ///   failure if the parser is already `Failed`.
  pub fn run<I: Inflater + ?Sized>(mut self, inflater: &I) -> PngResult<PngContainer> {
    while self.step(inflater)? != ParseState::Done {}
    if self.chunks_seen == 0 {
      return Err(PngError::NoChunksPresent);
    }
    let header = self.header.ok_or(PngError::MissingHeader)?;
    if !self.saw_iend {
      log::debug!("png: no IEND chunk, the file may be truncated");
    }
    Ok(PngContainer {
      header,
      idat: self.idat,
      text: self.text,
      last_modified: self.last_modified,
      saw_iend: self.saw_iend,
    })
  }

  fn process_chunk<I: Inflater + ?Sized>(
    &mut self, raw: RawPngChunk<'_>, inflater: &I,
  ) -> PngResult<()> {
    log::debug!("png: {} chunk, {} bytes", raw.chunk_ty, raw.data.len());
    if self.chunks_seen == 0 && raw.chunk_ty != ChunkType::IHDR {
      return Err(PngError::FirstChunkNotIHDR);
    }
    if raw.actual_crc() != raw.declared_crc {
      if self.options.check_crc {
        return Err(PngError::ChecksumMismatch);
      }
      log::warn!("png: {} chunk has a bad CRC", raw.chunk_ty);
    }
    let is_text = matches!(raw.chunk_ty, ChunkType::tEXt | ChunkType::zTXt | ChunkType::tIME);
    let chunk = if is_text && !self.options.decode_text {
      PngChunk::Unknown(raw)
    } else {
      match PngChunk::try_from(raw) {
        Ok(chunk) => chunk,
        Err(e) if raw.chunk_ty.is_ancillary() => {
          log::warn!("png: skipping malformed {} chunk: {}", raw.chunk_ty, e);
          return Ok(());
        }
        Err(e) => return Err(e),
      }
    };
    match chunk {
      PngChunk::IHDR(ihdr) => {
        if self.header.is_some() {
          return Err(PngError::DuplicateHeader);
        }
        if ihdr.width > self.options.max_dimension || ihdr.height > self.options.max_dimension {
          return Err(PngError::DimensionsTooLarge);
        }
        self.header = Some(ihdr);
      }
      PngChunk::IDAT(IDAT { data }) => {
        self.idat.try_reserve(data.len())?;
        self.idat.extend_from_slice(data);
      }
      PngChunk::IEND => self.saw_iend = true,
      PngChunk::tEXt(t) => self.push_text(t.to_text()),
      PngChunk::zTXt(z) => match z.to_text(inflater, self.options.max_text_len) {
        Ok(text) => self.push_text(text),
        Err(PngError::UnsupportedCompression(m)) => {
          log::warn!("png: unsupported compression method {} used for zTXt", m)
        }
        Err(e) => log::warn!("png: skipping zTXt chunk: {}", e),
      },
      PngChunk::tIME(t) => {
        log::info!("png: Last modified at {}", t);
        self.last_modified = Some(t);
      }
      PngChunk::Unknown(raw) => {
        log::debug!("png: skipping unrecognized {} chunk", raw.chunk_ty);
      }
    }
    Ok(())
  }

  fn push_text(&mut self, text: PngText) {
    log::info!("png: {}: {}", text.keyword, text.text);
    self.text.push(text);
  }
}
