//! compression/codec.rs
//!
//! Thin adapter over the Zstandard primitive (`zstd-safe`).
//!
//! Design notes:
//! - `EncoderContext` / `DecoderContext` own one zstd context each; zstd frees it
//!   when the wrapper drops, so release happens exactly once on every path.
//! - Output buffers are reserved from the codec's worst-case bounds before each
//!   call and only grow by the amount the codec reports as still pending.
//! - Every frame carries a content checksum so a wrong dictionary or corrupted
//!   input fails decoding instead of yielding garbage.

use zstd_safe::{CCtx, CParameter, DCtx, ErrorCode, InBuffer, OutBuffer, ResetDirective};

use crate::compression::config::CodecConfig;
use crate::compression::constants::{
    FRAME_EPILOGUE_MAX, MAX_INPUT_SIZE, SKIPPABLE_MAGIC_BASE, SKIPPABLE_MAGIC_MASK,
};
use crate::compression::types::{CompressionError, Result};

fn error_name(code: ErrorCode) -> &'static str {
    zstd_safe::get_error_name(code)
}

fn compress_failed(code: ErrorCode) -> CompressionError {
    CompressionError::CompressFailed { reason: error_name(code).to_string() }
}

fn decode_failed(code: ErrorCode) -> CompressionError {
    CompressionError::decode(error_name(code))
}

/// Worst-case size of a one-shot frame holding `input_len` bytes.
pub fn max_compressed_size(input_len: usize) -> Result<usize> {
    if input_len >= MAX_INPUT_SIZE {
        return Err(CompressionError::CompressionBound { input_len });
    }
    let bound = zstd_safe::compress_bound(input_len);
    if bound < input_len {
        return Err(CompressionError::CompressionBound { input_len });
    }
    Ok(bound)
}

/// Worst-case output of a streaming call when `pending_len` bytes may still be
/// buffered inside the codec (frame header and trailer included).
pub fn max_flush_size(pending_len: usize) -> Result<usize> {
    max_compressed_size(pending_len)?
        .checked_add(FRAME_EPILOGUE_MAX)
        .ok_or(CompressionError::CompressionBound { input_len: pending_len })
}

fn is_skippable_frame(src: &[u8]) -> bool {
    match src.get(..4) {
        Some(magic) => {
            let magic = u32::from_le_bytes([magic[0], magic[1], magic[2], magic[3]]);
            magic & SKIPPABLE_MAGIC_MASK == SKIPPABLE_MAGIC_BASE
        }
        None => false,
    }
}

/// Decompressed size recorded in the frame header; `None` when the frame does
/// not declare one (frames written incrementally).
///
/// Skippable frames carry no data and are rejected.
pub fn frame_content_size(src: &[u8]) -> Result<Option<u64>> {
    if is_skippable_frame(src) {
        return Err(CompressionError::decode("skippable frame carries no data"));
    }
    zstd_safe::get_frame_content_size(src)
        .map_err(|_| CompressionError::decode("input is not a zstd frame"))
}

/// Fail unless `src` is exactly one frame with nothing after it.
fn ensure_single_frame(src: &[u8]) -> Result<()> {
    let frame_len = zstd_safe::find_frame_compressed_size(src).map_err(decode_failed)?;
    if frame_len != src.len() {
        return Err(CompressionError::decode(format!(
            "{} trailing bytes after the frame",
            src.len() - frame_len
        )));
    }
    Ok(())
}

/// Owned compression context configured with level, checksum and dictionary.
pub struct EncoderContext {
    cctx: CCtx<'static>,
}

impl EncoderContext {
    pub fn create(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut cctx = CCtx::try_create()
            .ok_or_else(|| CompressionError::configuration("cannot allocate compression context"))?;

        let configure_err = |code: ErrorCode| CompressionError::configuration(error_name(code));
        cctx.set_parameter(CParameter::CompressionLevel(config.resolved_level()))
            .map_err(configure_err)?;
        cctx.set_parameter(CParameter::ChecksumFlag(true))
            .map_err(configure_err)?;
        if let Some(dict) = config.dictionary() {
            cctx.load_dictionary(dict.as_bytes()).map_err(configure_err)?;
        }
        Ok(Self { cctx })
    }

    /// Compress `src` into one complete frame.
    pub fn compress_once(&mut self, src: &[u8]) -> Result<Vec<u8>> {
        let bound = max_compressed_size(src.len())?;
        let mut out = Vec::with_capacity(bound);
        self.cctx.compress2(&mut out, src).map_err(compress_failed)?;
        Ok(out)
    }

    /// Push `chunk` through the codec, appending emitted bytes to `out`.
    /// `reserve` is the bound for this call; the codec may keep data buffered.
    pub fn feed(&mut self, chunk: &[u8], out: &mut Vec<u8>, reserve: usize) -> Result<()> {
        out.reserve(reserve);
        let mut input = InBuffer::around(chunk);
        while input.pos() < chunk.len() {
            if out.len() == out.capacity() {
                out.reserve(CCtx::out_size());
            }
            let pos = out.len();
            let mut output = OutBuffer::around_pos(out, pos);
            self.cctx.compress_stream(&mut output, &mut input).map_err(compress_failed)?;
        }
        Ok(())
    }

    /// Emit everything fed so far as a synchronization point.
    pub fn flush(&mut self, out: &mut Vec<u8>, reserve: usize) -> Result<()> {
        self.drain(out, reserve, |cctx, output| cctx.flush_stream(output))
    }

    /// Emit remaining data plus the frame trailer.
    pub fn finish(&mut self, out: &mut Vec<u8>, reserve: usize) -> Result<()> {
        self.drain(out, reserve, |cctx, output| cctx.end_stream(output))
    }

    fn drain<F>(&mut self, out: &mut Vec<u8>, reserve: usize, mut step: F) -> Result<()>
    where
        F: FnMut(&mut CCtx<'static>, &mut OutBuffer<'_, Vec<u8>>) -> zstd_safe::SafeResult,
    {
        let mut want = reserve;
        loop {
            out.reserve(want);
            let pos = out.len();
            let remaining = {
                let mut output = OutBuffer::around_pos(out, pos);
                step(&mut self.cctx, &mut output).map_err(compress_failed)?
            };
            if remaining == 0 {
                return Ok(());
            }
            want = remaining;
        }
    }
}

/// Owned decompression context with the dictionary (if any) loaded.
pub struct DecoderContext {
    dctx: DCtx<'static>,
}

impl DecoderContext {
    pub fn create(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut dctx = DCtx::try_create()
            .ok_or_else(|| CompressionError::configuration("cannot allocate decompression context"))?;
        if let Some(dict) = config.dictionary() {
            dctx.load_dictionary(dict.as_bytes())
                .map_err(|code| CompressionError::configuration(error_name(code)))?;
        }
        Ok(Self { dctx })
    }

    /// Decode one complete frame.
    ///
    /// Allocates exactly the declared content size when the header records it,
    /// otherwise decodes incrementally and requires the frame to be complete.
    pub fn decompress_once(&mut self, src: &[u8]) -> Result<Vec<u8>> {
        self.reset()?;
        let declared = frame_content_size(src)?;
        ensure_single_frame(src)?;
        match declared {
            Some(size) => {
                let size = usize::try_from(size)
                    .map_err(|_| CompressionError::decode("declared content size overflows usize"))?;
                let mut out = Vec::new();
                out.try_reserve_exact(size)
                    .map_err(|_| CompressionError::decode(format!("cannot allocate {} bytes", size)))?;
                let written = self.dctx.decompress(&mut out, src).map_err(decode_failed)?;
                if written != size {
                    return Err(CompressionError::decode(format!(
                        "frame declared {} bytes but produced {}",
                        size, written
                    )));
                }
                Ok(out)
            }
            None => {
                let mut out = Vec::new();
                let hint = self.feed(src, &mut out)?;
                if hint != 0 {
                    return Err(CompressionError::decode("truncated frame"));
                }
                Ok(out)
            }
        }
    }

    /// Decode as much of `src` as possible, appending plaintext to `out`.
    ///
    /// Returns the codec's hint: `0` once a frame has been fully decoded and
    /// checked, otherwise the number of input bytes it still expects. Decoding
    /// stops at the end of the frame; input left over after it is an error.
    pub fn feed(&mut self, src: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        let mut input = InBuffer::around(src);
        loop {
            if out.len() == out.capacity() {
                out.reserve(DCtx::out_size());
            }
            let pos = out.len();
            let hint = {
                let mut output = OutBuffer::around_pos(out, pos);
                self.dctx.decompress_stream(&mut output, &mut input).map_err(decode_failed)?
            };
            if hint == 0 {
                let rest = src.len() - input.pos();
                if rest > 0 {
                    return Err(CompressionError::decode(format!(
                        "{} trailing bytes after the frame",
                        rest
                    )));
                }
                return Ok(0);
            }
            let output_full = out.len() == out.capacity();
            if input.pos() == src.len() && !output_full {
                return Ok(hint);
            }
        }
    }

    /// Drop any partially decoded frame, keeping the loaded dictionary.
    pub fn reset(&mut self) -> Result<()> {
        self.dctx
            .reset(ResetDirective::SessionOnly)
            .map(|_| ())
            .map_err(decode_failed)
    }
}
