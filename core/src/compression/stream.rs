//! compression/stream.rs
//! Reader/writer helpers that drive sessions in chunk_size pieces.
//!
//! The requested chunk size goes through `best_chunk_size`: `None` or `Some(0)`
//! means `DEFAULT_CHUNK_SIZE`, other sizes snap up to an allowed size and are
//! capped at `MAX_CHUNK_SIZE`.
use std::io::{ErrorKind, Read, Write};

use crate::compression::config::CodecConfig;
use crate::compression::decoder::StreamingDecompressor;
use crate::compression::session::StreamingSession;
use crate::compression::types::{CompressionError, Compressor, Decompressor, Result};
use crate::constants::ChunkPolicy;
use crate::telemetry::SessionCounters;
use crate::utils::best_chunk_size;

/// Read until `buf` is full or EOF; returns bytes read.
fn read_chunk<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn chunk_buffer(chunk_size: Option<usize>) -> Vec<u8> {
    vec![0u8; best_chunk_size(chunk_size, ChunkPolicy::default())]
}

/// Summary: Compress data read from R in chunk_size blocks, yielding compressed pieces.
/// - Pieces for which the codec emitted nothing are skipped.
/// - Calls finish() after EOF, yielding the trailer once.
/// - Stops after the first error.
pub fn compress_stream<R: Read, C: Compressor>(
    mut r: R,
    chunk_size: Option<usize>,
    mut compressor: C,
) -> impl Iterator<Item = Result<Vec<u8>>> {
    let mut buf = chunk_buffer(chunk_size);
    let mut done = false;

    std::iter::from_fn(move || {
        while !done {
            let mut out = Vec::new();
            let step = match read_chunk(&mut r, &mut buf) {
                Ok(0) => {
                    done = true;
                    compressor.finish(&mut out)
                }
                Ok(n) => compressor.compress_chunk(&buf[..n], &mut out),
                Err(e) => Err(CompressionError::Io(e)),
            };
            match step {
                Err(e) => {
                    done = true;
                    return Some(Err(e));
                }
                Ok(()) if !out.is_empty() => return Some(Ok(out)),
                Ok(()) => {}
            }
        }
        None
    })
}

/// Compress everything from `r` into `w` as one frame.
pub fn compress_reader<R: Read, W: Write>(
    mut r: R,
    mut w: W,
    config: CodecConfig,
    chunk_size: Option<usize>,
) -> Result<SessionCounters> {
    let mut session = StreamingSession::new(config)?;
    let mut buf = chunk_buffer(chunk_size);
    let mut out = Vec::new();
    loop {
        let n = read_chunk(&mut r, &mut buf)?;
        out.clear();
        if n == 0 {
            Compressor::finish(&mut session, &mut out)?;
            w.write_all(&out)?;
            break;
        }
        Compressor::compress_chunk(&mut session, &buf[..n], &mut out)?;
        w.write_all(&out)?;
    }
    w.flush()?;
    Ok(session.counters().clone())
}

/// Decompress one frame from `r` into `w`, failing if the input ends mid-frame.
pub fn decompress_reader<R: Read, W: Write>(
    mut r: R,
    mut w: W,
    config: CodecConfig,
    chunk_size: Option<usize>,
) -> Result<SessionCounters> {
    let mut decoder = StreamingDecompressor::new(config)?;
    let mut buf = chunk_buffer(chunk_size);
    let mut out = Vec::new();
    loop {
        let n = read_chunk(&mut r, &mut buf)?;
        if n == 0 {
            break;
        }
        out.clear();
        decoder.decompress_chunk(&buf[..n], &mut out)?;
        w.write_all(&out)?;
    }
    Decompressor::finish(&mut decoder)?;
    w.flush()?;
    Ok(decoder.counters().clone())
}
