#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use zsession_core::compression::{
        compress_reader, compress_stream, decompress_reader, CodecConfig, CompressionError,
        Dictionary, SimpleCodec, StreamingSession,
    };
    use zsession_core::constants::{ChunkPolicy, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
    use zsession_core::utils::best_chunk_size;

    // ------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------
    fn log_lines(count: usize) -> Vec<u8> {
        (0..count)
            .map(|i| format!("2026-10-17T08:{:02}:{:02}Z INFO request id={} status=200 path=/api/v1/items\n", i / 60 % 60, i % 60, i))
            .collect::<String>()
            .into_bytes()
    }

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader gone"))
        }
    }

    // --- compress_stream ---

    #[test]
    fn iterator_yields_a_complete_frame() {
        let data = log_lines(2_000);
        let session = StreamingSession::new(CodecConfig::new()).unwrap();
        let pieces = compress_stream(Cursor::new(&data), Some(4096), session)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(!pieces.is_empty());
        assert!(pieces.iter().all(|p| !p.is_empty()));
        let frame = pieces.concat();
        let mut codec = SimpleCodec::new(CodecConfig::new()).unwrap();
        assert_eq!(codec.decompress(&frame).unwrap(), data);
    }

    #[test]
    fn iterator_on_empty_reader_yields_only_the_trailer() {
        let session = StreamingSession::new(CodecConfig::new()).unwrap();
        let pieces: Vec<_> = compress_stream(io::empty(), Some(1024), session)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pieces.len(), 1);
        let mut codec = SimpleCodec::new(CodecConfig::new()).unwrap();
        assert_eq!(codec.decompress(&pieces[0]).unwrap(), b"");
    }

    #[test]
    fn iterator_surfaces_read_errors_once() {
        let session = StreamingSession::new(CodecConfig::new()).unwrap();
        let mut iter = compress_stream(Failing, Some(1024), session);
        assert!(matches!(iter.next(), Some(Err(CompressionError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn unset_and_zero_chunk_sizes_use_the_default() {
        let data = log_lines(3_000);
        assert!(data.len() > DEFAULT_CHUNK_SIZE);
        for chunk_size in [None, Some(0)] {
            let session = StreamingSession::new(CodecConfig::new()).unwrap();
            let frame = compress_stream(Cursor::new(&data), chunk_size, session)
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
                .concat();

            let mut plain = Vec::new();
            decompress_reader(&frame[..], &mut plain, CodecConfig::new(), chunk_size).unwrap();
            assert_eq!(plain, data);

            let mut via_reader = Vec::new();
            let counters = compress_reader(&data[..], &mut via_reader, CodecConfig::new(), chunk_size).unwrap();
            assert_eq!(counters.calls_feed, data.len().div_ceil(DEFAULT_CHUNK_SIZE) as u64);
        }
    }

    #[test]
    fn oversized_chunk_size_is_capped() {
        let data = log_lines(100);
        let mut frame = Vec::new();
        let counters = compress_reader(&data[..], &mut frame, CodecConfig::new(), Some(usize::MAX)).unwrap();
        assert_eq!(counters.calls_feed, 1);
        assert_eq!(best_chunk_size(Some(usize::MAX), ChunkPolicy::default()), MAX_CHUNK_SIZE);
    }

    // --- compress_reader / decompress_reader ---

    #[test]
    fn reader_round_trip_with_dictionary() {
        let data = log_lines(5_000);
        let config = CodecConfig::new()
            .with_level(6)
            .with_dictionary(Dictionary::new(log_lines(50)));
        let chunk = best_chunk_size(Some(10_000), ChunkPolicy::RoundUp);

        let mut frame = Vec::new();
        let counters = compress_reader(Trickle { data: &data, step: 777 }, &mut frame, config.clone(), Some(chunk)).unwrap();
        assert_eq!(counters.bytes_plaintext, data.len() as u64);
        assert_eq!(counters.bytes_compressed, frame.len() as u64);
        assert_eq!(counters.calls_finish, 1);
        assert!(frame.len() < data.len() / 4);

        let mut plain = Vec::new();
        let counters = decompress_reader(Trickle { data: &frame, step: 13 }, &mut plain, config, Some(64)).unwrap();
        assert_eq!(plain, data);
        assert_eq!(counters.bytes_decode_in, frame.len() as u64);
        assert_eq!(counters.bytes_decode_out, data.len() as u64);
        assert_eq!(counters.bytes_compressed, 0);
    }

    #[test]
    fn decompress_reader_rejects_truncated_stream() {
        let data = log_lines(500);
        let mut frame = Vec::new();
        compress_reader(&data[..], &mut frame, CodecConfig::new(), Some(1024)).unwrap();
        frame.truncate(frame.len() - 3);

        let mut plain = Vec::new();
        let err = decompress_reader(&frame[..], &mut plain, CodecConfig::new(), Some(1024)).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn reader_errors_propagate_as_io() {
        let mut sink = Vec::new();
        let err = compress_reader(Failing, &mut sink, CodecConfig::new(), None).unwrap_err();
        assert!(matches!(err, CompressionError::Io(_)));
    }
}
