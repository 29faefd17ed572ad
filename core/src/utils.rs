use crate::constants::{ALLOWED_CHUNK_SIZES, ChunkPolicy, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};

// Helper function to flatten emitted pieces into a single blob
pub fn concat_chunks(chunks: &[impl AsRef<[u8]>]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks {
        out.extend_from_slice(chunk.as_ref());
    }
    out
}

/// Resolve the read size used by the stream helpers.
///
/// `None` and `Some(0)` fall back to `DEFAULT_CHUNK_SIZE`; anything above
/// `MAX_CHUNK_SIZE` is capped.
pub fn best_chunk_size(requested: Option<usize>, policy: ChunkPolicy) -> usize {
    let size = match requested {
        None | Some(0) => return DEFAULT_CHUNK_SIZE,
        Some(size) => size.min(MAX_CHUNK_SIZE),
    };
    if ALLOWED_CHUNK_SIZES.contains(&size) {
        return size;
    }

    match policy {
        ChunkPolicy::Exact => size,
        ChunkPolicy::RoundUp => ALLOWED_CHUNK_SIZES
            .iter()
            .copied()
            .find(|&allowed| size <= allowed)
            .unwrap_or(size),
        ChunkPolicy::RoundDown => ALLOWED_CHUNK_SIZES
            .iter()
            .rev()
            .copied()
            .find(|&allowed| allowed <= size)
            .unwrap_or(ALLOWED_CHUNK_SIZES[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_when_unset_or_zero() {
        assert_eq!(best_chunk_size(None, ChunkPolicy::RoundUp), DEFAULT_CHUNK_SIZE);
        assert_eq!(best_chunk_size(Some(0), ChunkPolicy::Exact), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn snaps_to_allowed_sizes() {
        assert_eq!(best_chunk_size(Some(5000), ChunkPolicy::RoundUp), 16 * 1024);
        assert_eq!(best_chunk_size(Some(5000), ChunkPolicy::RoundDown), 4 * 1024);
        assert_eq!(best_chunk_size(Some(5000), ChunkPolicy::Exact), 5000);
        assert_eq!(best_chunk_size(Some(100), ChunkPolicy::RoundDown), 1024);
    }

    #[test]
    fn caps_at_max_chunk_size() {
        assert_eq!(best_chunk_size(Some(usize::MAX), ChunkPolicy::RoundUp), MAX_CHUNK_SIZE);
        assert_eq!(best_chunk_size(Some(MAX_CHUNK_SIZE - 1), ChunkPolicy::RoundUp), MAX_CHUNK_SIZE - 1);
    }

    #[test]
    fn concat_preserves_order() {
        let parts: Vec<Vec<u8>> = vec![b"ab".to_vec(), Vec::new(), b"c".to_vec()];
        assert_eq!(concat_chunks(&parts), b"abc");
    }
}
