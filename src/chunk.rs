//! Chunking primitives used by batching, windowing and concurrent dispatch.

use crate::error::{Result, ensure_positive};

/// Pull at most `size` items from `iter`.
///
/// The returned chunk is shorter than `size` only when `iter` ran dry.
pub fn get_chunk<I: Iterator>(iter: &mut I, size: usize) -> Result<Vec<I::Item>> {
    let size = ensure_positive("chunk size", size)?;
    Ok(iter.by_ref().take(size).collect())
}

/// Lazily split `iter` into consecutive chunks of `size`; the last chunk may be shorter.
pub fn divide_in_chunks<I: Iterator>(iter: I, size: usize) -> Result<Chunks<I>> {
    let size = ensure_positive("chunk size", size)?;
    Ok(Chunks { inner: iter, size })
}

/// Iterator returned by [`divide_in_chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.inner.by_ref().take(self.size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.inner.size_hint();
        (lo.div_ceil(self.size), hi.map(|h| h.div_ceil(self.size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn chunk_is_bounded_by_source() {
        let mut it = 0..5;
        assert_eq!(get_chunk(&mut it, 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(get_chunk(&mut it, 3).unwrap(), vec![3, 4]);
        assert!(get_chunk(&mut it, 3).unwrap().is_empty());
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let err = divide_in_chunks(0..3, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(get_chunk(&mut (0..3), 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn tail_chunk_is_short() {
        let chunks: Vec<Vec<i32>> = divide_in_chunks(0..7, 3).unwrap().collect();
        assert_eq!(chunks, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
    }
}
