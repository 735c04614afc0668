//! Row sources with chunked access.
//!
//! This module provides a generic [`RowSource`] trait for uniform access to
//! input rows and a [`ChunkIter`] iterator delivering them in fixed-size
//! chunks, the way a streaming reader hands over one buffer at a time.
//!
//! # Example
//!
//! ```rust
//! use streaming_onehot::dataset::{InMemoryRows, RowSource};
//! use streaming_onehot::row;
//!
//! let source = InMemoryRows::new(vec![row![1, "a"], row![2, "b"], row![3, "c"]]);
//!
//! for chunk in source.chunks(2) {
//!     let chunk = chunk.unwrap();
//!     assert!(chunk.len() <= 2);
//! }
//! ```

use crate::value::Row;
use std::ops::Range;

pub mod memory;
pub use self::memory::InMemoryRows;

/// Abstract interface for a source of input rows.
///
/// # Associated Types
///
/// - `Error` — Error type returned when reading rows
pub trait RowSource {
    /// Error type returned when accessing rows.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the total number of rows, if known.
    ///
    /// # Returns
    ///
    /// - `Some(n)` — Exact number of rows
    /// - `None` — Size is unknown; [`chunks`](Self::chunks) keeps requesting
    ///   windows until one comes back empty or short
    fn len(&self) -> Option<usize>;

    /// Checks whether the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Creates an iterator over fixed-size chunks.
    ///
    /// The last chunk may be smaller than `chunk_size`. A `chunk_size` of zero
    /// is treated as one.
    fn chunks(&self, chunk_size: usize) -> ChunkIter<'_, Self>
    where
        Self: Sized,
    {
        ChunkIter {
            source: self,
            chunk_size: chunk_size.max(1),
            current: 0,
            exhausted: false,
        }
    }

    /// Loads the rows in `range`.
    ///
    /// Sources of unknown length return the rows they still hold inside
    /// `range`, which may be fewer than requested or none at all.
    fn get_chunk(&self, range: Range<usize>) -> Result<Vec<Row>, Self::Error>;
}

/// Iterator over source chunks.
///
/// Created by [`RowSource::chunks`]. Data is fetched only when `next()` is
/// called; read errors are forwarded as `Some(Err(_))`.
pub struct ChunkIter<'a, S: ?Sized> {
    source: &'a S,
    chunk_size: usize,
    /// Index of the next row to yield.
    current: usize,
    exhausted: bool,
}

impl<'a, S: RowSource> Iterator for ChunkIter<'a, S> {
    type Item = Result<Vec<Row>, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let Some(total) = self.source.len() else {
            return self.next_unsized();
        };
        if self.current >= total {
            return None;
        }

        let end = (self.current + self.chunk_size).min(total);
        let range = self.current..end;
        self.current = end;

        Some(self.source.get_chunk(range))
    }
}

impl<'a, S: RowSource> ChunkIter<'a, S> {
    /// Window-by-window reading for sources that cannot report their length.
    fn next_unsized(&mut self) -> Option<Result<Vec<Row>, S::Error>> {
        let range = self.current..self.current + self.chunk_size;
        match self.source.get_chunk(range) {
            Ok(chunk) if chunk.is_empty() => {
                self.exhausted = true;
                None
            }
            Ok(chunk) => {
                self.current += chunk.len();
                if chunk.len() < self.chunk_size {
                    self.exhausted = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}
