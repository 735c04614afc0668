//! Categorical feature encoding.
//!
//! # Pipeline
//!
//! 1. Rows flow through a [`VocabularyBuilder`] (usually via an [`Analyzer`]),
//!    which grows the categorical column set and assigns one internal index per
//!    distinct `(column, value)` pair.
//! 2. Closing the analysis freezes a [`Vocabulary`]; from then on it is read-only.
//! 3. A [`FittedOneHotEncoder`] turns rows into fixed-width numeric rows using
//!    the frozen tables.
//!
//! ```ignore
//! // Input:  [0, 1, 2, "a", 3], [3, 4, 5, "b", 6], [6, 7, 8, "c", 9]
//! // Output: [0, 1, 2, 3, 1, 0, 0], [3, 4, 5, 6, 0, 1, 0], [6, 7, 8, 9, 0, 0, 1]
//! ```
//!
//! # Design Notes
//!
//! Three coordinate spaces are involved (original, internal, encoded). All
//! translation between them lives on [`Vocabulary`] in the `translator`
//! module; nothing else does index arithmetic.

mod header;
mod one_hot;
mod translator;
mod vocabulary;

pub use one_hot::{Analyzer, EncodeIter, EncodedRow, FittedOneHotEncoder, OneHotEncoder};
pub use vocabulary::{Bucket, Vocabulary, VocabularyBuilder};
