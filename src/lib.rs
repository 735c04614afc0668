//! # streaming-onehot
//!
//! Streaming one-hot (and one-cold) encoding of categorical features inside
//! ordered rows of mixed numeric and categorical values, without holding the
//! dataset in memory.
//!
//! ## Core Design Principles
//!
//! - **Two passes, one owner**: an analysis pass discovers the vocabulary, an
//!   encoding pass turns rows into fixed-width numeric vectors. Both consume
//!   rows one at a time.
//! - **Fitted/unfitted separation**: [`OneHotEncoder`] only carries
//!   configuration; [`FittedOneHotEncoder`] carries the frozen [`Vocabulary`]
//!   and can never be mutated by encoding.
//! - **Deterministic placement**: internal indices are handed out in first-seen
//!   order, so batch and chunked analysis over the same row order agree.
//! - **Row-scoped failures**: a value never seen during analysis fails its own
//!   row and nothing else.
//!
//! ## Quick Start
//!
//! ```rust
//! use streaming_onehot::{feed, row, OneHotEncoder};
//!
//! let rows = vec![row![1, 2, 3, "a"], row![1, 2, 3, "b"]];
//!
//! let mut analyzer = OneHotEncoder::new().analyzer();
//! feed::pump(&rows, &mut analyzer).unwrap();
//! let fitted = analyzer.into_fitted().unwrap();
//!
//! let vocab = fitted.vocabulary();
//! assert_eq!(vocab.internal_index_from_original(3, &"a".into()), Some(4));
//! assert_eq!(vocab.encoded_index_from_original(3, &"a".into()), Some(3));
//! assert_eq!(vocab.original_index_from_encoded(4), Some(3));
//!
//! for encoded in fitted.encode_iter(&rows) {
//!     assert_eq!(encoded.unwrap().len(), fitted.number_of_encoded_features());
//! }
//! ```
//!
//! ## Module Structure
//!
//! - `value` — Cell values, rows and categorical detection
//! - `encoding` — Vocabulary builder, coordinate translator, encoder, headers
//! - `dataset` — Chunked row sources
//! - `feed` — Row sinks, pump drivers and a bounded producer/consumer queue
//! - `config` — Construction-time options
//! - `error` — Error taxonomy
//!
//! ## Concurrency
//!
//! All types are `Send`, but an analysis pass is single-owner: rows must reach
//! an [`Analyzer`] one at a time. Funnel concurrent producers through one
//! [`feed::bounded`] queue, or wrap the analyzer in a mutex for the whole pass.

pub mod config;

/// Chunked row sources.
pub mod dataset;

/// Categorical feature encoding.
pub mod encoding;

pub mod error;

/// Row sinks, drivers and a bounded row queue.
pub mod feed;

/// Fit/transform traits.
pub mod traits;

/// Cell values and categorical detection.
pub mod value;

pub use config::OneHotConfig;
pub use encoding::{
    Analyzer, EncodeIter, EncodedRow, FittedOneHotEncoder, OneHotEncoder, Vocabulary,
    VocabularyBuilder,
};
pub use error::OneHotError;
pub use traits::{FittedTransformer, Transformer};
pub use value::{classify_row, Row, Value};
