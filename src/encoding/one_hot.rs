//! One-hot (and one-cold) encoding of categorical features in mixed rows.
//!
//! Analysis discovers which columns are categorical and which values each of
//! them takes. Encoding then replaces every categorical column with one slot
//! per discovered value, keeping numeric columns in front.

use crate::config::OneHotConfig;
use crate::encoding::vocabulary::{Vocabulary, VocabularyBuilder};
use crate::error::OneHotError;
use crate::traits::{FittedTransformer, Transformer};
use crate::value::{Row, Value};
use ndarray::{Array2, ArrayView1};
use tracing::debug;

/// Fixed-width numeric output row.
pub type EncodedRow = Vec<f64>;

/// One-hot encoder for mixed numeric/categorical rows.
///
/// Unlike encoders that expect pre-mapped integer categories, any value that
/// is not a finite number marks its column as categorical, and the set of
/// categories is learned in a single streaming pass.
///
/// # Example
/// ```
/// use streaming_onehot::{row, OneHotEncoder};
///
/// let rows = vec![row![0, 1, 2, "a", 3], row![3, 4, 5, "b", 6], row![6, 7, 8, "c", 9]];
///
/// let fitted = OneHotEncoder::new().fit_rows(&rows);
/// assert_eq!(fitted.encode(&rows[0]).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 1.0, 0.0, 0.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    config: OneHotConfig,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: OneHotConfig) -> Self {
        Self { config }
    }

    /// Write `0` at the present category and `1` everywhere else.
    pub fn with_one_cold(mut self, one_cold: bool) -> Self {
        self.config.one_cold = one_cold;
        self
    }

    pub fn config(&self) -> OneHotConfig {
        self.config
    }

    /// Start an incremental analysis pass.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer {
            config: self.config,
            phase: Phase::Open(VocabularyBuilder::new()),
        }
    }

    /// Analyze a complete sequence of rows and freeze the result.
    pub fn fit_rows<I, R>(&self, rows: I) -> FittedOneHotEncoder
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Value]>,
    {
        FittedOneHotEncoder {
            vocabulary: Vocabulary::from_rows(rows),
            config: self.config,
        }
    }
}

impl Transformer for OneHotEncoder {
    type Input = [Row];
    type Output = Array2<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, OneHotError> {
        Ok(self.fit_rows(data))
    }
}

#[derive(Clone, Debug)]
enum Phase {
    Open(VocabularyBuilder),
    Closed(Vocabulary),
}

/// Analysis pass driven one row at a time.
///
/// OPEN until [`close`](Self::close) is called, CLOSED afterwards. Feeding a
/// closed analyzer, closing it twice or asking for the fitted encoder while it
/// is still open are usage faults.
#[derive(Clone, Debug)]
pub struct Analyzer {
    config: OneHotConfig,
    phase: Phase,
}

impl Analyzer {
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed(_))
    }

    /// Analyze one row.
    pub fn ingest(&mut self, row: &[Value]) -> Result<(), OneHotError> {
        match &mut self.phase {
            Phase::Open(builder) => {
                builder.ingest(row);
                Ok(())
            }
            Phase::Closed(_) => Err(OneHotError::usage(
                "analysis is closed; rows can no longer be added",
            )),
        }
    }

    /// Signal end of input and freeze the vocabulary.
    pub fn close(&mut self) -> Result<(), OneHotError> {
        let builder = match &mut self.phase {
            Phase::Open(builder) => std::mem::take(builder),
            Phase::Closed(_) => return Err(OneHotError::usage("analysis is already closed")),
        };
        self.phase = Phase::Closed(builder.finalize());
        Ok(())
    }

    /// Frozen vocabulary, once closed.
    pub fn vocabulary(&self) -> Result<&Vocabulary, OneHotError> {
        match &self.phase {
            Phase::Closed(vocabulary) => Ok(vocabulary),
            Phase::Open(_) => Err(OneHotError::usage("analysis is still open")),
        }
    }

    /// Take the fitted encoder out of a closed analyzer.
    pub fn into_fitted(self) -> Result<FittedOneHotEncoder, OneHotError> {
        match self.phase {
            Phase::Closed(vocabulary) => Ok(FittedOneHotEncoder {
                vocabulary,
                config: self.config,
            }),
            Phase::Open(_) => Err(OneHotError::usage(
                "analysis is still open; close it before encoding",
            )),
        }
    }

    /// Close and return the fitted encoder.
    pub fn finish(mut self) -> Result<FittedOneHotEncoder, OneHotError> {
        self.close()?;
        self.into_fitted()
    }
}

/// Fitted OneHotEncoder ready for inference.
///
/// Holds no state besides the frozen vocabulary and configuration; encoding is
/// a pure function of those and the row.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    vocabulary: Vocabulary,
    config: OneHotConfig,
}

impl FittedOneHotEncoder {
    pub fn new(vocabulary: Vocabulary, config: OneHotConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> OneHotConfig {
        self.config
    }

    pub fn number_of_original_features(&self) -> usize {
        self.vocabulary.number_of_original_features()
    }

    pub fn number_of_encoded_features(&self) -> usize {
        self.vocabulary.number_of_encoded_features()
    }

    pub fn number_of_non_encoded_features(&self) -> usize {
        self.vocabulary.number_of_non_encoded_features()
    }

    /// Labels for the encoded columns, see [`Vocabulary::columns_header`].
    pub fn columns_header<S: AsRef<str>>(&self, original_names: Option<&[S]>) -> Vec<Option<String>> {
        self.vocabulary.columns_header(original_names)
    }

    /// Encode a single row.
    ///
    /// Numeric columns are copied in order, missing ones receive the cold
    /// value. For every categorical column the slot of its value is set hot,
    /// a missing value leaves all of the column's slots cold.
    ///
    /// # Errors
    /// - [`OneHotError::UnknownFeatureValue`] if a categorical value was never
    ///   seen during analysis.
    /// - [`OneHotError::NonNumericValue`] if a numeric column holds text or a bool.
    pub fn encode(&self, row: &[Value]) -> Result<EncodedRow, OneHotError> {
        let vocab = &self.vocabulary;
        let hot = self.config.hot();
        let cold = self.config.cold();

        let mut encoded = Vec::with_capacity(vocab.number_of_encoded_features());
        for &column in vocab.non_categorical_indexes() {
            let value = match row.get(column) {
                None | Some(Value::Null) => cold,
                Some(Value::Number(x)) => *x,
                Some(other) => {
                    return Err(OneHotError::NonNumericValue {
                        column,
                        value: other.clone(),
                    })
                }
            };
            encoded.push(value);
        }
        encoded.resize(vocab.number_of_encoded_features(), cold);

        for (column, bucket) in vocab.buckets() {
            let value = match row.get(column) {
                Some(value) if !value.is_null() => value,
                _ => continue,
            };
            let slot = bucket
                .get(value)
                .and_then(|&internal| vocab.encoded_index_from_internal(internal))
                .ok_or_else(|| OneHotError::UnknownFeatureValue {
                    column,
                    value: value.clone(),
                })?;
            encoded[slot] = hot;
        }

        Ok(encoded)
    }

    /// Encode a chunk of rows, one result per row.
    pub fn encode_chunk<R: AsRef<[Value]>>(&self, rows: &[R]) -> Vec<Result<EncodedRow, OneHotError>> {
        rows.iter().map(|row| self.encode(row.as_ref())).collect()
    }

    /// Lazily encode a stream of rows, one result per row, in input order.
    pub fn encode_iter<I>(&self, rows: I) -> EncodeIter<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<[Value]>,
    {
        EncodeIter {
            encoder: self,
            rows: rows.into_iter(),
            position: 0,
        }
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = [Row];
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, OneHotError> {
        let mut result = Array2::zeros((data.len(), self.number_of_encoded_features()));
        for (row, mut out) in data.iter().zip(result.rows_mut()) {
            let encoded = self.encode(row)?;
            out.assign(&ArrayView1::from(&encoded));
        }
        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.number_of_original_features()
    }

    fn n_features_out(&self) -> usize {
        self.number_of_encoded_features()
    }
}

/// Iterator adapter encoding rows as they are pulled.
///
/// Created by [`FittedOneHotEncoder::encode_iter`]. A failing row yields
/// `Some(Err(_))` and iteration continues with the next row.
pub struct EncodeIter<'a, I> {
    encoder: &'a FittedOneHotEncoder,
    rows: I,
    position: usize,
}

impl<'a, I> Iterator for EncodeIter<'a, I>
where
    I: Iterator,
    I::Item: AsRef<[Value]>,
{
    type Item = Result<EncodedRow, OneHotError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let result = self.encoder.encode(row.as_ref());
        if let Err(err) = &result {
            debug!(row = self.position, error = %err, "row failed to encode");
        }
        self.position += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
