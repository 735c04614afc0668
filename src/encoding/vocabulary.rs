//! Vocabulary discovery over a stream of rows.
//!
//! [`VocabularyBuilder`] is the OPEN side of analysis: it accepts rows one at
//! a time, grows the categorical column set and assigns an internal index to
//! every newly seen `(column, value)` pair. [`VocabularyBuilder::finalize`]
//! consumes it and yields the frozen [`Vocabulary`].

use crate::value::{classify_row, Value};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, trace};

/// Per-column mapping from observed value to internal index, in first-seen order.
pub type Bucket = IndexMap<Value, usize>;

/// Mutable vocabulary state used while rows are being analyzed.
#[derive(Clone, Debug, Default)]
pub struct VocabularyBuilder {
    /// Row width fixed by the first non-empty row.
    number_of_original_features: Option<usize>,
    /// Runs one ahead of the true internal width until `finalize`.
    number_of_internal_features: usize,
    categorical: BTreeSet<usize>,
    categories: BTreeMap<usize, Bucket>,
    /// Original column of each expansion slot; slot `k` is internal index `width + k`.
    expansion_origin: Vec<usize>,
    /// Occurrence count of each expansion slot's `(column, value)` pair.
    occurrences: Vec<usize>,
    rows_seen: usize,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows passed to [`ingest`](Self::ingest) so far.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Schema width, once a non-empty row has been seen.
    pub fn number_of_original_features(&self) -> Option<usize> {
        self.number_of_original_features
    }

    /// Number of distinct `(column, value)` pairs discovered so far.
    pub fn number_of_feature_values(&self) -> usize {
        self.expansion_origin.len()
    }

    /// Analyze one row.
    ///
    /// Never fails: empty rows before the width is known are ignored, short
    /// rows contribute nothing for the missing positions, and positions past
    /// the schema width are out of schema.
    pub fn ingest(&mut self, row: &[Value]) {
        self.rows_seen += 1;

        let width = match self.number_of_original_features {
            Some(width) => width,
            None if row.is_empty() => return,
            None => {
                let width = row.len();
                self.number_of_original_features = Some(width);
                self.number_of_internal_features = width + 1;
                debug!(width, "detected row width");
                width
            }
        };

        if row.len() > width {
            debug!(
                row = self.rows_seen,
                len = row.len(),
                width,
                "ignoring values past the row width"
            );
        }
        let row = &row[..row.len().min(width)];

        self.categorical.extend(classify_row(row));

        for &column in &self.categorical {
            let value = match row.get(column) {
                Some(value) if !value.is_null() => value,
                _ => continue,
            };
            let bucket = self.categories.entry(column).or_default();
            if let Some(&internal) = bucket.get(value) {
                self.occurrences[internal - width] += 1;
                continue;
            }
            let internal = self.number_of_internal_features - 1;
            bucket.insert(value.clone(), internal);
            self.expansion_origin.push(column);
            self.occurrences.push(1);
            self.number_of_internal_features += 1;
            trace!(column, %value, internal, "new feature value");
        }
    }

    /// Freeze the tables.
    ///
    /// Applies the single corrective decrement to the internal counter. If no
    /// non-empty row was ever ingested every count stays zero.
    pub fn finalize(self) -> Vocabulary {
        let number_of_original_features = self.number_of_original_features.unwrap_or(0);
        let number_of_internal_features = if self.number_of_original_features.is_some() {
            self.number_of_internal_features - 1
        } else {
            0
        };

        let passthrough: Vec<usize> = (0..number_of_original_features)
            .filter(|i| !self.categorical.contains(i))
            .collect();

        let vocabulary = Vocabulary {
            number_of_original_features,
            number_of_internal_features,
            categories: self.categories,
            expansion_origin: self.expansion_origin,
            occurrences: self.occurrences,
            passthrough,
        };

        info!(
            rows = self.rows_seen,
            original = vocabulary.number_of_original_features(),
            categorical = vocabulary.number_of_categorical_features(),
            values = vocabulary.expansion_origin.len(),
            occurrences = vocabulary.occurrences.iter().sum::<usize>(),
            encoded = vocabulary.number_of_encoded_features(),
            "vocabulary frozen"
        );

        vocabulary
    }
}

/// Frozen vocabulary and coordinate tables.
///
/// Read-only once built. Index translation lives in
/// [`translator`](super::translator) and header generation in
/// [`header`](super::header).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
    pub(crate) number_of_original_features: usize,
    pub(crate) number_of_internal_features: usize,
    pub(crate) categories: BTreeMap<usize, Bucket>,
    pub(crate) expansion_origin: Vec<usize>,
    pub(crate) occurrences: Vec<usize>,
    /// Non-categorical original columns, ascending.
    pub(crate) passthrough: Vec<usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a complete sequence of rows.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Value]>,
    {
        let mut builder = VocabularyBuilder::new();
        for row in rows {
            builder.ingest(row.as_ref());
        }
        builder.finalize()
    }

    /// Row width observed at the first analyzed row.
    pub fn number_of_original_features(&self) -> usize {
        self.number_of_original_features
    }

    /// Width of the internal index space: original columns plus expansion slots.
    pub fn number_of_internal_features(&self) -> usize {
        self.number_of_internal_features
    }

    /// Width of every encoded row.
    pub fn number_of_encoded_features(&self) -> usize {
        self.number_of_internal_features - self.categories.len()
    }

    /// Number of numeric columns carried through unchanged.
    pub fn number_of_non_encoded_features(&self) -> usize {
        self.number_of_original_features - self.categories.len()
    }

    pub fn number_of_categorical_features(&self) -> usize {
        self.categories.len()
    }

    /// Categorical original columns, ascending.
    pub fn categorical_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.categories.keys().copied()
    }

    /// Non-categorical original columns, ascending.
    pub fn non_categorical_indexes(&self) -> &[usize] {
        &self.passthrough
    }

    /// Values observed in a categorical column, in discovery order.
    pub fn feature_values(&self, original_index: usize) -> Option<impl Iterator<Item = &Value>> {
        self.categories.get(&original_index).map(|bucket| bucket.keys())
    }

    /// How many analyzed rows held `value` in a categorical column.
    ///
    /// Rows seen before the column turned categorical are not counted.
    pub fn feature_count(&self, original_index: usize, value: &Value) -> Option<usize> {
        let internal = self.internal_index_from_original(original_index, value)?;
        self.occurrences
            .get(internal - self.number_of_original_features)
            .copied()
    }

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (usize, &Bucket)> {
        self.categories.iter().map(|(&column, bucket)| (column, bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn build(rows: &[Vec<Value>]) -> Vocabulary {
        Vocabulary::from_rows(rows)
    }

    #[test]
    fn test_counts_after_finalize() {
        let vocab = build(&[
            row![0, 1, 2, "a", 3],
            row![3, 4, 5, "b", 6],
            row![6, 7, 8, "c", 9],
        ]);

        assert_eq!(vocab.number_of_original_features(), 5);
        assert_eq!(vocab.number_of_internal_features(), 8);
        assert_eq!(vocab.number_of_encoded_features(), 7);
        assert_eq!(vocab.number_of_non_encoded_features(), 4);
        assert_eq!(vocab.non_categorical_indexes(), &[0, 1, 2, 4]);
    }

    #[test]
    fn test_internal_indexes_start_at_row_width() {
        let vocab = build(&[row![1, 2, 3, "a"], row![1, 2, 3, "b"], row![1, 2, 3, "a"]]);
        let bucket = &vocab.categories[&3];
        assert_eq!(bucket.get(&Value::from("a")), Some(&4));
        assert_eq!(bucket.get(&Value::from("b")), Some(&5));
        assert_eq!(vocab.expansion_origin, vec![3, 3]);
    }

    #[test]
    fn test_feature_counts() {
        let vocab = build(&[
            row![1, "a", true],
            row![2, "b", true],
            row![3, "a", false],
            row![4, "a", Value::Null],
        ]);
        assert_eq!(vocab.feature_count(1, &Value::from("a")), Some(3));
        assert_eq!(vocab.feature_count(1, &Value::from("b")), Some(1));
        assert_eq!(vocab.feature_count(2, &Value::from(true)), Some(2));
        assert_eq!(vocab.feature_count(2, &Value::from(false)), Some(1));
        assert_eq!(vocab.feature_count(1, &Value::from("z")), None);
        assert_eq!(vocab.feature_count(0, &Value::from(1)), None);
    }

    #[test]
    fn test_feature_counts_start_when_column_turns_categorical() {
        let vocab = build(&[row![1, 7], row![1, "x"], row![1, 7], row![1, 7]]);
        assert_eq!(vocab.feature_count(1, &Value::from(7)), Some(2));
        assert_eq!(vocab.feature_count(1, &Value::from("x")), Some(1));
    }

    #[test]
    fn test_categorical_flag_is_sticky() {
        // Column 1 turns categorical in row 2; later numeric values become vocabulary.
        let vocab = build(&[row![1, 2], row![1, "x"], row![1, 7]]);
        assert_eq!(vocab.categorical_indexes().collect::<Vec<_>>(), vec![1]);
        let values: Vec<_> = vocab.feature_values(1).unwrap().cloned().collect();
        assert_eq!(values, vec![Value::from("x"), Value::from(7)]);
    }

    #[test]
    fn test_same_value_in_two_columns_gets_two_slots() {
        let vocab = build(&[row!["c", 1, "c"]]);
        assert_eq!(vocab.categories[&0].get(&Value::from("c")), Some(&3));
        assert_eq!(vocab.categories[&2].get(&Value::from("c")), Some(&4));
        assert_eq!(vocab.number_of_encoded_features(), 3);
    }

    #[test]
    fn test_columns_visited_in_ascending_order_within_row() {
        let vocab = build(&[row!["p", "q"], row!["r", "s"]]);
        assert_eq!(vocab.expansion_origin, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let vocab = build(&[row![1, 2, "a"], row![1], row![1, 2, "b"]]);
        assert_eq!(vocab.number_of_original_features(), 3);
        assert_eq!(vocab.feature_values(2).unwrap().count(), 2);
    }

    #[test]
    fn test_values_past_row_width_are_ignored() {
        let vocab = build(&[row![1, "a"], row![1, "b", "extra"]]);
        assert_eq!(vocab.number_of_categorical_features(), 1);
        assert!(vocab.feature_values(2).is_none());
    }

    #[test]
    fn test_null_cells_add_nothing() {
        let vocab = build(&[row![Value::Null, "a"], row![1, Value::Null]]);
        assert_eq!(vocab.categorical_indexes().collect::<Vec<_>>(), vec![1]);
        assert_eq!(vocab.feature_values(1).unwrap().count(), 1);
    }

    #[test]
    fn test_leading_empty_rows_are_noops() {
        let mut builder = VocabularyBuilder::new();
        builder.ingest(&[]);
        assert_eq!(builder.number_of_original_features(), None);
        builder.ingest(&row![1, "a"]);
        assert_eq!(builder.number_of_original_features(), Some(2));
        assert_eq!(builder.rows_seen(), 2);
        assert_eq!(builder.number_of_feature_values(), 1);
        builder.ingest(&row![2, "a"]);
        assert_eq!(builder.number_of_feature_values(), 1);
        builder.ingest(&row![3, "b"]);
        assert_eq!(builder.number_of_feature_values(), 2);
        assert_eq!(builder.finalize().number_of_internal_features(), 4);
    }

    #[test]
    fn test_finalize_without_rows() {
        let vocab = VocabularyBuilder::new().finalize();
        assert_eq!(vocab.number_of_original_features(), 0);
        assert_eq!(vocab.number_of_internal_features(), 0);
        assert_eq!(vocab.number_of_encoded_features(), 0);
    }

    #[test]
    fn test_all_numeric_rows() {
        let vocab = build(&[row![1, 2, 3], row![4, 5, 6]]);
        assert_eq!(vocab.number_of_categorical_features(), 0);
        assert_eq!(vocab.number_of_encoded_features(), 3);
    }

    #[test]
    fn test_same_order_same_assignment() {
        let rows = vec![row!["b", 1, "y"], row!["a", 2, "x"], row!["b", 3, "z"]];
        assert_eq!(build(&rows), build(&rows));

        let mut reversed = rows.clone();
        reversed.reverse();
        assert_ne!(build(&rows), build(&reversed));
    }
}
