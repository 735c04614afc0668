//! Coordinate translation between original, internal and encoded index spaces.
//!
//! - **original**: position in the input row.
//! - **internal**: original positions `0..width`, followed by one expansion slot
//!   per discovered `(column, value)` pair in discovery order.
//! - **encoded**: position in the output row. Categorical skeleton slots are
//!   dropped, numeric columns keep their rank among numeric columns, and
//!   expansion slots sit at `internal - number_of_categorical_features`.
//!
//! Every lookup returns `None` when the index or value is unknown.

use super::vocabulary::Vocabulary;
use crate::value::Value;

impl Vocabulary {
    /// Internal index assigned to `value` in column `original_index`.
    pub fn internal_index_from_original(&self, original_index: usize, value: &Value) -> Option<usize> {
        self.categories.get(&original_index)?.get(value).copied()
    }

    /// Original column an internal index was derived from.
    pub fn original_index_from_internal(&self, internal_index: usize) -> Option<usize> {
        let width = self.number_of_original_features;
        if internal_index < width {
            Some(internal_index)
        } else {
            self.expansion_origin.get(internal_index - width).copied()
        }
    }

    /// Encoded position of an internal index, `None` for categorical skeleton slots.
    pub fn encoded_index_from_internal(&self, internal_index: usize) -> Option<usize> {
        let width = self.number_of_original_features;
        if internal_index >= self.number_of_internal_features {
            None
        } else if internal_index >= width {
            Some(internal_index - self.categories.len())
        } else {
            self.passthrough.binary_search(&internal_index).ok()
        }
    }

    /// Internal index shown at an encoded position.
    pub fn internal_index_from_encoded(&self, encoded_index: usize) -> Option<usize> {
        if let Some(&original) = self.passthrough.get(encoded_index) {
            return Some(original);
        }
        let internal = encoded_index + self.categories.len();
        (internal < self.number_of_internal_features).then_some(internal)
    }

    /// Encoded position of the one-hot slot for `value` in column `original_index`.
    pub fn encoded_index_from_original(&self, original_index: usize, value: &Value) -> Option<usize> {
        self.internal_index_from_original(original_index, value)
            .and_then(|internal| self.encoded_index_from_internal(internal))
    }

    /// Encoded position of a non-categorical column.
    pub fn encoded_index_of_column(&self, original_index: usize) -> Option<usize> {
        self.passthrough.binary_search(&original_index).ok()
    }

    /// Original column feeding an encoded position.
    pub fn original_index_from_encoded(&self, encoded_index: usize) -> Option<usize> {
        self.internal_index_from_encoded(encoded_index)
            .and_then(|internal| self.original_index_from_internal(internal))
    }

    /// `true` iff the column has at least one vocabulary entry.
    pub fn is_original_index_categorical(&self, original_index: usize) -> bool {
        self.categories.contains_key(&original_index)
    }

    /// `true` iff the encoded position is a one-hot expansion slot.
    pub fn is_encoded_index_categorical(&self, encoded_index: usize) -> bool {
        self.original_index_from_encoded(encoded_index)
            .is_some_and(|original| self.is_original_index_categorical(original))
    }

    /// Feature value behind an encoded expansion slot.
    ///
    /// Scans the owning column's vocabulary, so this costs O(values in that
    /// column). Intended for one-off header generation, not per-row work.
    pub fn feature_value_from_encoded_index(&self, encoded_index: usize) -> Option<&Value> {
        let internal = self.internal_index_from_encoded(encoded_index)?;
        let original = self.original_index_from_internal(internal)?;
        self.categories
            .get(&original)?
            .iter()
            .find(|(_, slot)| **slot == internal)
            .map(|(value, _)| value)
    }
}
