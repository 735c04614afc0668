//! Core traits for fit/transform encoders.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has configuration and learns from data.
//! - [`FittedTransformer`]: After fitting; frozen and ready for inference.

use crate::error::OneHotError;

/// Trait for unfitted transformers.
///
/// A transformer learns its state from a pass over training rows and can then
/// transform new rows using that frozen state. This trait represents the
/// configurable, unfitted side.
///
/// # Example
/// ```
/// use streaming_onehot::{row, OneHotEncoder, Transformer, FittedTransformer};
///
/// let rows = vec![row![0, "a"], row![1, "b"]];
/// let fitted = OneHotEncoder::new().fit(&rows).unwrap();
/// let encoded = fitted.transform(&rows).unwrap();
/// assert_eq!(encoded.dim(), (2, 3));
/// ```
pub trait Transformer: Clone {
    /// Input data type for fitting and transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, OneHotError>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, OneHotError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `transform` never mutates the learned state.
/// - Every output row has exactly `n_features_out()` columns.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;

    /// Transform data using the learned state.
    ///
    /// # Errors
    /// Returns [`OneHotError`] if any row cannot be encoded.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, OneHotError>;

    /// Returns the number of features (row width) seen during fit.
    fn n_features_in(&self) -> usize;

    /// Returns the number of output features.
    fn n_features_out(&self) -> usize;
}
