//! Column labels for encoded rows.

use super::vocabulary::Vocabulary;

impl Vocabulary {
    /// Label every encoded column.
    ///
    /// Numeric columns come first and take their name from `original_names`
    /// at the original position, or `None` when no name is available. Each
    /// expansion slot is labelled `"<name>:<value>"` in discovery order, where
    /// `<name>` falls back to the original column index.
    ///
    /// ```
    /// use streaming_onehot::{row, Vocabulary};
    ///
    /// let vocab = Vocabulary::from_rows(&[row![1, 2, 3, "a", 4], row![1, 2, 3, "b", 4]]);
    /// let header = vocab.columns_header(Some(&["one", "two", "three", "char", "four"][..]));
    /// let header: Vec<_> = header.into_iter().map(Option::unwrap).collect();
    /// assert_eq!(header, ["one", "two", "three", "four", "char:a", "char:b"]);
    /// ```
    pub fn columns_header<S: AsRef<str>>(&self, original_names: Option<&[S]>) -> Vec<Option<String>> {
        let name_of = |original: usize| {
            original_names
                .and_then(|names| names.get(original))
                .map(|name| name.as_ref().to_string())
        };

        let mut header = Vec::with_capacity(self.number_of_encoded_features());
        header.extend(self.passthrough.iter().map(|&original| name_of(original)));

        for encoded in self.number_of_non_encoded_features()..self.number_of_encoded_features() {
            let label = self.original_index_from_encoded(encoded).and_then(|original| {
                let value = self.feature_value_from_encoded_index(encoded)?;
                let base = name_of(original).unwrap_or_else(|| original.to_string());
                Some(format!("{}:{}", base, value))
            });
            header.push(label);
        }
        header
    }
}
