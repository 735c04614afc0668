use crate::dataset::RowSource;
use crate::value::Row;
use std::convert::Infallible;
use std::ops::Range;

/// Rows held in memory, served in chunks.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRows {
    rows: Vec<Row>,
}

impl InMemoryRows {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl From<Vec<Row>> for InMemoryRows {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl RowSource for InMemoryRows {
    type Error = Infallible;

    fn len(&self) -> Option<usize> {
        Some(self.rows.len())
    }

    fn get_chunk(&self, range: Range<usize>) -> Result<Vec<Row>, Self::Error> {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        Ok(self.rows[start..end].to_vec())
    }
}
