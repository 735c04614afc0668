//! Driving rows into an analysis pass.
//!
//! The core operations are synchronous. Flow control and end-of-input live
//! here: a [`RowSink`] accepts rows one at a time and is closed exactly once,
//! [`pump`] and [`pump_chunks`] drive iterators and chunked sources into a
//! sink, and [`bounded`] builds a producer/consumer pair whose senders block
//! when the queue is full.
//!
//! ```
//! use std::thread;
//! use streaming_onehot::{feed, row, OneHotEncoder};
//!
//! let (tx, rx) = feed::bounded(4);
//! let producer = thread::spawn(move || {
//!     for i in 0..10 {
//!         tx.send(row![i, if i % 2 == 0 { "even" } else { "odd" }]).unwrap();
//!     }
//! });
//!
//! let mut analyzer = OneHotEncoder::new().analyzer();
//! feed::pump(rx, &mut analyzer).unwrap();
//! producer.join().unwrap();
//!
//! let fitted = analyzer.into_fitted().unwrap();
//! assert_eq!(fitted.number_of_encoded_features(), 3);
//! ```

use crate::dataset::RowSource;
use crate::encoding::Analyzer;
use crate::error::OneHotError;
use crate::value::{Row, Value};
use crossbeam::channel::{self, Receiver, Sender};
use tracing::debug;

/// Per-row consumer with a single end-of-input signal.
pub trait RowSink {
    /// Accept the next row. Each call completes before the next begins.
    fn accept(&mut self, row: &[Value]) -> Result<(), OneHotError>;

    /// Signal end of input.
    fn close(&mut self) -> Result<(), OneHotError>;
}

impl RowSink for Analyzer {
    fn accept(&mut self, row: &[Value]) -> Result<(), OneHotError> {
        self.ingest(row)
    }

    fn close(&mut self) -> Result<(), OneHotError> {
        Analyzer::close(self)
    }
}

/// Feed every row into `sink`, then close it. Returns the number of rows fed.
pub fn pump<I, S>(rows: I, sink: &mut S) -> Result<usize, OneHotError>
where
    I: IntoIterator,
    I::Item: AsRef<[Value]>,
    S: RowSink + ?Sized,
{
    let mut count = 0;
    for row in rows {
        sink.accept(row.as_ref())?;
        count += 1;
    }
    sink.close()?;
    debug!(rows = count, "end of input");
    Ok(count)
}

/// Feed a chunked source into `sink`, then close it.
///
/// Sources of unknown length are read until they run dry. A source error
/// aborts the pass without closing the sink.
pub fn pump_chunks<D, S>(source: &D, chunk_size: usize, sink: &mut S) -> Result<usize, OneHotError>
where
    D: RowSource,
    S: RowSink + ?Sized,
{
    let mut count = 0;
    for chunk in source.chunks(chunk_size) {
        let chunk = chunk.map_err(|e| OneHotError::Source(Box::new(e)))?;
        for row in &chunk {
            sink.accept(row)?;
        }
        count += chunk.len();
    }
    sink.close()?;
    debug!(rows = count, "end of input");
    Ok(count)
}

/// Create a bounded row queue holding at most `capacity` rows.
///
/// Dropping every [`RowSender`] is the end-of-input signal.
pub fn bounded(capacity: usize) -> (RowSender, RowReceiver) {
    let (tx, rx) = channel::bounded(capacity);
    (RowSender { tx }, RowReceiver { rx })
}

/// Producing end of a row queue.
///
/// Clone it to serialize several producers through one queue.
#[derive(Clone, Debug)]
pub struct RowSender {
    tx: Sender<Row>,
}

impl RowSender {
    /// Send a row, blocking while the queue is full.
    ///
    /// # Errors
    /// [`OneHotError::FeedClosed`] if the receiver has been dropped.
    pub fn send(&self, row: Row) -> Result<(), OneHotError> {
        self.tx.send(row).map_err(|_| OneHotError::FeedClosed)
    }
}

/// Consuming end of a row queue. Iterates until every sender is dropped.
#[derive(Clone, Debug)]
pub struct RowReceiver {
    rx: Receiver<Row>,
}

impl Iterator for RowReceiver {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InMemoryRows;
    use crate::encoding::OneHotEncoder;
    use crate::row;
    use std::convert::Infallible;
    use std::ops::Range;
    use std::thread;

    #[derive(Default)]
    struct Recorder {
        rows: Vec<Row>,
        closed: usize,
    }

    impl RowSink for Recorder {
        fn accept(&mut self, row: &[Value]) -> Result<(), OneHotError> {
            self.rows.push(row.to_vec());
            Ok(())
        }

        fn close(&mut self) -> Result<(), OneHotError> {
            self.closed += 1;
            Ok(())
        }
    }

    #[test]
    fn test_pump_feeds_in_order_and_closes_once() {
        let rows = vec![row![1, "a"], row![2, "b"]];
        let mut sink = Recorder::default();
        assert_eq!(pump(&rows, &mut sink).unwrap(), 2);
        assert_eq!(sink.rows, rows);
        assert_eq!(sink.closed, 1);
    }

    #[test]
    fn test_pump_into_closed_analyzer_fails() {
        let mut analyzer = OneHotEncoder::new().analyzer();
        pump(vec![row![1, "a"]], &mut analyzer).unwrap();
        let err = pump(vec![row![2, "b"]], &mut analyzer).unwrap_err();
        assert!(matches!(err, OneHotError::UsageFault(_)));
    }

    #[test]
    fn test_pump_chunks_matches_pump() {
        let rows = vec![row![1, "a", 0], row![2, "b", "x"], row![3, "a", "y"], row![4, "c", 1]];

        let mut whole = OneHotEncoder::new().analyzer();
        pump(&rows, &mut whole).unwrap();

        let source = InMemoryRows::new(rows.clone());
        let mut chunked = OneHotEncoder::new().analyzer();
        assert_eq!(pump_chunks(&source, 3, &mut chunked).unwrap(), 4);

        assert_eq!(whole.vocabulary().unwrap(), chunked.vocabulary().unwrap());
    }

    struct Tail {
        source: InMemoryRows,
    }

    impl RowSource for Tail {
        type Error = Infallible;

        fn len(&self) -> Option<usize> {
            None
        }

        fn get_chunk(&self, range: Range<usize>) -> Result<Vec<Row>, Self::Error> {
            let rows = self.source.rows();
            let end = range.end.min(rows.len());
            Ok(rows[range.start.min(end)..end].to_vec())
        }
    }

    #[test]
    fn test_pump_chunks_unknown_length() {
        let rows = vec![row![1, "a"], row![2, "b"], row![3, "a"]];
        let tail = Tail { source: InMemoryRows::from(rows.clone()) };
        assert_eq!(tail.source.rows(), rows.as_slice());

        let mut analyzer = OneHotEncoder::new().analyzer();
        assert_eq!(pump_chunks(&tail, 1, &mut analyzer).unwrap(), 3);
        let fitted = analyzer.into_fitted().unwrap();

        assert_eq!(fitted.number_of_encoded_features(), 3);
        assert_eq!(fitted.encode(&rows[0]).unwrap(), vec![1.0, 1.0, 0.0]);
        assert_eq!(fitted.vocabulary(), OneHotEncoder::new().fit_rows(&rows).vocabulary());
    }

    #[test]
    fn test_channel_end_of_input() {
        let (tx, rx) = bounded(1);
        let producer = thread::spawn(move || {
            for i in 0..5 {
                tx.send(row![i]).unwrap();
            }
        });
        let received: Vec<_> = rx.collect();
        producer.join().unwrap();
        assert_eq!(received.len(), 5);
        assert_eq!(received[4], row![4]);
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = bounded(1);
        drop(rx);
        assert!(matches!(tx.send(row![1]), Err(OneHotError::FeedClosed)));
    }
}
