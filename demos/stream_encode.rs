//! Analyze a stream of mixed rows through a bounded queue, then encode a
//! second stream and print it with its header.
//!
//! Run with `RUST_LOG=debug cargo run --example stream_encode` to see the
//! analyzer's progress.

use std::error::Error;
use std::thread;
use streaming_onehot::{feed, row, OneHotEncoder, Row};

fn weather_rows() -> Vec<Row> {
    vec![
        row![21.5, "sunny", 0.0, "north"],
        row![14.0, "rain", 12.5, "south"],
        row![17.2, "cloudy", 1.0, "north"],
        row![9.8, "rain", 20.1, "east"],
        row![25.0, "sunny", 0.0, "south"],
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (tx, rx) = feed::bounded(2);
    let producer = thread::spawn(move || -> Result<(), streaming_onehot::OneHotError> {
        for row in weather_rows() {
            tx.send(row)?;
        }
        Ok(())
    });

    let mut analyzer = OneHotEncoder::new().analyzer();
    feed::pump(rx, &mut analyzer)?;
    producer.join().map_err(|_| "producer panicked")??;
    let fitted = analyzer.into_fitted()?;

    let names = ["temp", "sky", "rain_mm", "wind"];
    let header: Vec<String> = fitted
        .columns_header(Some(&names[..]))
        .into_iter()
        .map(|label| label.unwrap_or_default())
        .collect();
    println!("{}", header.join(","));

    let incoming = vec![
        row![18.0, "cloudy", 3.2, "east"],
        row![11.0, "snow", 7.0, "north"],
        row![23.4, "sunny", 0.0, "south"],
    ];
    for (i, encoded) in fitted.encode_iter(&incoming).enumerate() {
        match encoded {
            Ok(values) => {
                let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                println!("{}", cells.join(","));
            }
            Err(err) => eprintln!("row {}: {}", i, err),
        }
    }

    Ok(())
}
