//! Encodes price records as gzip-compressed InfluxDB line protocol.
//!
//! Each record becomes one line:
//!
//! ```text
//! pvpc_price price=127.65 1704063600
//! ```
//!
//! The timestamp is in Unix seconds, matching the `precision=s` used on upload.

use {
    crate::{error::ExporterError, pvpc::PriceRecord},
    chrono::DateTime,
    flate2::{write::GzEncoder, Compression},
    std::io::Write,
};

/// Measurement name every price line is written under.
pub const MEASUREMENT: &str = "pvpc_price";

/// A compressed batch ready for upload.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Number of lines in the batch.
    pub lines: usize,
    /// Gzip-compressed line protocol.
    pub compressed: Vec<u8>,
}

/// Formats a single record, newline included.
pub fn encode_line(record: &PriceRecord) -> Result<String, ExporterError> {
    let timestamp = DateTime::parse_from_rfc3339(&record.datetime).map_err(|source| {
        ExporterError::Timestamp {
            datetime: record.datetime.clone(),
            source,
        }
    })?;

    Ok(format!(
        "{MEASUREMENT} price={:.2} {}\n",
        record.value,
        timestamp.timestamp()
    ))
}

/// Concatenates the lines of every record, in order.
///
/// A single bad timestamp fails the whole batch. An empty batch is an error
/// too, there is nothing worth uploading.
pub fn encode_lines(records: &[PriceRecord]) -> Result<String, ExporterError> {
    let mut payload = String::new();

    for record in records {
        payload.push_str(&encode_line(record)?);
    }

    if payload.is_empty() {
        return Err(ExporterError::EmptyPayload);
    }

    Ok(payload)
}

/// Encodes and gzip-compresses `records`.
pub fn encode_batch(records: &[PriceRecord]) -> Result<Batch, ExporterError> {
    let payload = encode_lines(records)?;

    Ok(Batch {
        lines: records.len(),
        compressed: gzip(payload.as_bytes())?,
    })
}

fn gzip(payload: &[u8]) -> Result<Vec<u8>, ExporterError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload)?;

    Ok(encoder.finish()?)
}
