//! InfluxDB side of the exporter: line-protocol encoding and the v2 write API.

pub mod line_protocol;
pub mod uploader;

pub use {
    line_protocol::{encode_batch, encode_line, Batch, MEASUREMENT},
    uploader::Uploader,
};
