//! Library half of the `pvpc-exporter` binary.
//!
//! The pipeline is split into small stages that all share one [`Transport`]:
//!
//! 1. [`pvpc::PriceFetcher`] downloads a day of prices.
//! 2. [`pvpc::decode_series`] keeps the PVPC series.
//! 3. [`influxdb::encode_batch`] turns it into gzipped line protocol.
//! 4. [`influxdb::Uploader`] writes it to InfluxDB.
//!
//! [`Exporter`] wires the stages together.

pub mod config;
pub mod error;
mod exporter;
pub mod influxdb;
pub mod pvpc;
pub mod transport;

pub use {
    config::Config,
    error::{ConfigError, ExporterError, TransportError},
    exporter::{Exporter, RunSummary},
    transport::{RetryPolicy, RetryingTransport, Transport},
};
