//! One end-to-end run: fetch a day of prices, encode them, upload them.

use {
    crate::{
        config::Config,
        error::ExporterError,
        influxdb::{encode_batch, Uploader},
        pvpc::{decode_series, PriceFetcher, PVPC_SERIES_ID},
        transport::Transport,
    },
    chrono::NaiveDate,
};

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub date: NaiveDate,
    /// Number of line-protocol lines uploaded.
    pub lines: usize,
    /// Size of the gzip payload in bytes.
    pub compressed_bytes: usize,
}

/// Owns the configuration and the transport shared by both HTTP calls.
pub struct Exporter<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> Exporter<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs the pipeline for `date`. The first failing stage aborts the run.
    pub async fn run(&self, date: NaiveDate) -> Result<RunSummary, ExporterError> {
        log::info!("Exporting PVPC prices for {date}");

        let body = PriceFetcher::new(&self.transport, &self.config.pvpc_api_url)
            .fetch_day(date)
            .await?;
        log::info!("Fetched {} bytes of market data", body.len());

        let records = decode_series(&body, PVPC_SERIES_ID)?;
        log::info!("Decoded {} price records", records.len());

        let batch = encode_batch(&records)?;
        log::info!(
            "Compressed {} lines into {} bytes",
            batch.lines,
            batch.compressed.len()
        );

        Uploader::new(&self.transport, &self.config)
            .upload(&batch)
            .await?;

        log::info!(
            "Uploaded {} lines to bucket '{}'",
            batch.lines,
            self.config.bucket
        );

        Ok(RunSummary {
            date,
            lines: batch.lines,
            compressed_bytes: batch.compressed.len(),
        })
    }
}
