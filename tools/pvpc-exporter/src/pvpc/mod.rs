//! Market-data side of the exporter: fetching and decoding REE price series.

pub const PVPC_API_URL: &str =
    "https://apidatos.ree.es/es/datos/mercados/precios-mercados-tiempo-real";

/// Series id of the hourly PVPC price inside the API's `included` array.
pub const PVPC_SERIES_ID: &str = "1001";

pub mod decoder;
pub mod fetcher;
pub mod models;

pub use {
    decoder::decode_series,
    fetcher::PriceFetcher,
    models::{ApiResponse, PriceRecord, SeriesAttributes, SeriesBlock},
};
