//! Wire models for the REE market-data response

use serde::Deserialize;

/// One price sample. `datetime` is kept exactly as the API sent it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRecord {
    pub value: f64,
    pub datetime: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesAttributes {
    #[serde(default)]
    pub values: Vec<PriceRecord>,
}

/// One price series, identified by `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBlock {
    pub id: String,
    #[serde(default)]
    pub attributes: SeriesAttributes,
}

/// Top-level response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub included: Vec<SeriesBlock>,
}
