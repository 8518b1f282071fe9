//! Fetches one day of prices from the REE market-data API.

use {
    crate::{error::ExporterError, transport::Transport},
    chrono::NaiveDate,
    reqwest::{Method, Request, Url},
};

/// Client for the market-data endpoint.
pub struct PriceFetcher<'a, T> {
    transport: &'a T,
    base_url: String,
}

impl<'a, T: Transport> PriceFetcher<'a, T> {
    pub fn new(transport: &'a T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL covering the whole of `date`, truncated to hourly values.
    pub fn day_url(&self, date: NaiveDate) -> Result<Url, ExporterError> {
        let date = date.format("%Y-%m-%d");
        let url = format!(
            "{}?start_date={date}T00:00&end_date={date}T23:59&time_trunc=hour",
            self.base_url
        );

        Url::parse(&url).map_err(|source| ExporterError::InvalidUrl { url, source })
    }

    /// Returns the raw body of the day's price response.
    ///
    /// Any status in `[200, 400)` is accepted. Anything else becomes an
    /// [`ExporterError::Fetch`] carrying the status line and body.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<u8>, ExporterError> {
        let url = self.day_url(date)?;
        log::debug!("Fetching PVPC prices from {url}");

        let response = self.transport.execute(Request::new(Method::GET, url)).await?;
        let status = response.status();

        if !(200..400).contains(&status.as_u16()) {
            return Err(ExporterError::Fetch {
                status: status.to_string(),
                body: response.text().await?,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
