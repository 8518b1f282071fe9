//! Writes compressed line protocol to the InfluxDB v2 write API.

use {
    crate::{config::Config, error::ExporterError, influxdb::Batch, transport::Transport},
    reqwest::{
        header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE},
        Method,
        Request,
        Url,
    },
};

/// Path of the v2 write endpoint, relative to the InfluxDB host.
const WRITE_PATH: &str = "/api/v2/write";

/// Posts batches to one bucket of one organization.
pub struct Uploader<'a, T> {
    transport: &'a T,
    config: &'a Config,
}

impl<'a, T: Transport> Uploader<'a, T> {
    pub fn new(transport: &'a T, config: &'a Config) -> Self {
        Self { transport, config }
    }

    /// `<host>/api/v2/write?precision=s&org=<org>&bucket=<bucket>`, with the
    /// org and bucket percent-encoded.
    pub fn write_url(&self) -> Result<Url, ExporterError> {
        let url = format!("{}{WRITE_PATH}", self.config.influxdb_base_url());
        let mut parsed =
            Url::parse(&url).map_err(|source| ExporterError::InvalidUrl { url, source })?;

        parsed
            .query_pairs_mut()
            .append_pair("precision", "s")
            .append_pair("org", &self.config.org)
            .append_pair("bucket", &self.config.bucket);

        Ok(parsed)
    }

    /// Sends `batch`. Only a 2xx status from the write itself counts as
    /// success.
    pub async fn upload(&self, batch: &Batch) -> Result<(), ExporterError> {
        let url = self.write_url()?;
        log::debug!("Uploading {} lines to {url}", batch.lines);

        let mut request = Request::new(Method::POST, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization()?);
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        *request.body_mut() = Some(batch.compressed.clone().into());

        let response = self.transport.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ExporterError::Upload {
                status: status.to_string(),
                body: response.text().await?,
            });
        }

        log::info!("InfluxDB accepted the write with {status}");

        Ok(())
    }

    fn authorization(&self) -> Result<HeaderValue, ExporterError> {
        let token = format!("Token {}", self.config.influxdb_api_token);
        let mut value = HeaderValue::from_str(&token).map_err(|_| ExporterError::InvalidToken)?;
        value.set_sensitive(true);

        Ok(value)
    }
}
