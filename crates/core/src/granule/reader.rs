//! HTTP centerpoint reader backend.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::netcdf;
use super::{CenterPoint, CenterPointReader, GranuleError};

/// Default number of leading bytes fetched per granule. The netCDF header
/// must fit inside this window.
pub const DEFAULT_HEADER_READ_BYTES: usize = 64 * 1024;

/// Reads granule centerpoints by fetching the head of the file over HTTP
/// and parsing the netCDF header.
pub struct HttpGranuleReader {
    client: Client,
    header_read_bytes: usize,
}

impl HttpGranuleReader {
    /// Create a reader fetching `header_read_bytes` leading bytes per file.
    pub fn new(header_read_bytes: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            header_read_bytes,
        }
    }

    /// Create a reader with the default header window.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_HEADER_READ_BYTES)
    }
}

impl Default for HttpGranuleReader {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl CenterPointReader for HttpGranuleReader {
    fn name(&self) -> &str {
        "http-netcdf"
    }

    async fn center_point(&self, url: &str) -> Result<CenterPoint, GranuleError> {
        debug!(url = url, "Fetching granule header");

        // Servers that ignore Range return the whole file; the parser stops
        // at the end of the header either way.
        let range = format!("bytes=0-{}", self.header_read_bytes.saturating_sub(1));

        let response = self
            .client
            .get(url)
            .header(reqwest::header::RANGE, range)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GranuleError::Timeout
                } else if e.is_connect() {
                    GranuleError::ConnectionFailed(e.to_string())
                } else {
                    GranuleError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GranuleError::Http(format!(
                "HTTP {} fetching {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GranuleError::Http(e.to_string()))?;

        netcdf::extract_center_point(&bytes)
    }
}
