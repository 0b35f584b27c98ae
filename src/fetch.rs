use std::time::Duration;

use anyhow::Context as _;
use url::Url;

/// Per-item fetch failure. Both variants are recoverable from the runner's
/// point of view: the comic keeps its zero sentinel and the batch moves on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure: bad URL, DNS, timeout, reset, non-2xx status.
    #[error("network: {0}")]
    Network(String),
    /// Bytes retrieved but not a decodable raster image, or the decoded
    /// image declares a zero dimension.
    #[error("decode: {0}")]
    Decode(String),
}

/// Retrieves an image URL and reads just enough of its header to obtain the
/// stored pixel dimensions. Stateless; clone freely across worker tasks.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("comicdims/0.1")
            .build()
            .context("build image fetch http client")?;
        Ok(Self { client })
    }

    /// No retry here: retry policy belongs to the caller.
    pub async fn fetch(&self, image_url: &str) -> Result<(u32, u32), FetchError> {
        let url = Url::parse(image_url)
            .map_err(|err| FetchError::Network(format!("parse url {image_url}: {err}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Network(format!("GET {image_url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "GET {image_url}: status {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Network(format!("read body {image_url}: {err}")))?;

        crate::dims::dimensions(&bytes).ok_or_else(|| {
            FetchError::Decode(format!(
                "{image_url}: {} bytes are not a known raster image",
                bytes.len()
            ))
        })
    }
}
