use crate::app::ports::{FetchedPage, PageFetcher};
use crate::common::error::{Result, ScraperError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for ReqwestFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes()?.to_vec();
        debug!(
            "GET {} status={} bytes={} content_type={}",
            url,
            status.as_u16(),
            bytes.len(),
            content_type
        );

        Ok(FetchedPage {
            status: status.as_u16(),
            bytes,
            content_type,
        })
    }
}
