use crate::common::error::Result;

/// Fetch-side port: one blocking GET, body returned whole.
///
/// Implementations must turn transport failures and non-2xx statuses into
/// errors; callers never see a failed response as an empty page.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[derive(Clone, Debug)]
pub struct FetchedPage {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}
