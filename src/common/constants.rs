/// Defaults for the MBTA public meetings listing.
/// Every value here can be overridden through `Config`.

// Source page and the host its server-relative links resolve against
pub const DEFAULT_PAGE_URL: &str = "https://www.mbta.com/about/event-list?preview=&vid=latest&nid=5847";
pub const DEFAULT_HOST_PREFIX: &str = "http://www.mbta.com/";

pub const DEFAULT_OUTPUT_PATH: &str = "mbta_meetings.csv";
pub const DEFAULT_CONFIG_FILE: &str = "mbta_scraper.toml";

pub const DEFAULT_USER_AGENT: &str = concat!("mbta_scraper/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Marker classes on the event-list markup
pub const CARD_CLASS: &str = "u-linked-card";
pub const DATE_CLASS: &str = "c-content-teaser__date";
pub const LOCATION_CLASS: &str = "c-content-teaser__location";
pub const LINK_CLASS: &str = "u-linked-card__primary-link";

// Element names the selectors above are paired with
pub const CARD_TAG: &str = "div";
pub const TITLE_TAG: &str = "h3";
pub const DATE_TAG: &str = "div";
pub const LOCATION_TAG: &str = "div";
pub const LINK_TAG: &str = "a";
pub const LINK_ATTR: &str = "href";

/// Column order of the CSV output
pub const CSV_HEADER: [&str; 4] = ["title", "date", "location", "url"];

// Environment overrides (read after `.env` is loaded)
pub const ENV_PAGE_URL: &str = "MBTA_PAGE_URL";
pub const ENV_HOST_PREFIX: &str = "MBTA_HOST_PREFIX";
pub const ENV_OUTPUT_PATH: &str = "MBTA_OUTPUT_PATH";
