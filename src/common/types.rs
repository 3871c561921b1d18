/// Strings pulled out of one listing card, exactly as they appear in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeeting {
    pub title: String,
    pub date: String,
    pub location: String,
    /// Server-relative link target
    pub href: String,
}

/// One meeting, trimmed and with an absolute URL, ready for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    pub title: String,
    /// Free text as shown on the page; never parsed into a date type
    pub date: String,
    pub location: String,
    pub url: String,
}

impl MeetingRecord {
    /// Field values in `CSV_HEADER` order
    pub fn as_row(&self) -> [&str; 4] {
        [&self.title, &self.date, &self.location, &self.url]
    }
}
