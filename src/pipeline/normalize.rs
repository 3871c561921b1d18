use crate::common::types::{MeetingRecord, RawMeeting};

/// Join a server-relative link onto the host prefix with exactly one `/`
/// between them, so `/events/42` and `events/42` resolve the same way.
pub fn absolute_url(host_prefix: &str, href: &str) -> String {
    format!(
        "{}/{}",
        host_prefix.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Trim the text fields and make the link absolute. Internal whitespace is
/// kept as-is.
pub fn normalize(raw: RawMeeting, host_prefix: &str) -> MeetingRecord {
    MeetingRecord {
        title: raw.title.trim().to_string(),
        date: raw.date.trim().to_string(),
        location: raw.location.trim().to_string(),
        url: absolute_url(host_prefix, &raw.href),
    }
}
