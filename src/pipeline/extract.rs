use crate::common::constants::{CARD_TAG, DATE_TAG, LINK_ATTR, LINK_TAG, LOCATION_TAG, TITLE_TAG};
use crate::common::types::RawMeeting;
use crate::config::Selectors;
use crate::parser::{Document, Node};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A card that lacked one of the elements a meeting needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("card {card_index}: missing {field} ({selector})")]
pub struct ExtractError {
    /// Zero-based position of the card in the document
    pub card_index: usize,
    pub field: &'static str,
    pub selector: String,
}

/// Outcome of scanning one page
#[derive(Debug, Default)]
pub struct Extraction {
    pub cards_found: usize,
    pub meetings: Vec<RawMeeting>,
    pub errors: Vec<ExtractError>,
}

/// Pull a `RawMeeting` out of every card on the page, in document order.
///
/// Cards with a missing part are reported in `errors` and left out of
/// `meetings`; whether that is fatal is the caller's decision.
pub fn extract_meetings(doc: &Document, selectors: &Selectors) -> Extraction {
    let cards = doc.select_all(CARD_TAG, Some(selectors.card.as_str()));
    info!(
        "Found {} card elements with selector '{}.{}'",
        cards.len(),
        CARD_TAG,
        selectors.card
    );

    let mut extraction = Extraction {
        cards_found: cards.len(),
        ..Default::default()
    };

    for (index, card) in cards.into_iter().enumerate() {
        match extract_card(card, index, selectors) {
            Ok(meeting) => {
                debug!(
                    "card {}: title={:?} date={:?} location={:?} href={:?}",
                    index, meeting.title, meeting.date, meeting.location, meeting.href
                );
                extraction.meetings.push(meeting);
            }
            Err(e) => {
                warn!("Skipping {}", e);
                extraction.errors.push(e);
            }
        }
    }

    extraction
}

/// Extract the four raw fields from one card element.
pub fn extract_card(
    card: Node<'_>,
    card_index: usize,
    selectors: &Selectors,
) -> Result<RawMeeting, ExtractError> {
    let missing = |field: &'static str, selector: String| ExtractError {
        card_index,
        field,
        selector,
    };

    let title = card
        .find_first(TITLE_TAG, None)
        .ok_or_else(|| missing("title", TITLE_TAG.to_string()))?
        .direct_text();

    let date = card
        .find_first(DATE_TAG, Some(selectors.date.as_str()))
        .ok_or_else(|| missing("date", format!("{}.{}", DATE_TAG, selectors.date)))?
        .direct_text();

    let location = card
        .find_first(LOCATION_TAG, Some(selectors.location.as_str()))
        .ok_or_else(|| missing("location", format!("{}.{}", LOCATION_TAG, selectors.location)))?
        .direct_text();

    let link_selector = format!("{}.{}", LINK_TAG, selectors.link);
    let href = card
        .find_first(LINK_TAG, Some(selectors.link.as_str()))
        .ok_or_else(|| missing("url", link_selector.clone()))?
        .attr(LINK_ATTR)
        .ok_or_else(|| missing("url", format!("{}[{}]", link_selector, LINK_ATTR)))?
        .to_string();

    Ok(RawMeeting {
        title,
        date,
        location,
        href,
    })
}
