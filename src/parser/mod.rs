//! Thin query layer over `scraper`'s HTML tree.
//!
//! Lookups are by element name plus an optional class, which is all the
//! listing markup needs. Parsing is html5ever's, so malformed or truncated
//! markup still yields a tree.

use scraper::{ElementRef, Html};
use tracing::debug;

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw response bytes; invalid UTF-8 is replaced rather than rejected.
    pub fn parse(bytes: &[u8]) -> Self {
        let body = String::from_utf8_lossy(bytes);
        Self::parse_str(&body)
    }

    pub fn parse_str(body: &str) -> Self {
        debug!("Parsing HTML document bytes_len={}", body.len());
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Every element named `tag` (and carrying `class`, if given), in document order.
    pub fn select_all(&self, tag: &str, class: Option<&str>) -> Vec<Node<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches(el, tag, class))
            .map(Node)
            .collect()
    }
}

/// An element within a `Document`
#[derive(Clone, Copy, Debug)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// First descendant (not the node itself) named `tag`, optionally with `class`.
    pub fn find_first(&self, tag: &str, class: Option<&str>) -> Option<Node<'a>> {
        self.0
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| matches(el, tag, class))
            .map(Node)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Text nodes that are direct children of this element.
    ///
    /// Blank nodes are dropped and the rest are joined with a single space, so
    /// `March 3, 2024<br>6:00 PM` reads as `March 3, 2024 6:00 PM`. Falls back
    /// to the descendant text, joined the same way, when the element has no
    /// direct text of its own, e.g. `<h3><a href="..">Title</a></h3>`.
    pub fn direct_text(&self) -> String {
        let direct = join_segments(
            self.0
                .children()
                .filter_map(|child| child.value().as_text())
                .map(|text| &**text),
        );

        if direct.is_empty() {
            join_segments(self.0.text())
        } else {
            direct
        }
    }
}

/// Join non-blank text segments with one space; each segment keeps its own
/// whitespace.
fn join_segments<'t>(segments: impl Iterator<Item = &'t str>) -> String {
    segments
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn matches(el: &ElementRef<'_>, tag: &str, class: Option<&str>) -> bool {
    let element = el.value();
    element.name().eq_ignore_ascii_case(tag)
        && class.map_or(true, |wanted| element.classes().any(|c| c == wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="card first"><h3>One</h3><a class="go" href="/one">x</a></div>
          <div class="other"><h3>Skip</h3></div>
          <div class="card"><h3><a href="/two">Two</a></h3></div>
        </body></html>
    "#;

    #[test]
    fn test_select_all_filters_by_tag_and_class_in_document_order() {
        let doc = Document::parse_str(PAGE);
        let cards = doc.select_all("div", Some("card"));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].find_first("h3", None).unwrap().direct_text(), "One");
        assert_eq!(doc.select_all("div", None).len(), 3);
    }

    #[test]
    fn test_class_match_is_whole_token() {
        let doc = Document::parse_str(r#"<div class="cards">a</div><div class="my-card">b</div>"#);
        assert!(doc.select_all("div", Some("card")).is_empty());
    }

    #[test]
    fn test_find_first_excludes_the_node_itself() {
        let doc = Document::parse_str(r#"<div class="card"><div class="card">inner</div></div>"#);
        let outer = doc.select_all("div", Some("card"))[0];
        let inner = outer.find_first("div", Some("card")).unwrap();
        assert_eq!(inner.direct_text(), "inner");
        assert!(inner.find_first("div", None).is_none());
    }

    #[test]
    fn test_attr_reads_link_target() {
        let doc = Document::parse_str(PAGE);
        let card = doc.select_all("div", Some("card"))[0];
        let link = card.find_first("a", Some("go")).unwrap();
        assert_eq!(link.attr("href"), Some("/one"));
        assert_eq!(link.attr("title"), None);
    }

    #[test]
    fn test_direct_text_ignores_nested_elements_when_own_text_exists() {
        let doc = Document::parse_str(r#"<div class="d">  Mon <span>ignored</span> </div>"#);
        let d = doc.select_all("div", Some("d"))[0];
        assert_eq!(d.direct_text(), "  Mon ");
    }

    #[test]
    fn test_direct_text_separates_segments_split_by_inline_elements() {
        let doc = Document::parse_str(
            r#"<div class="d">March 3, 2024<br>6:00 PM</div>
               <div class="d">State Transportation Building<span></span>10 Park Plaza</div>
               <h3 class="d">Board<br>Meeting</h3>"#,
        );
        let dates = doc.select_all("div", Some("d"));
        assert_eq!(dates[0].direct_text(), "March 3, 2024 6:00 PM");
        assert_eq!(dates[1].direct_text(), "State Transportation Building 10 Park Plaza");
        let title = doc.select_all("h3", Some("d"))[0];
        assert_eq!(title.direct_text(), "Board Meeting");
    }

    #[test]
    fn test_descendant_fallback_separates_segments() {
        let doc = Document::parse_str(r#"<h3 class="t"><a href="/x">Board</a><a href="/y">Meeting</a></h3>"#);
        let title = doc.select_all("h3", Some("t"))[0];
        assert_eq!(title.direct_text(), "Board Meeting");
    }

    #[test]
    fn test_direct_text_falls_back_to_descendant_text() {
        let doc = Document::parse_str(PAGE);
        let second = doc.select_all("div", Some("card"))[1];
        assert_eq!(second.find_first("h3", None).unwrap().direct_text(), "Two");
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let doc = Document::parse(b"<div class=\"card\"><h3>Open <div class=\"card\">");
        assert_eq!(doc.select_all("div", Some("card")).len(), 2);
    }
}
