use crate::domain::errors::SyncError;
use crate::domain::models::{CatalogEntry, Instant};
use crate::services::pages::{element_text, link_text, selector};
use crate::services::timestamps::parse_timestamp_at;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;

fn anchor_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^sim(\d+)$").expect("static pattern"))
}

fn item_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^viewsimfile\.php\?simfileid=(\d+)").expect("static pattern"))
}

/// Numeric id carried by an item link, preferring the link target over the
/// anchor id.
fn item_id(anchor: ElementRef<'_>) -> Option<String> {
    let el = anchor.value();
    let id_digits = el
        .id()
        .and_then(|id| anchor_id_re().captures(id))
        .map(|c| c[1].to_string())?;
    let href_digits = el
        .attr("href")
        .and_then(|href| item_href_re().captures(href))
        .map(|c| c[1].to_string());
    Some(href_digits.unwrap_or(id_digits))
}

fn enclosing_row(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tr")
}

/// Extracts one entry per item row of a category listing, in page order.
///
/// The freshness of a row is the first cell (left to right) that reads as a
/// timestamp. A row without one means the listing layout changed, so the
/// whole listing is rejected rather than reporting the item as current.
pub fn extract_entries(doc: &Html, now: Instant) -> Result<Vec<CatalogEntry>, SyncError> {
    let anchors = selector("a[id]")?;
    let cells = selector("td")?;

    let mut entries = Vec::new();
    for anchor in doc.select(&anchors) {
        let Some(item_id) = item_id(anchor) else {
            continue;
        };
        let display_name = link_text(anchor);
        let integrity = || SyncError::DataIntegrity {
            item_id: item_id.clone(),
            display_name: display_name.clone(),
        };

        let row = enclosing_row(anchor).ok_or_else(integrity)?;
        let remote_timestamp = row
            .select(&cells)
            .find_map(|cell| parse_timestamp_at(&element_text(cell), now))
            .ok_or_else(integrity)?;

        entries.push(CatalogEntry {
            item_id,
            display_name,
            remote_timestamp,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn now() -> Instant {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn listing(rows: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><a href=\"index.php\">Home</a><table>{}</table></body></html>",
            rows
        ))
    }

    #[test]
    fn extracts_rows_in_document_order() {
        let doc = listing(
            r#"
            <tr><td><a id="sim200" href="viewsimfile.php?simfileid=200">  BAR  </a></td>
                <td>Artist</td><td>2 weeks ago</td></tr>
            <tr><td><a id="sim100" href="viewsimfile.php?simfileid=100">FOO</a></td>
                <td>3 days ago</td><td>1 day ago</td></tr>
            "#,
        );
        let entries = extract_entries(&doc, now()).expect("extracts");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item_id, "200");
        assert_eq!(entries[0].display_name, "BAR");
        assert_eq!(entries[0].remote_timestamp, now() - TimeDelta::days(14));
        assert_eq!(entries[1].item_id, "100");
        assert_eq!(entries[1].remote_timestamp, now() - TimeDelta::days(3));
    }

    #[test]
    fn ignores_links_without_item_anchor_id() {
        let doc = listing(
            r#"
            <tr><td><a id="nav" href="viewsimfile.php?simfileid=5">Sidebar</a></td></tr>
            <tr><td><a href="viewsimfile.php?simfileid=6">Plain</a></td></tr>
            "#,
        );
        assert!(extract_entries(&doc, now()).expect("extracts").is_empty());
    }

    #[test]
    fn marked_up_name_is_not_padded_with_spaces() {
        let doc = listing(
            r#"<tr><td><a id="sim1" href="viewsimfile.php?simfileid=1">FOO<sup>2</sup></a></td>
                <td>2 days ago</td></tr>"#,
        );
        let entries = extract_entries(&doc, now()).expect("extracts");
        assert_eq!(entries[0].display_name, "FOO2");
    }

    #[test]
    fn falls_back_to_anchor_id_digits() {
        let doc = listing(
            r#"<tr><td><a id="sim42" href="simfile/42">BAZ</a></td><td>1 hour ago</td></tr>"#,
        );
        let entries = extract_entries(&doc, now()).expect("extracts");
        assert_eq!(entries[0].item_id, "42");
    }

    #[test]
    fn accepts_absolute_timestamps_in_cells() {
        let doc = listing(
            r#"<tr><td><a id="sim7" href="viewsimfile.php?simfileid=7">QUX</a></td>
                <td>(2024-05-01 9:30AM)</td></tr>"#,
        );
        let entries = extract_entries(&doc, now()).expect("extracts");
        assert!(entries[0].remote_timestamp < now());
    }

    #[test]
    fn row_without_timestamp_is_a_data_integrity_error() {
        let doc = listing(
            r#"
            <tr><td><a id="sim1" href="viewsimfile.php?simfileid=1">OK</a></td><td>1 day ago</td></tr>
            <tr><td><a id="sim2" href="viewsimfile.php?simfileid=2">BROKEN</a></td><td>n/a</td></tr>
            "#,
        );
        match extract_entries(&doc, now()) {
            Err(SyncError::DataIntegrity {
                item_id,
                display_name,
            }) => {
                assert_eq!(item_id, "2");
                assert_eq!(display_name, "BROKEN");
            }
            other => panic!("expected data integrity error, got {:?}", other),
        }
    }
}
