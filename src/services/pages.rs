//! Read-only queries over parsed site pages.

use crate::domain::constants::ARCHIVE_LINK_TEXT;
use crate::domain::errors::SyncError;
use crate::domain::models::Instant;
use crate::services::timestamps::parse_absolute_at;
use scraper::{ElementRef, Html, Selector};

pub fn selector(css: &str) -> Result<Selector, SyncError> {
    Selector::parse(css).map_err(|e| SyncError::Parse(format!("selector {}: {}", css, e)))
}

/// Element text with each text node trimmed and joined by single spaces.
/// Suited to table cells, not to names.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible text of a link: text nodes concatenated as-is, outer whitespace
/// trimmed. Item names must match archive directories byte for byte.
pub fn link_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Link texts of the `#top-nav` navigation trail, in page order.
pub fn breadcrumb(doc: &Html) -> Result<Vec<String>, SyncError> {
    let links = selector("div#top-nav a")?;
    Ok(doc.select(&links).map(link_text).collect())
}

/// The item name is the last entry of the navigation trail.
pub fn display_name(doc: &Html) -> Result<String, SyncError> {
    breadcrumb(doc)?
        .pop()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SyncError::Parse("couldn't find simfile name in the page".to_string()))
}

/// Raw href of the archive download link.
pub fn archive_href(doc: &Html) -> Result<String, SyncError> {
    let links = selector("a[href]")?;
    doc.select(&links)
        .find(|a| element_text(*a) == ARCHIVE_LINK_TEXT)
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
        .ok_or_else(|| SyncError::Parse("couldn't find zip download link".to_string()))
}

/// Absolute timestamp of the "Last Activity" row, if the page has one.
pub fn last_activity(doc: &Html, now: Instant) -> Result<Option<Instant>, SyncError> {
    let rows = selector("tr")?;
    let cells = selector("th, td")?;
    for row in doc.select(&rows) {
        let texts: Vec<String> = row.select(&cells).map(element_text).collect();
        let Some(pos) = texts.iter().position(|t| t.starts_with("Last Activity")) else {
            continue;
        };
        return match texts.get(pos + 1) {
            Some(value) => parse_absolute_at(value, now).map(Some),
            None => Err(SyncError::Parse("empty Last Activity row".to_string())),
        };
    }
    Ok(None)
}
