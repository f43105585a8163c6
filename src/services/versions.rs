use crate::domain::errors::SyncError;
use crate::domain::models::{VersionLabel, VersionTable};
use crate::services::pages::breadcrumb;
use scraper::Html;

/// Picks the first configured label found in `text`.
pub fn match_label<'a>(text: &str, versions: &'a VersionTable) -> Option<&'a VersionLabel> {
    versions.iter().find(|v| text.contains(v.label.as_str()))
}

/// Classifies an item page by the category entry of its navigation trail
/// (the one just before the item name).
pub fn classify<'a>(
    doc: &Html,
    versions: &'a VersionTable,
) -> Result<Option<&'a VersionLabel>, SyncError> {
    let trail = breadcrumb(doc)?;
    if trail.len() < 2 {
        return Ok(None);
    }
    Ok(match_label(&trail[trail.len() - 2], versions))
}
