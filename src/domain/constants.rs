use crate::domain::models::VersionLabel;

pub const DEFAULT_SITE: &str = "https://zenius-i-vanisher.com/v5.2/";
pub const DEFAULT_ROOT: &str = "simfiles";
pub const DEFAULT_LOG_FILE: &str = "simsync.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Link text of the archive download on an item page.
pub const ARCHIVE_LINK_TEXT: &str = "ZIP";

/// Built-in version table, most specific label first.
pub fn default_versions() -> Vec<VersionLabel> {
    vec![
        VersionLabel::new("DDR WORLD", 1709),
        VersionLabel::new("DDR A3", 1611),
        VersionLabel::new("DDR A20 PLUS", 1509),
        VersionLabel::new("DDR A20", 1293),
        VersionLabel::new("DDR A", 1148),
    ]
}
