use crate::domain::errors::SyncError;
use crate::domain::models::{InstallResult, Instant, VersionTable};
use crate::services::pages;
use crate::services::versions::classify;
use crate::site::Site;
use chrono::Utc;
use scraper::Html;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// What an item page tells us before anything is downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    pub display_name: String,
    pub archive_url: String,
    pub version: Option<String>,
    pub last_activity: Option<Instant>,
}

/// Fetches item archives and unpacks them into the local mirror.
pub struct Installer<'a> {
    site: &'a Site,
    root: &'a Path,
    versions: &'a VersionTable,
}

impl<'a> Installer<'a> {
    pub fn new(site: &'a Site, root: &'a Path, versions: &'a VersionTable) -> Self {
        Self {
            site,
            root,
            versions,
        }
    }

    /// Reads the item page; the version is only classified when asked for.
    pub fn read_item_page(&self, item_id: &str, classify_version: bool) -> Result<ItemPage, SyncError> {
        let html = self.site.fetch_text(&self.site.item_url(item_id))?;
        let doc = Html::parse_document(&html);

        let display_name = pages::display_name(&doc)?;
        let archive_url = self.site.resolve(&pages::archive_href(&doc)?);
        let version = if classify_version {
            classify(&doc, self.versions)?.map(|v| v.label.clone())
        } else {
            None
        };
        let last_activity = match pages::last_activity(&doc, Utc::now()) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("[{} - {}] {}", item_id, display_name, e);
                None
            }
        };

        Ok(ItemPage {
            display_name,
            archive_url,
            version,
            last_activity,
        })
    }

    /// Where an item goes: `target_override`, or `<root>/<version>` when the
    /// page was classified. Nothing is ever written to an unversioned root.
    pub fn target_dir(
        &self,
        item_id: &str,
        page: &ItemPage,
        target_override: Option<&Path>,
    ) -> Result<PathBuf, SyncError> {
        match (target_override, &page.version) {
            (Some(dir), _) => Ok(dir.to_path_buf()),
            (None, Some(label)) => Ok(self.root.join(label)),
            (None, None) => Err(SyncError::VersionNotFound {
                item_id: item_id.to_string(),
                display_name: page.display_name.clone(),
            }),
        }
    }

    /// Downloads the archive named by an already-read page into `target_dir`.
    pub fn install_page(
        &self,
        item_id: &str,
        page: ItemPage,
        target_dir: PathBuf,
    ) -> Result<InstallResult, SyncError> {
        let bytes = self.site.fetch_bytes(&page.archive_url)?;
        std::fs::create_dir_all(&target_dir)?;
        let extracted_files = extract_archive(&bytes, &target_dir, &page.display_name)?;
        tracing::info!(
            "[{} - {}] Downloaded and extracted to {}",
            item_id,
            page.display_name,
            target_dir.display()
        );

        Ok(InstallResult {
            item_id: item_id.to_string(),
            display_name: page.display_name,
            version: page.version,
            target_dir,
            extracted_files,
            last_activity: page.last_activity,
        })
    }

    /// Downloads item `item_id` and extracts it into `target_override`, or
    /// into `<root>/<version>` when the page can be classified.
    ///
    /// An unclassifiable page yields `SyncError::VersionNotFound` without
    /// downloading anything.
    pub fn install(
        &self,
        item_id: &str,
        target_override: Option<&Path>,
    ) -> Result<InstallResult, SyncError> {
        let page = self.read_item_page(item_id, target_override.is_none())?;
        let target_dir = self.target_dir(item_id, &page, target_override)?;
        self.install_page(item_id, page, target_dir)
    }
}

/// Unpacks a zip archive under `target`, overwriting existing files.
/// Returns the number of file members written.
pub fn extract_archive(bytes: &[u8], target: &Path, display_name: &str) -> Result<usize, SyncError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| SyncError::Extract(e.to_string()))?;

    let prefix = format!("{}/", display_name);
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    if !names.iter().any(|n| n.starts_with(&prefix)) {
        tracing::warn!(
            "archive for {} has no top-level '{}' directory; local lookups may miss it",
            display_name,
            prefix
        );
    }

    archive
        .extract(target)
        .map_err(|e| SyncError::Extract(e.to_string()))?;
    Ok(names.iter().filter(|n| !n.ends_with('/')).count())
}
