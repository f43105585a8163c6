use crate::domain::errors::SyncError;
use crate::domain::models::{
    CatalogEntry, CatalogReport, ForceReport, InstallResult, ItemReport, SyncDecision, VersionLabel,
    VersionTable,
};
use crate::services::artifacts::resolve;
use crate::services::catalog::extract_entries;
use crate::services::decision::decide;
use crate::services::install::Installer;
use crate::site::Site;
use chrono::Utc;
use scraper::Html;
use std::path::Path;

fn item_report(entry: &CatalogEntry, decision: Option<SyncDecision>, status: &str) -> ItemReport {
    ItemReport {
        item_id: entry.item_id.clone(),
        display_name: entry.display_name.clone(),
        decision,
        status: status.to_string(),
        error: None,
    }
}

/// Brings one catalog entry up to date under `version_root`.
///
/// Failures stay inside the returned report so the caller can move on to the
/// next entry.
pub fn sync_entry(
    installer: &Installer<'_>,
    version_root: &Path,
    entry: &CatalogEntry,
    dry_run: bool,
) -> ItemReport {
    let tag = format!("[{} - {}]", entry.item_id, entry.display_name);

    let artifact = match resolve(version_root, &entry.display_name) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("{} Error inspecting local chart: {}", tag, e);
            let mut report = item_report(entry, None, "failed");
            report.error = Some(e.to_string());
            return report;
        }
    };

    if let Some(local) = &artifact {
        tracing::info!("{} Local chart last modified: {}", tag, local.modified_at);
        tracing::info!("{} Remote chart last updated: {}", tag, entry.remote_timestamp);
    }
    let decision = decide(entry, artifact.as_ref());
    match decision {
        SyncDecision::UpToDate => {
            tracing::info!("{} Local chart is up to date.", tag);
            return item_report(entry, Some(decision), "up_to_date");
        }
        SyncDecision::Outdated => {
            tracing::info!("{} Local chart is outdated. Downloading new zip...", tag)
        }
        SyncDecision::Missing => tracing::info!("{} No local chart found. Downloading zip...", tag),
    }

    if dry_run {
        return item_report(entry, Some(decision), "would_fetch");
    }

    match installer.install(&entry.item_id, Some(version_root)) {
        Ok(_) => item_report(entry, Some(decision), "installed"),
        Err(e) => {
            tracing::error!("{} Error downloading or extracting zip: {}", tag, e);
            let mut report = item_report(entry, Some(decision), "failed");
            report.error = Some(e.to_string());
            report
        }
    }
}

/// Runs one catalog pass for `version`. A listing that cannot be trusted
/// (fetch failure, rows without dates) fails the whole pass.
pub fn sync_version(
    site: &Site,
    root: &Path,
    versions: &VersionTable,
    version: &VersionLabel,
    dry_run: bool,
) -> Result<Vec<ItemReport>, SyncError> {
    let html = site.fetch_text(&site.category_url(version.category_id))?;
    let entries = extract_entries(&Html::parse_document(&html), Utc::now())?;
    tracing::info!("{}: {} simfiles listed", version.label, entries.len());

    let version_root = root.join(&version.label);
    let installer = Installer::new(site, root, versions);
    Ok(entries
        .iter()
        .map(|entry| sync_entry(&installer, &version_root, entry, dry_run))
        .collect())
}

/// Syncs every known version, or only those named in `only`.
pub fn sync_all(
    site: &Site,
    root: &Path,
    versions: &VersionTable,
    only: &[String],
    dry_run: bool,
) -> Vec<CatalogReport> {
    let mut reports = Vec::new();
    for version in versions.iter() {
        if !only.is_empty() && !only.contains(&version.label) {
            continue;
        }
        let report = match sync_version(site, root, versions, version, dry_run) {
            Ok(items) => CatalogReport {
                version: version.label.clone(),
                category_id: version.category_id,
                status: "ok".to_string(),
                error: None,
                items,
            },
            Err(e) => {
                tracing::error!("{}: catalog pass aborted: {}", version.label, e);
                CatalogReport {
                    version: version.label.clone(),
                    category_id: version.category_id,
                    status: "failed".to_string(),
                    error: Some(e.to_string()),
                    items: Vec::new(),
                }
            }
        };
        reports.push(report);
    }
    reports
}

fn force_one(
    installer: &Installer<'_>,
    item_id: &str,
    fallback: Option<&Path>,
) -> Result<InstallResult, SyncError> {
    let page = installer.read_item_page(item_id, true)?;
    let target_dir = match (installer.target_dir(item_id, &page, None), fallback) {
        (Ok(dir), _) => dir,
        (Err(SyncError::VersionNotFound { .. }), Some(dir)) => {
            tracing::warn!(
                "[{} - {}] Unknown version, installing into {}",
                item_id,
                page.display_name,
                dir.display()
            );
            dir.to_path_buf()
        }
        (Err(e @ SyncError::VersionNotFound { .. }), None) => {
            tracing::warn!(
                "[{} - {}] Unknown version; pass --into <DIR> to install it anyway",
                item_id,
                page.display_name
            );
            return Err(e);
        }
        (Err(e), _) => return Err(e),
    };
    installer.install_page(item_id, page, target_dir)
}

/// Installs the given items regardless of local freshness. Items whose
/// version cannot be classified go to `fallback` when one is supplied; each
/// item page is fetched once either way.
pub fn force_install(
    site: &Site,
    root: &Path,
    versions: &VersionTable,
    ids: &[String],
    fallback: Option<&Path>,
) -> Vec<ForceReport> {
    let installer = Installer::new(site, root, versions);
    let mut reports = Vec::new();
    for id in ids {
        let report = match force_one(&installer, id, fallback) {
            Ok(installed) => ForceReport {
                item_id: id.clone(),
                status: "installed".to_string(),
                installed: Some(installed),
                error: None,
            },
            Err(e) => {
                let status = match &e {
                    SyncError::VersionNotFound { .. } => "version_unknown",
                    _ => {
                        tracing::error!("[{}] Error installing simfile: {}", id, e);
                        "failed"
                    }
                };
                ForceReport {
                    item_id: id.clone(),
                    status: status.to_string(),
                    installed: None,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }
    reports
}
