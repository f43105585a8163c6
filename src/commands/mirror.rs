use crate::cli::Cli;
use crate::domain::models::{CatalogReport, ForceReport, Settings};
use crate::services::output::{print_nested, print_out};
use crate::services::sync::{force_install, sync_all};
use crate::site::Site;

pub fn handle_mirror_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    if cli.list_versions {
        let versions: Vec<_> = settings.versions.iter().cloned().collect();
        return print_out(cli.json, &versions, |v| {
            format!("{}\t{}", v.category_id, v.label)
        });
    }

    for label in &cli.only {
        if settings.versions.get(label).is_none() {
            anyhow::bail!("unknown version: {}", label);
        }
    }

    let site = Site::open(&settings.site, settings.timeout_secs)?;
    tracing::debug!(
        "site {} with {} known versions",
        settings.site,
        settings.versions.len()
    );
    if cli.ids.is_empty() {
        if settings.versions.is_empty() {
            anyhow::bail!("no versions configured; nothing to sync");
        }
        run_sync(cli, settings, &site)
    } else {
        run_force(cli, settings, &site)
    }
}

fn run_sync(cli: &Cli, settings: &Settings, site: &Site) -> anyhow::Result<()> {
    let reports = sync_all(
        site,
        &settings.root,
        &settings.versions,
        &cli.only,
        cli.dry_run,
    );
    print_nested(cli.json, &reports, catalog_rows)?;

    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| r.status != "ok")
        .map(|r| r.version.as_str())
        .collect();
    if !failed.is_empty() {
        anyhow::bail!("catalog sync failed for: {}", failed.join(", "));
    }
    Ok(())
}

fn run_force(cli: &Cli, settings: &Settings, site: &Site) -> anyhow::Result<()> {
    let reports = force_install(
        site,
        &settings.root,
        &settings.versions,
        &cli.ids,
        cli.into.as_deref(),
    );
    print_out(cli.json, &reports, force_row)?;

    let failed = reports.iter().filter(|r| r.status != "installed").count();
    if failed > 0 {
        anyhow::bail!("{} of {} simfiles were not installed", failed, reports.len());
    }
    Ok(())
}

fn catalog_rows(report: &CatalogReport) -> Vec<String> {
    let mut rows = vec![format!("{}\t{}", report.version, report.status)];
    if let Some(error) = &report.error {
        rows.push(format!("\terror\t{}", error));
    }
    for item in &report.items {
        rows.push(format!("\t{}\t{}\t{}", item.item_id, item.display_name, item.status));
    }
    rows
}

fn force_row(report: &ForceReport) -> String {
    match &report.installed {
        Some(i) => format!(
            "{}\t{}\t{}\t{}",
            report.item_id,
            i.display_name,
            report.status,
            i.target_dir.display()
        ),
        None => format!(
            "{}\t{}\t{}",
            report.item_id,
            report.status,
            report.error.as_deref().unwrap_or_default()
        ),
    }
}
