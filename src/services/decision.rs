use crate::domain::models::{CatalogEntry, LocalArtifact, SyncDecision};

/// Compares remote freshness against the stored chart. Equal instants count
/// as up to date.
pub fn decide(entry: &CatalogEntry, artifact: Option<&LocalArtifact>) -> SyncDecision {
    match artifact {
        None => SyncDecision::Missing,
        Some(a) if a.modified_at >= entry.remote_timestamp => SyncDecision::UpToDate,
        Some(_) => SyncDecision::Outdated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ChartFormat, Instant};
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::path::PathBuf;

    fn now() -> Instant {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn entry(remote: Instant) -> CatalogEntry {
        CatalogEntry {
            item_id: "100".to_string(),
            display_name: "FOO".to_string(),
            remote_timestamp: remote,
        }
    }

    fn artifact(modified: Instant) -> LocalArtifact {
        LocalArtifact {
            path: PathBuf::from("simfiles/DDR WORLD/FOO/FOO.sm"),
            modified_at: modified,
            format: ChartFormat::Sm,
        }
    }

    #[test]
    fn absent_artifact_is_missing() {
        assert_eq!(decide(&entry(now()), None), SyncDecision::Missing);
    }

    #[test]
    fn newer_or_equal_local_copy_is_up_to_date() {
        let remote = now() - TimeDelta::days(3);
        let newer = artifact(now() - TimeDelta::days(1));
        assert_eq!(decide(&entry(remote), Some(&newer)), SyncDecision::UpToDate);
        assert_eq!(
            decide(&entry(remote), Some(&artifact(remote))),
            SyncDecision::UpToDate
        );
    }

    #[test]
    fn older_local_copy_is_outdated() {
        let remote = now() - TimeDelta::days(3);
        let older = artifact(now() - TimeDelta::days(10));
        assert_eq!(decide(&entry(remote), Some(&older)), SyncDecision::Outdated);
    }

    #[test]
    fn older_remote_never_turns_up_to_date_into_outdated() {
        let local = artifact(now() - TimeDelta::days(5));
        let mut was_up_to_date = false;
        for days in 0..=20 {
            let remote = now() - TimeDelta::days(days);
            let decision = decide(&entry(remote), Some(&local));
            if was_up_to_date {
                assert_eq!(decision, SyncDecision::UpToDate, "remote {} days old", days);
            }
            was_up_to_date = decision == SyncDecision::UpToDate;
        }
        assert!(was_up_to_date);
    }
}
