//! Reconciliation stage.

use super::exit_codes;
use crate::config::{BehaviorConfig, DiffConfig};
use crate::diff::ReconciliationResult;
use crate::model::RecordSet;

/// Reconcile two loaded record sets with the configured policy.
pub fn compute_diff(config: &DiffConfig, old: &RecordSet, new: &RecordSet) -> ReconciliationResult {
    let quiet = config.behavior.quiet;

    if !quiet {
        tracing::info!(
            "Reconciling {} old records against {} new records (duplicates: {})",
            old.len(),
            new.len(),
            config.reconciliation.duplicate_policy
        );
    }

    let result = config.reconciliation.reconciler().reconcile(old, new);

    for warning in &result.validation_warnings {
        tracing::warn!("{}", warning);
    }

    if !quiet {
        let stats = &result.statistics;
        tracing::info!(
            "Reconciliation complete: {} changes ({} added, {} removed, {} changed, {} unchanged)",
            stats.total_changes,
            stats.added_count,
            stats.removed_count,
            stats.changed_count,
            stats.unchanged_count
        );
    }

    result
}

/// Determine the exit code from the result and the fail-on flags.
///
/// Warnings take precedence over changes.
#[must_use]
pub fn determine_exit_code(behavior: &BehaviorConfig, result: &ReconciliationResult) -> i32 {
    if behavior.fail_on_warning && result.has_warnings() {
        return exit_codes::WARNINGS_PRESENT;
    }
    if behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::diff::DuplicatePolicy;
    use crate::model::ComponentRecord;
    use std::path::PathBuf;

    fn config(app: &AppConfig) -> DiffConfig {
        DiffConfig::from_app(
            DiffPaths {
                old: PathBuf::from("old.csv"),
                new: PathBuf::from("new.csv"),
            },
            app,
        )
    }

    fn sets() -> (RecordSet, RecordSet) {
        let old = RecordSet::from_records(
            "old.csv",
            vec![
                ComponentRecord::new("R1").with_part_number("A"),
                ComponentRecord::new("R1").with_part_number("B"),
            ],
        );
        let new = RecordSet::from_records("new.csv", vec![ComponentRecord::new("R1").with_part_number("A")]);
        (old, new)
    }

    #[test]
    fn test_policy_flows_from_config() {
        let (old, new) = sets();

        let last = compute_diff(&config(&AppConfig::default()), &old, &new);
        assert_eq!(last.statistics.changed_count, 1);

        let app = AppConfig::builder()
            .duplicate_policy(DuplicatePolicy::FirstWins)
            .quiet(true)
            .build();
        let first = compute_diff(&config(&app), &old, &new);
        assert_eq!(first.statistics.changed_count, 0);
        assert_eq!(first.statistics.unchanged_count, 1);
    }

    #[test]
    fn test_exit_codes() {
        let (old, new) = sets();
        let result = compute_diff(&config(&AppConfig::default()), &old, &new);
        assert!(result.has_warnings());
        assert!(result.has_changes());

        let none = BehaviorConfig::default();
        assert_eq!(determine_exit_code(&none, &result), exit_codes::SUCCESS);

        let on_change = BehaviorConfig {
            fail_on_change: true,
            ..BehaviorConfig::default()
        };
        assert_eq!(determine_exit_code(&on_change, &result), exit_codes::CHANGES_DETECTED);

        let both = BehaviorConfig {
            fail_on_change: true,
            fail_on_warning: true,
            quiet: false,
        };
        assert_eq!(determine_exit_code(&both, &result), exit_codes::WARNINGS_PRESENT);
    }

    #[test]
    fn test_clean_result_succeeds_with_all_flags() {
        let set = RecordSet::from_records("a", vec![ComponentRecord::new("U1")]);
        let result = compute_diff(&config(&AppConfig::default()), &set, &set);
        let behavior = BehaviorConfig {
            fail_on_change: true,
            fail_on_warning: true,
            quiet: true,
        };
        assert_eq!(determine_exit_code(&behavior, &result), exit_codes::SUCCESS);
    }
}
