//! Administrative command layer.
//!
//! Maps admin operations onto policy and message mutations and reports each
//! outcome as user-facing text, with distinct wording for no-ops.
//! Authorization is checked by the hosting environment before any of these
//! run.

use anyhow::{Context, Result};
use wayconf::ConfigFile;

use crate::messages::{self, MessageKey};
use crate::policy::{AddOutcome, RemoveOutcome, ZonePolicy};

pub fn add_exclusion(policy: &mut ZonePolicy, zone: &str) -> Result<String> {
    match policy.add(zone)? {
        AddOutcome::Added => Ok(format!("Zone '{}' added to the exclusion list.", zone)),
        AddOutcome::AlreadyPresent => Ok(format!(
            "Zone '{}' is already on the exclusion list.",
            zone
        )),
    }
}

pub fn remove_exclusion(policy: &mut ZonePolicy, zone: &str) -> Result<String> {
    match policy.remove(zone)? {
        RemoveOutcome::Removed => Ok(format!("Zone '{}' removed from the exclusion list.", zone)),
        RemoveOutcome::NotPresent => Ok(format!("Zone '{}' is not on the exclusion list.", zone)),
    }
}

pub fn list_exclusions(policy: &ZonePolicy) -> String {
    let zones = policy.list();
    if zones.is_empty() {
        return "No zones are excluded.".to_string();
    }

    let mut report = String::from("Excluded zones:");
    for zone in zones {
        report.push_str("\n- ");
        report.push_str(zone);
    }
    report
}

/// Replace one notification template and persist.
///
/// An unknown key is reported back with the valid key list rather than
/// treated as a fault; only a config write failure is an error.
pub fn set_message(file: &mut ConfigFile, key: &str, text: &str) -> Result<String> {
    let Ok(key) = key.parse::<MessageKey>() else {
        return Ok(format!(
            "Unknown message key '{}'. Valid keys: {}.",
            key,
            valid_keys().join(", ")
        ));
    };

    messages::set(&mut file.config.messages, key, text);
    file.save()
        .with_context(|| format!("persisting message template to {}", file.path().display()))?;
    Ok(format!("Message '{}' updated.", key))
}

fn valid_keys() -> Vec<&'static str> {
    MessageKey::ALL.iter().map(MessageKey::as_str).collect()
}

/// Completion candidates for `exclude <zone>`: zones the host knows about,
/// minus nothing (re-adding is a harmless no-op).
pub fn suggest_add(known_zones: &[String], prefix: &str) -> Vec<String> {
    partial_matches(known_zones.iter().map(String::as_str), prefix)
}

/// Completion candidates for `include <zone>`: only zones currently on the
/// exclusion list.
pub fn suggest_remove(policy: &ZonePolicy, prefix: &str) -> Vec<String> {
    partial_matches(policy.list().iter().map(String::as_str), prefix)
}

/// Completion candidates for `set-message <key>`.
pub fn suggest_message_keys(prefix: &str) -> Vec<String> {
    partial_matches(valid_keys().into_iter(), prefix)
}

fn partial_matches<'a>(candidates: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    candidates
        .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file() -> (tempfile::TempDir, ConfigFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::open(dir.path().join("config.toml")).unwrap();
        (dir, file)
    }

    #[test]
    fn test_add_reports_distinct_outcomes() {
        let (_dir, file) = temp_file();
        let mut policy = ZonePolicy::new(file);

        assert_eq!(
            add_exclusion(&mut policy, "void").unwrap(),
            "Zone 'void' added to the exclusion list."
        );
        assert_eq!(
            add_exclusion(&mut policy, "void").unwrap(),
            "Zone 'void' is already on the exclusion list."
        );
    }

    #[test]
    fn test_remove_reports_distinct_outcomes() {
        let (_dir, file) = temp_file();
        let mut policy = ZonePolicy::new(file);
        policy.add("void").unwrap();

        assert_eq!(
            remove_exclusion(&mut policy, "void").unwrap(),
            "Zone 'void' removed from the exclusion list."
        );
        assert_eq!(
            remove_exclusion(&mut policy, "void").unwrap(),
            "Zone 'void' is not on the exclusion list."
        );
    }

    #[test]
    fn test_list_empty_and_populated() {
        let (_dir, file) = temp_file();
        let mut policy = ZonePolicy::new(file);

        assert_eq!(list_exclusions(&policy), "No zones are excluded.");

        policy.add("void").unwrap();
        policy.add("lobby").unwrap();
        assert_eq!(list_exclusions(&policy), "Excluded zones:\n- void\n- lobby");
    }

    #[test]
    fn test_set_message_persists() {
        let (dir, mut file) = temp_file();

        let report = set_message(&mut file, "restored", "snapped back to {zone}").unwrap();
        assert_eq!(report, "Message 'restored' updated.");

        let reopened = ConfigFile::open(dir.path().join("config.toml")).unwrap();
        assert_eq!(reopened.config.messages.restored, "snapped back to {zone}");
    }

    #[test]
    fn test_set_message_unknown_key_lists_valid_keys() {
        let (_dir, mut file) = temp_file();

        let report = set_message(&mut file, "teleportation", "zap").unwrap();
        assert!(report.contains("Unknown message key 'teleportation'"));
        assert!(report.contains("restored"));
        assert!(report.contains("zone_excluded"));
        assert!(report.contains("no_prior_location"));
    }

    #[test]
    fn test_suggestions_filter_by_prefix() {
        let (_dir, file) = temp_file();
        let mut policy = ZonePolicy::new(file);
        policy.add("void").unwrap();
        policy.add("lobby").unwrap();

        let known = vec!["overworld".to_string(), "nether".to_string()];
        assert_eq!(suggest_add(&known, "ov"), ["overworld"]);
        assert_eq!(suggest_remove(&policy, "v"), ["void"]);
        assert_eq!(suggest_remove(&policy, ""), ["void", "lobby"]);
        assert_eq!(suggest_message_keys("no"), ["no_prior_location"]);
    }

    #[test]
    fn test_suggestions_match_case_insensitively() {
        let known = vec!["Overworld".to_string()];
        assert_eq!(suggest_add(&known, "over"), ["Overworld"]);
    }
}
