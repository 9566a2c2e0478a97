//! Notification template catalog.
//!
//! Three templates, all admin-editable, all optionally referencing the
//! zone they fire in via `{zone}`.

use wayconf::MessagesConfig;

/// Which notification template an admin operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Restored,
    ZoneExcluded,
    NoPriorLocation,
}

impl MessageKey {
    pub const ALL: [MessageKey; 3] = [
        MessageKey::Restored,
        MessageKey::ZoneExcluded,
        MessageKey::NoPriorLocation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::Restored => "restored",
            MessageKey::ZoneExcluded => "zone_excluded",
            MessageKey::NoPriorLocation => "no_prior_location",
        }
    }
}

impl std::str::FromStr for MessageKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restored" => Ok(MessageKey::Restored),
            "zone_excluded" => Ok(MessageKey::ZoneExcluded),
            "no_prior_location" => Ok(MessageKey::NoPriorLocation),
            _ => anyhow::bail!("Unknown message key: {}", s),
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current template for `key`.
pub fn get(messages: &MessagesConfig, key: MessageKey) -> &str {
    match key {
        MessageKey::Restored => &messages.restored,
        MessageKey::ZoneExcluded => &messages.zone_excluded,
        MessageKey::NoPriorLocation => &messages.no_prior_location,
    }
}

/// Replace the template for `key`.
pub fn set(messages: &mut MessagesConfig, key: MessageKey, text: impl Into<String>) {
    let slot = match key {
        MessageKey::Restored => &mut messages.restored,
        MessageKey::ZoneExcluded => &mut messages.zone_excluded,
        MessageKey::NoPriorLocation => &mut messages.no_prior_location,
    };
    *slot = text.into();
}

/// Substitute the zone name into a template.
pub fn render(template: &str, zone: &str) -> String {
    template.replace("{zone}", zone)
}
