//! Presence status - the fixed set of states a team member can report

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Presence status reported by a team member.
///
/// The set is fixed at compile time; the remote service identifies a status by
/// its numeric code on input and by its label on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PresenceStatus {
    /// In the office
    Working,
    /// Working from somewhere else
    WorkingRemotely,
    /// Away on leave
    OnVacation,
    /// Travelling for work
    BusinessTrip,
}

impl PresenceStatus {
    /// Every status, ordered by code
    pub const ALL: [Self; 4] = [
        Self::Working,
        Self::WorkingRemotely,
        Self::OnVacation,
        Self::BusinessTrip,
    ];

    /// Numeric code used on the wire
    #[inline]
    pub const fn value(self) -> u8 {
        match self {
            Self::Working => 0,
            Self::WorkingRemotely => 1,
            Self::OnVacation => 2,
            Self::BusinessTrip => 3,
        }
    }

    /// Human readable label, as reported in team member records
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Working => "Working",
            Self::WorkingRemotely => "Working Remotely",
            Self::OnVacation => "On Vacation",
            Self::BusinessTrip => "Business Trip",
        }
    }

    /// Look up a status by its numeric code
    pub fn from_value(value: u8) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.value() == value)
            .ok_or(DomainError::InvalidStatusValue(i64::from(value)))
    }

    /// Look up a status by its exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl From<PresenceStatus> for u8 {
    fn from(status: PresenceStatus) -> Self {
        status.value()
    }
}

impl TryFrom<u8> for PresenceStatus {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = DomainError;

    /// Accepts either a numeric code ("2") or a label, ignoring case and
    /// separators ("on vacation", "on-vacation").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return u8::try_from(value)
                .map_err(|_| DomainError::InvalidStatusValue(value))
                .and_then(Self::from_value);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| {
                status
                    .label()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .eq(normalized.chars())
            })
            .ok_or_else(|| DomainError::UnknownStatusLabel(trimmed.to_string()))
    }
}
