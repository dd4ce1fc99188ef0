//! Status filter applied to the team roster

use std::collections::BTreeSet;

use crate::entities::{PresenceStatus, TeamMember};

/// User selected set of statuses used to narrow the roster.
///
/// An empty set means "no filtering": every member is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    statuses: BTreeSet<PresenceStatus>,
}

impl FilterSet {
    /// Create an empty filter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `status` if absent, remove it if present.
    ///
    /// Returns `true` if the status is selected after the call.
    pub fn toggle(&mut self, status: PresenceStatus) -> bool {
        if self.statuses.remove(&status) {
            false
        } else {
            self.statuses.insert(status);
            true
        }
    }

    /// Remove every selected status
    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    #[inline]
    pub fn contains(&self, status: PresenceStatus) -> bool {
        self.statuses.contains(&status)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Selected statuses, ordered by code
    pub fn iter(&self) -> impl Iterator<Item = PresenceStatus> + '_ {
        self.statuses.iter().copied()
    }

    /// Selected status codes, ordered
    pub fn values(&self) -> Vec<u8> {
        self.iter().map(PresenceStatus::value).collect()
    }

    /// Check whether a member passes this filter
    pub fn matches(&self, member: &TeamMember) -> bool {
        self.is_empty() || self.iter().any(|status| member.has_status(status))
    }
}

impl FromIterator<PresenceStatus> for FilterSet {
    fn from_iter<I: IntoIterator<Item = PresenceStatus>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

/// Members of `team` that pass `filter_set`, in their original order
pub fn filter(team: &[TeamMember], filter_set: &FilterSet) -> Vec<TeamMember> {
    team.iter()
        .filter(|member| filter_set.matches(member))
        .cloned()
        .collect()
}
