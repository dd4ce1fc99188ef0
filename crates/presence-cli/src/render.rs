//! Plain-text rendering of the dashboard

use std::fmt::Write;

use chrono::{DateTime, Utc};
use presence_core::{relative_time, PresenceStatus, TeamMember};
use presence_service::{PresenceViewModel, Route};
use presence_store::Session;

/// One roster line: initials, name, status and when it last changed
pub fn member_line(member: &TeamMember, now: DateTime<Utc>) -> String {
    format!(
        "{:<4}{:<28}{:<18}{}",
        member.initials(),
        member.full_name,
        member.status,
        relative_time(member.updated_at, now)
    )
}

/// The filtered roster, or the empty-state text when nothing is shown
pub fn dashboard(vm: &PresenceViewModel, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let filters = vm.filter_set();
    if !filters.is_empty() {
        let labels: Vec<&str> = filters.iter().map(PresenceStatus::label).collect();
        let _ = writeln!(out, "Filter: {}", labels.join(", "));
    }

    if let Some(message) = vm.empty_state_message() {
        let _ = writeln!(out, "{message}");
        return out;
    }

    for member in vm.derived_view() {
        let _ = writeln!(out, "{}", member_line(&member, now));
    }
    out
}

pub fn session(session: &Session, route: Route) -> String {
    if session.authenticated {
        format!("Logged in ({route:?})")
    } else {
        format!("Not logged in ({route:?})")
    }
}
