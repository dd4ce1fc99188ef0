//! Domain entities - core business objects

mod member;
mod status;

pub use member::{relative_time, TeamMember};
pub use status::PresenceStatus;
