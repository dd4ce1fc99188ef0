//! # presence-core
//!
//! Domain layer containing the presence status set, team member entity, the
//! roster filter, and the ports implemented by outer layers.
//! This crate has zero dependencies on infrastructure (HTTP, storage, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{relative_time, PresenceStatus, TeamMember};
pub use error::{DomainError, DomainResult};
pub use traits::{AuthenticationFailureHandler, TokenStorage};
pub use value_objects::{filter, FilterSet};
