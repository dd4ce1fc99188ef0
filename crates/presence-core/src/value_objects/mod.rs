//! Value objects - immutable types that represent domain concepts

mod filter_set;

pub use filter_set::{filter, FilterSet};
