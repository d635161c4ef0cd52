//! Parameterized SQL helpers: identifiers come from code, values are always bound.

mod builder;
pub mod params;
pub mod partial;
pub use builder::*;
pub use params::*;
pub use partial::{sql_for_partial_update, PartialUpdate};
