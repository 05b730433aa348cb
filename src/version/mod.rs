//! Version parsing and the update policy applied on top of it
//!
//! # Modules
//!
//! - [`compare`]: Lenient `major.minor.patch` parsing with a total order
//! - [`level`]: Update levels and the rule each one applies to a version gap

pub mod compare;
pub mod level;

pub use compare::Version;
pub use level::{ParseLevelError, UpdateLevel};
