//! Version parsing and comparison
//!
//! # Modules
//!
//! - [`pep440`]: The ordered [`Version`] type and its parser
//! - [`resolver`]: Maximum selection over versions and release candidates

pub mod pep440;
pub mod resolver;

pub use pep440::{Version, parse_version};
pub use resolver::{latest_candidate, max_version};
