//! Static category and modifier catalogs.
//!
//! The catalogs are immutable lookup tables built once at process start and
//! shared by read-only reference. Lookups never fail: unknown category ids
//! degrade to a generic phrase and unknown modifier ids are silently dropped.
//!
//! # Module Structure
//!
//! - `category`: idea category catalog (48 mortgage-domain categories)
//! - `modifier`: prompt modifier catalog (14 instruction phrases)
//! - `options`: detail level and output format enumerations

pub mod category;
pub mod modifier;
pub mod options;

// Re-export public API
pub use category::{CategoryGroup, CategoryOption, describe, find_category, label_of};
pub use modifier::{Modifier, modifier_instruction, resolve_modifiers};
pub use options::{DetailLevel, OutputFormat};
