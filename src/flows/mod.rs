//! Flows module - The commands built on top of the store and core
//!
//! - query: word lookups against the store
//! - convert: raw dictionary to canonical store
//! - max_line: longest line of a file, for choosing --max-line

pub mod convert;
pub mod max_line;
pub mod query;
