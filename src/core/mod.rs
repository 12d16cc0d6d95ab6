//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error taxonomy shared by every command
//! - Data model (records, query words, jsonl items)
//! - The word combinator
//! - Rendering for text and jsonl output
//! - Logging setup
//! - Input/output helpers

pub mod combine;
pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod util;
