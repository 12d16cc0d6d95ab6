//! Store module - Read-only access to the sorted pinyin data file
//!
//! Provides:
//! - Positioned reads over files and in-memory buffers
//! - The record line decoder
//! - The binary-search locator

pub mod locator;
pub mod reader;
pub mod record;
