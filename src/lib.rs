//! # rowseek
//!
//! rowseek searches local CSV datasets for records matching a phone number,
//! email address or username.
//!
//! ## Features
//!
//! * Column-aware search - only columns whose names suggest the requested
//!   kind of data are searched, with a literal, case-insensitive match
//! * Per-file isolation - unreadable or malformed datasets are reported and
//!   skipped without stopping the search
//! * Streaming output - each (file, column) result is rendered as soon as it
//!   is found
//! * Dataset management - list and remove dataset files

/// Dataset directory listing and removal
pub mod bases;
/// Search categories and column classification
pub mod classify;
/// Loading delimited dataset files
pub mod dataset;
/// Finding dataset files in a directory
pub mod discover;
pub mod error;
/// Interactive text menu
pub mod menu;
pub mod paths;
/// Table rendering and output sinks
pub mod render;
/// Multi-file search orchestration and matching
pub mod search;
/// Layered configuration
pub mod settings;
pub mod telemetry;
