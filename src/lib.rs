//! `versefinder` - terminal scripture reader.
//!
//! Segments a flat scripture text file into verses and chapters, indexes its
//! words, and serves prefix suggestions, substring search and chapter-by-chapter
//! reading.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod cache;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod error;
pub mod loader;
pub mod source;
pub mod ui;
