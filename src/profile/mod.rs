//! Flamegraph profile model and payload decoding.
//!
//! This module handles:
//! - The typed profile schema (metadata + opaque payload)
//! - Loading profiles from JSON files
//! - Decoding flamebearer levels into collapsed stacks

pub mod flamebearer;
pub mod reader;
pub mod schema;

// Re-export main types
pub use flamebearer::{collapse_profile, CollapsedStack, Flamebearer, FlamebearerFormat};
pub use reader::{parse_profile, read_profile};
pub use schema::{FlamegraphProfile, ProfileMetadata};
