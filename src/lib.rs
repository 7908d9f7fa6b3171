//! Flamegraph Export
//!
//! Turns flamegraph profiles into downloadable artifacts: image snapshots,
//! raw JSON dumps, and server-rendered pprof/html exports.
//!
//! This crate provides the core implementation for the
//! `flame-export` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! flame-export json --profile profile.json
//! flame-export html --profile profile.json --server http://localhost:4040
//! ```

pub mod commands;
pub mod download;
pub mod export;
pub mod profile;
pub mod surface;
pub mod utils;
