//! Common utilities for the Koala style and layout engine.
//!
//! This crate provides shared infrastructure used by the engine crates:
//! - **Warning System** - deduplicated diagnostics for unsupported CSS and markup features

pub mod warning;
