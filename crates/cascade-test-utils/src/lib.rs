//! Shared test utilities for the config-cascade workspace.
//!
//! This crate provides standardised fixtures so the crate test suites do not
//! each build their own. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`ConfigTree`](tree::ConfigTree), real directory trees with
//!   configuration files on disk
//! - [`loader`]: [`CountingLoader`](loader::CountingLoader), an in-memory
//!   loader that records every load

pub mod loader;
pub mod tree;

pub use loader::CountingLoader;
pub use tree::ConfigTree;
