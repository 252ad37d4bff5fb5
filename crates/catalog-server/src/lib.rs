//! # Catalog Server Library
//!
//! Dependency injection configuration and startup utilities for the
//! catalog server application.

pub mod di;
