//! # Opsdash Config
//!
//! Type-safe configuration for the operations dashboard.
//!
//! This crate provides the configuration schema with its defaults, a loader
//! that understands TOML, YAML and JSON files, and validation of every value
//! the pipeline relies on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
