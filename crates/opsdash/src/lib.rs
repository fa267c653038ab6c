//! # Opsdash
//!
//! Operations dashboard for multi-branch appointment businesses.
//!
//! This is the main binary crate. It parses the command line, installs
//! logging, and sequences the loader, aggregator, renderer and exporter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use cli::*;
pub use error::*;
pub use logging::*;
pub use pipeline::*;
pub use report::*;
