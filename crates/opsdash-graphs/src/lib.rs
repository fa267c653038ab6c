//! # Opsdash Graphs
//!
//! Composite dashboard rendering for the operations dashboard.
//!
//! This crate lays out the five dashboard panels on a single bitmap using
//! plotters. Panels whose view is empty, or that fail to draw, are replaced
//! by a "No data" placeholder so the image is always produced.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod manager;
pub mod traits;
pub mod utils;

// Panel implementations
pub mod branch_revenue;
pub mod daily_revenue;
pub mod kpi_table;
pub mod peak_hours;
pub mod service_breakdown;

pub use manager::*;
pub use traits::*;
pub use utils::*;
