//! # Opsdash Data
//!
//! Loading, aggregation and tabular export of appointment records.
//!
//! The loader turns a delimited file into an immutable
//! [`Table`](opsdash_common::Table); the aggregation modules derive the four
//! dashboard views and the KPI summary from it; the exporter writes those
//! views back out as delimited files.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod exporter;
pub mod loader;
pub mod views;

// Aggregations
pub mod branch_totals;
pub mod daily_trend;
pub mod heatmap;
pub mod kpi;
pub mod service_totals;

pub use branch_totals::*;
pub use daily_trend::*;
pub use exporter::*;
pub use heatmap::*;
pub use kpi::*;
pub use loader::*;
pub use service_totals::*;
pub use views::*;
