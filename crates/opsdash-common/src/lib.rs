//! # Opsdash Common
//!
//! Shared types, error taxonomy, and formatting helpers for the operations
//! dashboard.
//!
//! Every other crate in the workspace builds on the [`Record`], [`Table`] and
//! [`Money`] types defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
