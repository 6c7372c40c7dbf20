//! Shared types and calculations for the Timber Yard Dispatch Platform
//!
//! This crate holds the calculation core (board-feet, length classes, load
//! balance, distribution, fill progress, reports and package ids) shared by
//! the backend, the browser (via WASM) and the exports, so every consumer
//! reports the same numbers.

pub mod calculations;
pub mod constants;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use calculations::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
