//! HTTP handlers

pub mod catalog;
pub mod health;
pub mod load;
pub mod package;
pub mod reports;

pub use catalog::*;
pub use health::*;
pub use load::*;
pub use package::*;
pub use reports::*;
