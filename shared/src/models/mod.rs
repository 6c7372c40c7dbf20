//! Domain models for the timber yard dispatch platform

mod load;
mod package;

pub use load::*;
pub use package::*;
