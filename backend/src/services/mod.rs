//! Business logic services for the Timber Yard Dispatch Platform
//!
//! Services fetch a fresh snapshot from the repository, apply a mutation,
//! and derive every figure through `shared::calculations`.

pub mod export;
pub mod load;
pub mod package;
pub mod reports;

pub use export::ExportService;
pub use load::LoadService;
pub use package::PackageService;
pub use reports::ReportService;
