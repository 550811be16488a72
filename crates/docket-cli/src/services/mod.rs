//! Service layer for business logic with dependency injection.
//!
//! This module contains services that wire the core library and the GitHub
//! client together, accepting trait-based dependencies so they can be tested
//! with mock implementations.

pub mod export;
pub mod merge;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod test_mocks;

pub use export::{ExportResult, ExportService};
pub use merge::MergeService;
