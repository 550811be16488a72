//! # docket-core
//!
//! Core library for Docket: configuration, the keyword filter and Markdown
//! report writer used by the issue exporter, and the breadth-first directory
//! merger.

pub mod config;
pub mod error;
pub mod filter;
pub mod merge;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, KeywordFilter};
pub use merge::{DirectoryMerger, MergeOutcome, MergePlan, SourceFile};
pub use report::{default_report_path, render, write_report};
