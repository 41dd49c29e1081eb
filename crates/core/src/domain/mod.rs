// Domain Layer - Pure data and rules, no I/O

pub mod error;
pub mod font;
pub mod options;
pub mod report;

// Re-exports
pub use error::DomainError;
pub use font::{FontFile, FONT_EXTENSION};
pub use options::{Flavor, SubsetOptions, ToolCommand};
pub use report::{tail_lossy, CutReport, FileReport, InvocationOutcome};
