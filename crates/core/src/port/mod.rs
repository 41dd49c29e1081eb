// Port Layer - Interfaces for external dependencies

pub mod font_scanner;
pub mod subset_invoker;
pub mod time_provider; // For deterministic durations in tests

// Re-exports
pub use font_scanner::{FontScanner, ScanError};
pub use subset_invoker::{InvocationResult, InvocationStatus, InvokeError, SubsetInvoker};
pub use time_provider::TimeProvider;
