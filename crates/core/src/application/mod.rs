// Application Layer - Use Cases

pub mod constants;
pub mod cut;

// Re-exports
pub use cut::{CutConfig, CutService};
