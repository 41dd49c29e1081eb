// fontcut Infrastructure - System Adapters
// Implements: FontScanner, SubsetInvoker

pub mod subprocess_invoker;
pub mod walkdir_scanner;

pub use subprocess_invoker::SubprocessInvoker;
pub use walkdir_scanner::WalkDirScanner;
