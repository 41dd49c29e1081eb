// Application constants (no magic values)

/// Subsetting executable used when none is configured (fontTools)
pub const DEFAULT_TOOL: &str = "pyftsubset";

/// Character list handed to the tool via `--text-file`
pub const DEFAULT_TEXT_FILE: &str = "./zh-cn-characters.txt";

/// Scan root used when none is configured
pub const DEFAULT_SCAN_ROOT: &str = ".";

/// Maximum stderr kept per failed invocation (4 KiB)
pub const MAX_STDERR_BYTES: usize = 4096;
