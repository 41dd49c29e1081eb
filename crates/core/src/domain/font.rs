// Font File Domain Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension (compared case-insensitively) of files handed to the subsetting tool
pub const FONT_EXTENSION: &str = "ttf";

/// Path of a candidate font file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontFile(PathBuf);

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }

    /// Whether a file name qualifies: its extension, lowercased, equals `ttf`.
    ///
    /// Only the name is inspected. Callers are responsible for checking that the
    /// path points at a regular file.
    ///
    /// # Example
    /// ```
    /// use fontcut_core::domain::FontFile;
    /// use std::path::Path;
    ///
    /// assert!(FontFile::matches(Path::new("fonts/NotoSans.TTF")));
    /// assert!(!FontFile::matches(Path::new("fonts/NotoSans.otf")));
    /// ```
    pub fn matches(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FONT_EXTENSION))
    }
}

impl fmt::Display for FontFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_case() {
        assert!(FontFile::matches(Path::new("a.ttf")));
        assert!(FontFile::matches(Path::new("dir/b.TTF")));
        assert!(FontFile::matches(Path::new("dir/sub/c.TtF")));
        assert!(FontFile::matches(Path::new("LXGWWenKai.subset.ttf")));
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(!FontFile::matches(Path::new("a.otf")));
        assert!(!FontFile::matches(Path::new("a.woff2")));
        assert!(!FontFile::matches(Path::new("a.ttf.bak")));
        assert!(!FontFile::matches(Path::new("a.ttfx")));
        assert!(!FontFile::matches(Path::new("README")));
    }

    #[test]
    fn test_rejects_bare_names() {
        // No extension at all: "ttf" is the file stem here
        assert!(!FontFile::matches(Path::new("ttf")));
        assert!(!FontFile::matches(Path::new(".ttf")));
    }

    #[test]
    fn test_display_is_path() {
        let font = FontFile::new("fonts/a.ttf");
        assert_eq!(font.to_string(), "fonts/a.ttf");
        assert_eq!(font.path(), Path::new("fonts/a.ttf"));
    }
}
