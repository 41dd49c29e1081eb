// Subsetting Options Domain Model

use super::error::{DomainError, Result};
use super::font::FontFile;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

/// Web font compression format requested from the tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Woff2,
    Woff,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Woff2 => "woff2",
            Flavor::Woff => "woff",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "woff2" => Ok(Flavor::Woff2),
            "woff" => Ok(Flavor::Woff),
            _ => Err(DomainError::InvalidFlavor(s.to_string())),
        }
    }
}

/// External subsetting executable (name resolved via PATH, or a path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand(String);

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(DomainError::EmptyToolCommand);
        }
        Ok(Self(program))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed flag set passed to the tool for every font
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetOptions {
    pub flavor: Flavor,
    pub with_zopfli: bool,
    /// File listing the characters to keep. Relative paths resolve against the
    /// tool's working directory.
    pub text_file: PathBuf,
}

impl SubsetOptions {
    pub fn new(text_file: impl Into<PathBuf>) -> Self {
        Self {
            flavor: Flavor::default(),
            with_zopfli: true,
            text_file: text_file.into(),
        }
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_zopfli(mut self, enabled: bool) -> Self {
        self.with_zopfli = enabled;
        self
    }

    /// Build the argument vector for one font: input path first, then the flags.
    ///
    /// ```text
    /// <font> --flavor=woff2 --with-zopfli --text-file=./zh-cn-characters.txt
    /// ```
    pub fn to_args(&self, font: &FontFile) -> Vec<OsString> {
        let mut args = Vec::with_capacity(4);
        args.push(font.path().as_os_str().to_owned());
        args.push(format!("--flavor={}", self.flavor).into());
        if self.with_zopfli {
            args.push("--with-zopfli".into());
        }
        let mut text_file = OsString::from("--text-file=");
        text_file.push(self.text_file.as_os_str());
        args.push(text_file);
        args
    }
}
