// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown flavor: {0} (expected woff2 or woff)")]
    InvalidFlavor(String),

    #[error("Tool command must not be empty")]
    EmptyToolCommand,
}

pub type Result<T> = std::result::Result<T, DomainError>;
