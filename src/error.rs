use thiserror::Error;

/// Errors returned by scheme lookups and configuration loading.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown color scheme “{0}”")]
    UnknownScheme(String),
    #[error("color scheme “{scheme}” expects {expected}")]
    WrongInput { scheme: String, expected: &'static str },
    #[error("“{0}” is not a number")]
    NotANumber(String),
    #[error("value {0} is not in [0, 1]")]
    OutOfRange(f64),
    #[error("categorical scheme without a “default” color")]
    MissingDefault,
    #[error("invalid density ranges: {0}")]
    InvalidRanges(String),
    #[error("invalid site configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
