#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown input method `{0}` (expected telex, vni or viqr)")]
    UnknownInputMethod(String),
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    ParseConfig(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    WriteConfig(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
