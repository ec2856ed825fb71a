use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host value error: {0}")]
    Bridge(String),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
