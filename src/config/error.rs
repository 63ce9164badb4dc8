pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the mailing list API key is missing or empty.")]
    MissingApiKey,
    #[error("the audience id is missing or empty.")]
    MissingAudienceId,
    #[error("failed to determine the server prefix from the API key.")]
    ServerPrefixNotInApiKey,
    #[error("invalid server prefix: {0}")]
    InvalidServerPrefix(String),

    #[error("figment error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}
