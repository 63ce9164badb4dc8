use crate::{config, mailing_list};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("mailing list client error: {0}")]
    MailingList(#[from] mailing_list::Error),

    #[error("lambda runtime error: {0}")]
    Lambda(String),
}
