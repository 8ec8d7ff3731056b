use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("store error: {0}")]
    Store(#[from] slink_store::StoreError),

    #[error("link error: {0}")]
    Link(#[from] slink_index::LinkError),
}

pub type SdkResult<T> = Result<T, SdkError>;
