use thiserror::Error;

pub type Result<T> = std::result::Result<T, CloudError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CloudError {
    #[error("Point cloud is empty")]
    Empty,

    #[error("Point cloud has no spatial extent")]
    Degenerate,

    #[error("Point cloud contains non-finite coordinates")]
    NonFinite,
}
