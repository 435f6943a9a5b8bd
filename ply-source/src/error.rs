use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlySourceError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlySourceError {
    #[error("Not a PLY file")]
    BadMagic,

    #[error("Malformed PLY header: {0}")]
    Header(String),

    #[error("Unsupported PLY feature: {0}")]
    Unsupported(String),

    #[error("PLY vertex element has no '{0}' property")]
    MissingProperty(&'static str),

    #[error("Malformed vertex data: {0}")]
    Vertex(String),

    #[error("Binary vertex data truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
}
