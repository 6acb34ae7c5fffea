use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("callback payload too long: {len} bytes")]
    Oversize { len: usize },

    #[error("malformed callback payload: {0:?}")]
    Malformed(String),

    #[error("unknown callback tag: {0:?}")]
    UnknownTag(String),
}
