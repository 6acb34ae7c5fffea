use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered status {status}")]
    BadStatus { url: String, status: u16 },
}
