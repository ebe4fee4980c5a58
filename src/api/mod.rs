mod http;
pub mod models;

pub(crate) use http::base_url;
pub use http::HttpClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use models::{AddToAlbumResponse, AlbumId, AlbumLink, FileAlbums, FileId, FilesPage, PageQuery};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid query: {0}")]
    Query(#[from] serde_qs::Error),
}

impl ApiError {
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }
}

/// Remote file/album API the store talks to.
/// Paths are relative to the configured API root.
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// `GET files`
    async fn list_files(&self, query: PageQuery) -> Result<FilesPage, ApiError>;
    /// `GET album/{id}/full`
    async fn list_album_files(
        &self,
        album_id: AlbumId,
        query: PageQuery,
    ) -> Result<FilesPage, ApiError>;
    /// `GET file/{id}/albums`
    async fn file_albums(&self, file_id: FileId) -> Result<FileAlbums, ApiError>;
    /// `POST file/album/add`
    async fn add_to_album(&self, link: AlbumLink) -> Result<AddToAlbumResponse, ApiError>;
    /// `POST file/album/del`
    async fn remove_from_album(&self, link: AlbumLink) -> Result<Value, ApiError>;
    /// `DELETE file/{id}`
    async fn delete_file(&self, file_id: FileId) -> Result<Value, ApiError>;
}
