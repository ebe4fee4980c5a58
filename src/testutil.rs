//! Shared test helpers for files-store unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::alert::ChannelAlerts;
use crate::api::models::{
    AddToAlbumResponse, AddedAlbum, Album, AlbumId, AlbumLink, File, FileAlbums, FileId,
    FilesPage, PageQuery,
};
use crate::api::{ApiError, FilesApi};
use crate::config::Config;
use crate::store::FilesStore;

/// In-memory `FilesApi` that serves canned responses and records every request.
#[derive(Default)]
pub struct MockApi {
    inner: Mutex<MockInner>,
}

#[derive(Default)]
struct MockInner {
    files_page: FilesPage,
    album_pages: HashMap<AlbumId, FilesPage>,
    file_albums: HashMap<FileId, Vec<Album>>,
    albums: HashMap<AlbumId, Album>,
    failure: Option<String>,
    requests: Vec<String>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files_page(self, page: FilesPage) -> Self {
        self.inner().files_page = page;
        self
    }

    pub fn with_album_page(self, album_id: AlbumId, page: FilesPage) -> Self {
        self.inner().album_pages.insert(album_id, page);
        self
    }

    pub fn with_file_albums(self, file_id: FileId, albums: Vec<Album>) -> Self {
        self.inner().file_albums.insert(file_id, albums);
        self
    }

    pub fn with_album(self, album: Album) -> Self {
        self.inner().albums.insert(album.id, album);
        self
    }

    /// Make every following request fail with a 500 carrying `message`.
    pub fn fail_with(&self, message: &str) {
        self.inner().failure = Some(message.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.inner().requests.clone()
    }

    fn inner(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap()
    }

    fn record(&self, request: String) -> Result<MutexGuard<'_, MockInner>, ApiError> {
        let mut inner = self.inner();
        inner.requests.push(request);
        if let Some(message) = inner.failure.clone() {
            return Err(ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, message));
        }
        Ok(inner)
    }
}

#[async_trait]
impl FilesApi for MockApi {
    async fn list_files(&self, query: PageQuery) -> Result<FilesPage, ApiError> {
        let inner = self.record(format!(
            "GET files?limit={}&page={}",
            query.limit, query.page
        ))?;
        Ok(inner.files_page.clone())
    }

    async fn list_album_files(
        &self,
        album_id: AlbumId,
        query: PageQuery,
    ) -> Result<FilesPage, ApiError> {
        let inner = self.record(format!(
            "GET album/{album_id}/full?limit={}&page={}",
            query.limit, query.page
        ))?;
        inner
            .album_pages
            .get(&album_id)
            .cloned()
            .ok_or_else(|| ApiError::status(StatusCode::NOT_FOUND, "Album not found"))
    }

    async fn file_albums(&self, file_id: FileId) -> Result<FileAlbums, ApiError> {
        let inner = self.record(format!("GET file/{file_id}/albums"))?;
        Ok(FileAlbums {
            albums: inner.file_albums.get(&file_id).cloned().unwrap_or_default(),
        })
    }

    async fn add_to_album(&self, link: AlbumLink) -> Result<AddToAlbumResponse, ApiError> {
        let inner = self.record(format!(
            "POST file/album/add {}:{}",
            link.file_id, link.album_id
        ))?;
        let album = inner
            .albums
            .get(&link.album_id)
            .cloned()
            .ok_or_else(|| ApiError::status(StatusCode::NOT_FOUND, "Album not found"))?;
        Ok(AddToAlbumResponse {
            data: AddedAlbum { album: Some(album) },
        })
    }

    async fn remove_from_album(&self, link: AlbumLink) -> Result<Value, ApiError> {
        self.record(format!(
            "POST file/album/del {}:{}",
            link.file_id, link.album_id
        ))?;
        Ok(serde_json::json!({"message": "Successfully removed file from album"}))
    }

    async fn delete_file(&self, file_id: FileId) -> Result<Value, ApiError> {
        self.record(format!("DELETE file/{file_id}"))?;
        Ok(serde_json::json!({"message": "File successfully deleted"}))
    }
}

pub fn files(ids: &[FileId]) -> Vec<File> {
    ids.iter().copied().map(File::new).collect()
}

pub fn files_page(ids: &[FileId], count: u64) -> FilesPage {
    FilesPage {
        files: files(ids),
        name: None,
        count,
    }
}

/// Build a store over `api` with default configuration and a captured alert channel.
pub fn test_store(
    api: Arc<MockApi>,
) -> (
    FilesStore,
    tokio::sync::mpsc::UnboundedReceiver<crate::alert::Alert>,
) {
    let (alerts, rx) = ChannelAlerts::new();
    let store = FilesStore::new(api, Arc::new(alerts), &Config::default());
    (store, rx)
}
