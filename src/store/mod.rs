//! The files store: a paginated file listing plus per-file album membership,
//! kept in sync with the remote API.

mod mutations;
mod state;

pub use mutations::Mutation;
pub use state::{FileListState, Pagination, DEFAULT_PAGE_LIMIT};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::broadcast;

use crate::alert::{Alert, AlertSink};
use crate::api::models::{
    AddToAlbumResponse, AlbumId, AlbumLink, FileAlbums, FileId, FilesPage, PageQuery,
};
use crate::api::{ApiError, FilesApi};
use crate::config::Config;

/// Owns a `FileListState` and the collaborators needed to refresh it.
///
/// Actions take `&self` and may run concurrently. The state lock is never held
/// across a request, so overlapping actions commit in completion order.
pub struct FilesStore {
    alerts: Arc<dyn AlertSink>,
    api: Arc<dyn FilesApi>,
    events: broadcast::Sender<Mutation>,
    state: Mutex<FileListState>,
}

impl FilesStore {
    pub fn new(api: Arc<dyn FilesApi>, alerts: Arc<dyn AlertSink>, config: &Config) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        Self {
            alerts,
            api,
            events,
            state: Mutex::new(FileListState::new(config.page_limit)),
        }
    }

    fn state(&self) -> MutexGuard<'_, FileListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> FileListState {
        self.state().clone()
    }

    /// Receive every mutation committed from now on, in commit order.
    pub fn subscribe(&self) -> broadcast::Receiver<Mutation> {
        self.events.subscribe()
    }

    /// Apply a mutation and notify subscribers.
    pub fn commit(&self, mutation: Mutation) {
        tracing::debug!(mutation = mutation.kind(), "Committing mutation");

        // Held through the send so subscribers observe commits in apply order
        let mut state = self.state();
        state.apply(&mutation);

        // No subscribers is fine
        let _ = self.events.send(mutation);
    }

    pub fn reset(&self) {
        self.commit(Mutation::ResetState);
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn total_files(&self) -> u64 {
        self.state().total_files()
    }

    pub fn fetched_count(&self) -> usize {
        self.state().fetched_count()
    }

    pub fn should_paginate(&self) -> bool {
        self.state().should_paginate()
    }

    pub fn limit(&self) -> u32 {
        self.state().limit()
    }

    pub fn name(&self) -> Option<String> {
        self.state().name().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Load a page of all files. Defaults to the first page.
    ///
    /// Failures are not returned: the error text goes to the alert sink and
    /// the result is `None`. `is_loading` stays set after a failure.
    pub async fn fetch(&self, page: Option<u32>) -> Option<FilesPage> {
        self.commit(Mutation::SetIsLoading);
        let query = self.page_query(page);

        match self.api.list_files(query).await {
            Ok(response) => {
                self.commit_page(&response, query.page);
                Some(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, page = query.page, "Failed to fetch files");
                self.alerts.set(Alert::error(e.to_string()));
                None
            }
        }
    }

    /// Load a page of a single album's files. Defaults to the first page.
    pub async fn fetch_by_album_id(
        &self,
        album_id: AlbumId,
        page: Option<u32>,
    ) -> Result<FilesPage, ApiError> {
        self.commit(Mutation::SetIsLoading);
        let query = self.page_query(page);

        let response = self.api.list_album_files(album_id, query).await?;
        self.commit_page(&response, query.page);

        Ok(response)
    }

    pub async fn get_file_albums(&self, file_id: FileId) -> Result<FileAlbums, ApiError> {
        let response = self.api.file_albums(file_id).await?;

        self.commit(Mutation::SetFileAlbums {
            file_id,
            albums: response.albums.clone(),
        });

        Ok(response)
    }

    /// Add a file to an album. The local album list only changes if the
    /// file's albums were already loaded with `get_file_albums`.
    pub async fn add_to_album(
        &self,
        file_id: FileId,
        album_id: AlbumId,
    ) -> Result<AddToAlbumResponse, ApiError> {
        let response = self
            .api
            .add_to_album(AlbumLink { file_id, album_id })
            .await?;

        match response.data.album {
            Some(ref album) => self.commit(Mutation::AddAlbumToFile {
                file_id,
                album: album.clone(),
            }),
            None => tracing::debug!(file_id, album_id, "Add response carried no album"),
        }

        Ok(response)
    }

    pub async fn remove_from_album(
        &self,
        file_id: FileId,
        album_id: AlbumId,
    ) -> Result<Value, ApiError> {
        let response = self
            .api
            .remove_from_album(AlbumLink { file_id, album_id })
            .await?;

        self.commit(Mutation::RemoveAlbumFromFile { file_id, album_id });

        Ok(response)
    }

    pub async fn delete_file(&self, file_id: FileId) -> Result<Value, ApiError> {
        let response = self.api.delete_file(file_id).await?;

        self.commit(Mutation::RemoveFile { file_id });

        Ok(response)
    }

    fn page_query(&self, page: Option<u32>) -> PageQuery {
        PageQuery {
            limit: self.limit(),
            page: page.filter(|&p| p > 0).unwrap_or(1),
        }
    }

    fn commit_page(&self, response: &FilesPage, page: u32) {
        self.commit(Mutation::SetFilesAndMeta {
            files: response.files.clone(),
            name: response.name.clone(),
            page: Some(page),
            count: response.count,
        });
    }
}
