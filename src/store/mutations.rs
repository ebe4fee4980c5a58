//! Synchronous writes to `FileListState`.

use serde::{Deserialize, Serialize};

use super::state::FileListState;
use crate::api::models::{Album, AlbumId, File, FileId};

/// Every way the file listing can change. Committed through `FilesStore`
/// and broadcast to subscribers after being applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    SetIsLoading,
    SetFilesAndMeta {
        files: Vec<File>,
        name: Option<String>,
        /// `None` or 0 means the first page
        page: Option<u32>,
        count: u64,
    },
    RemoveFile {
        file_id: FileId,
    },
    SetFileAlbums {
        file_id: FileId,
        albums: Vec<Album>,
    },
    AddAlbumToFile {
        file_id: FileId,
        album: Album,
    },
    RemoveAlbumFromFile {
        file_id: FileId,
        album_id: AlbumId,
    },
    ResetState,
}

impl Mutation {
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::SetIsLoading => "set_is_loading",
            Mutation::SetFilesAndMeta { .. } => "set_files_and_meta",
            Mutation::RemoveFile { .. } => "remove_file",
            Mutation::SetFileAlbums { .. } => "set_file_albums",
            Mutation::AddAlbumToFile { .. } => "add_album_to_file",
            Mutation::RemoveAlbumFromFile { .. } => "remove_album_from_file",
            Mutation::ResetState => "reset_state",
        }
    }
}

impl FileListState {
    pub fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::SetIsLoading => {
                self.is_loading = true;
            }
            Mutation::SetFilesAndMeta {
                files,
                name,
                page,
                count,
            } => {
                self.set_files_and_meta(files, name.clone(), *page, *count);
            }
            Mutation::RemoveFile { file_id } => {
                self.remove_file(*file_id);
            }
            Mutation::SetFileAlbums { file_id, albums } => {
                self.files_albums.insert(*file_id, albums.clone());
            }
            Mutation::AddAlbumToFile { file_id, album } => {
                if let Some(albums) = self.files_albums.get_mut(file_id) {
                    albums.push(album.clone());
                }
            }
            Mutation::RemoveAlbumFromFile { file_id, album_id } => {
                if let Some(albums) = self.files_albums.get_mut(file_id) {
                    if let Some(pos) = albums.iter().position(|a| a.id == *album_id) {
                        albums.remove(pos);
                    }
                }
            }
            Mutation::ResetState => {
                *self = FileListState::new(self.pagination.limit);
            }
        }
    }

    fn set_files_and_meta(
        &mut self,
        files: &[File],
        name: Option<String>,
        page: Option<u32>,
        count: u64,
    ) {
        let limit = self.pagination.limit as usize;
        if files.len() > limit {
            tracing::warn!(
                received = files.len(),
                limit,
                "Server returned more files than the page limit, truncating"
            );
        }

        self.files = files.iter().take(limit).cloned().collect();
        self.name = name;
        self.is_loading = false;
        self.pagination.page = page.filter(|&p| p > 0).unwrap_or(1);
        self.pagination.total_files = count;
    }

    fn remove_file(&mut self, file_id: FileId) {
        if let Some(pos) = self.files.iter().position(|f| f.id == file_id) {
            self.files.remove(pos);
            self.pagination.total_files = self.pagination.total_files.saturating_sub(1);
        }
    }
}
