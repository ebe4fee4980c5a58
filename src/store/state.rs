use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::models::{Album, File, FileId};

pub const DEFAULT_PAGE_LIMIT: u32 = 30;

/// Which slice of the full file set is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_files: u64,
}

/// The file listing held by a `FilesStore`.
///
/// Fields are only writable through [`FileListState::apply`]; everything else
/// reads through the accessors and getters below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListState {
    pub(super) files: Vec<File>,
    pub(super) is_loading: bool,
    pub(super) pagination: Pagination,
    pub(super) name: Option<String>,
    pub(super) download_enabled: bool,
    /// Albums per file, only for files whose albums were looked up
    pub(super) files_albums: HashMap<FileId, Vec<Album>>,
}

impl Default for FileListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl FileListState {
    /// A limit of 0 is raised to 1.
    pub fn new(limit: u32) -> Self {
        let limit = limit.max(1);

        Self {
            files: Vec::new(),
            is_loading: false,
            pagination: Pagination {
                page: 1,
                limit,
                total_files: 0,
            },
            name: None,
            download_enabled: false,
            files_albums: HashMap::new(),
        }
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn download_enabled(&self) -> bool {
        self.download_enabled
    }

    pub fn files_albums(&self) -> &HashMap<FileId, Vec<Album>> {
        &self.files_albums
    }

    /// Albums loaded for `file_id`, `None` if they were never looked up.
    pub fn albums_for(&self, file_id: FileId) -> Option<&[Album]> {
        self.files_albums.get(&file_id).map(Vec::as_slice)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn total_files(&self) -> u64 {
        self.pagination.total_files
    }

    pub fn fetched_count(&self) -> usize {
        self.files.len()
    }

    pub fn should_paginate(&self) -> bool {
        self.pagination.total_files > u64::from(self.pagination.limit)
    }

    pub fn limit(&self) -> u32 {
        self.pagination.limit
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
