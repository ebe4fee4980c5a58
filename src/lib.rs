//! files-store - client-side state for a paginated file listing and album membership
//!
//! This crate provides:
//! - A typed client for the files/albums HTTP API (`FilesApi`, `HttpClient`)
//! - `FilesStore`, which owns the current page of files and the albums looked
//!   up per file, and commits every change as a `Mutation` subscribers can follow
//! - An alert channel for failures the store reports instead of returning

pub mod alert;
pub mod api;
pub mod config;
pub mod store;
#[cfg(test)]
pub mod testutil;

pub use alert::{Alert, AlertSink};
pub use api::{ApiError, FilesApi, HttpClient};
pub use store::{FileListState, FilesStore, Mutation};
