use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type FileId = u64;
pub type AlbumId = u64;

/// An uploaded file as reported by the API.
/// Only `id` is interpreted; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: FileId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl File {
    pub fn new(id: FileId) -> Self {
        Self {
            id,
            extra: Map::new(),
        }
    }
}

/// An album a file can belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Album {
    pub fn new(id: AlbumId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

/// One page of a file listing (`GET files`, `GET album/{id}/full`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<File>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Albums containing a file (`GET file/{id}/albums`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileAlbums {
    #[serde(default, deserialize_with = "null_as_default")]
    pub albums: Vec<Album>,
}

/// Request body shared by the add/remove album association endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumLink {
    pub file_id: FileId,
    pub album_id: AlbumId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddToAlbumResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: AddedAlbum,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddedAlbum {
    #[serde(default)]
    pub album: Option<Album>,
}

/// Query parameters for paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub limit: u32,
    pub page: u32,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
