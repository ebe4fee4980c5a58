use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::models::{
    AddToAlbumResponse, AlbumId, AlbumLink, FileAlbums, FileId, FilesPage, PageQuery,
};
use super::{ApiError, FilesApi};
use crate::config::ApiConfig;

/// `FilesApi` backed by a reqwest client talking JSON to the API root.
pub struct HttpClient {
    base: Url,
    client: Client,
    token: Option<String>,
}

/// Error payload the API returns alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            base: base_url(&config.root)?,
            client,
            token: config.token.clone(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn paged_endpoint(&self, path: &str, query: PageQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.set_query(Some(&serde_qs::to_string(&query)?));
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "Sending API request");

        let req = self.client.request(method, url);
        match self.token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    format!("Request failed with status code {}", status.as_u16())
                });
            tracing::debug!(%status, %message, "API request failed");
            return Err(ApiError::Status { status, message });
        }

        // DELETE and the album removal endpoint may answer with no body at all
        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FilesApi for HttpClient {
    async fn list_files(&self, query: PageQuery) -> Result<FilesPage, ApiError> {
        let url = self.paged_endpoint("files", query)?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn list_album_files(
        &self,
        album_id: AlbumId,
        query: PageQuery,
    ) -> Result<FilesPage, ApiError> {
        let url = self.paged_endpoint(&format!("album/{album_id}/full"), query)?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn file_albums(&self, file_id: FileId) -> Result<FileAlbums, ApiError> {
        let url = self.endpoint(&format!("file/{file_id}/albums"))?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn add_to_album(&self, link: AlbumLink) -> Result<AddToAlbumResponse, ApiError> {
        let url = self.endpoint("file/album/add")?;
        self.send(self.request(Method::POST, url).json(&link)).await
    }

    async fn remove_from_album(&self, link: AlbumLink) -> Result<Value, ApiError> {
        let url = self.endpoint("file/album/del")?;
        self.send(self.request(Method::POST, url).json(&link)).await
    }

    async fn delete_file(&self, file_id: FileId) -> Result<Value, ApiError> {
        let url = self.endpoint(&format!("file/{file_id}"))?;
        self.send(self.request(Method::DELETE, url)).await
    }
}

/// Parse the API root, forcing a trailing slash so relative paths join beneath it.
pub(crate) fn base_url(root: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(root).map_err(|e| ApiError::InvalidUrl(format!("{root}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{root}: not a base URL")));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_appends_trailing_slash() {
        let url = base_url("http://localhost:5000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/");
        assert_eq!(
            url.join("file/3/albums").unwrap().as_str(),
            "http://localhost:5000/api/file/3/albums"
        );
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(matches!(
            base_url("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            base_url("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn paged_endpoint_encodes_query() {
        let client = HttpClient::new(&ApiConfig {
            root: "http://localhost:5000/api/".to_string(),
            token: None,
        })
        .unwrap();

        let url = client
            .paged_endpoint("album/4/full", PageQuery { limit: 30, page: 2 })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/album/4/full?limit=30&page=2"
        );
    }
}
