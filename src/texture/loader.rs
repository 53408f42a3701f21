use image::RgbaImage;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::FlumpError;

/// Transport used to pull a library's manifest and atlases.
///
/// Implementations must be shareable across the fetch tasks of one load.
pub trait AssetFetcher: Send + Sync + 'static {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, FlumpError>> + Send;

    fn fetch_image(&self, path: &str)
    -> impl Future<Output = Result<RgbaImage, FlumpError>> + Send;
}

/// Joins a library base path and a file name the way manifests expect.
pub fn asset_path(base: &str, file: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file)
}

/// Decode atlas bytes, picking BLP or a regular image format by extension.
pub fn decode_image(path: &str, data: &[u8]) -> Result<RgbaImage, FlumpError> {
    let is_blp = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("blp"));

    if is_blp {
        let img = blp::core::decode::decode_to_rgba(data).map_err(|e| FlumpError::fetch(path, e))?;
        return Ok(img.to_rgba8());
    }

    let img = image::load_from_memory(data).map_err(|e| FlumpError::fetch(path, e))?;
    Ok(img.to_rgba8())
}

/// Reads assets from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every requested path relative to `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl AssetFetcher for FileFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FlumpError> {
        tokio::fs::read_to_string(self.resolve(path))
            .await
            .map_err(|e| FlumpError::fetch(path, e))
    }

    async fn fetch_image(&self, path: &str) -> Result<RgbaImage, FlumpError> {
        let data = tokio::fs::read(self.resolve(path))
            .await
            .map_err(|e| FlumpError::fetch(path, e))?;
        decode_image(path, &data)
    }
}

/// Downloads assets over HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn download(&self, url: &str) -> Result<reqwest::Response, FlumpError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FlumpError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(FlumpError::fetch(url, format!("HTTP {}", response.status())));
        }
        Ok(response)
    }
}

impl AssetFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FlumpError> {
        let response = self.download(url).await?;
        response.text().await.map_err(|e| FlumpError::fetch(url, e))
    }

    async fn fetch_image(&self, url: &str) -> Result<RgbaImage, FlumpError> {
        let response = self.download(url).await?;
        let bytes = response.bytes().await.map_err(|e| FlumpError::fetch(url, e))?;
        decode_image(url, &bytes)
    }
}
