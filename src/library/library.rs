use std::sync::Arc;

use crate::error::FlumpError;
use crate::library::instance::{Instance, MovieInstance, TextureInstance};
use crate::library::load::load_library;
use crate::model::{Symbol, SymbolTable};
use crate::texture::{AssetFetcher, asset_path};

pub const DEFAULT_MANIFEST: &str = "library.json";

/// A fully loaded and resolved Flump library.
///
/// Only ever constructed once every atlas is registered and every keyframe
/// reference resolved. The table is shared with the instances created from
/// it; packing rewrites texture regions copy-on-write.
#[derive(Debug, Clone)]
pub struct Library {
    frame_rate: f32,
    symbols: Arc<SymbolTable>,
}

impl Library {
    pub(crate) fn new(frame_rate: f32, symbols: SymbolTable) -> Self {
        Self {
            frame_rate,
            symbols: Arc::new(symbols),
        }
    }

    /// Loads `base_dir/library.json` and its atlases through `fetcher`.
    pub async fn from_assets<F: AssetFetcher>(
        base_dir: &str,
        fetcher: Arc<F>,
    ) -> Result<Self, FlumpError> {
        Self::from_assets_with(base_dir, DEFAULT_MANIFEST, fetcher).await
    }

    pub async fn from_assets_with<F: AssetFetcher>(
        base_dir: &str,
        manifest_name: &str,
        fetcher: Arc<F>,
    ) -> Result<Self, FlumpError> {
        let text = fetcher.fetch_text(&asset_path(base_dir, manifest_name)).await?;
        load_library(&text, base_dir, fetcher).await
    }

    /// Original frame rate of the movies in this library.
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.by_name(name)
    }

    pub fn symbol_names(&self) -> Vec<&str> {
        self.symbols.entries().into_iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn create_instance(&self, name: &str) -> Result<Instance, FlumpError> {
        self.symbols
            .lookup(name)
            .and_then(|id| Instance::create(&self.symbols, id, self.frame_rate))
            .ok_or_else(|| FlumpError::UnknownSymbol(name.to_string()))
    }

    pub fn create_movie(&self, name: &str) -> Result<MovieInstance, FlumpError> {
        match self.create_instance(name)? {
            Instance::Movie(movie) => Ok(movie),
            Instance::Texture(_) => Err(FlumpError::SymbolKind {
                name: name.to_string(),
                expected: "movie",
            }),
        }
    }

    pub fn create_texture(&self, name: &str) -> Result<TextureInstance, FlumpError> {
        match self.create_instance(name)? {
            Instance::Texture(texture) => Ok(texture),
            Instance::Movie(_) => Err(FlumpError::SymbolKind {
                name: name.to_string(),
                expected: "texture",
            }),
        }
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut SymbolTable {
        Arc::make_mut(&mut self.symbols)
    }
}
