use image::RgbaImage;
use log::{debug, info};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::FlumpError;
use crate::library::Library;
use crate::library::resolve::resolve_references;
use crate::model::{MovieSymbol, Symbol, SymbolId, TableBuilder, TextureSymbol};
use crate::parser::{AtlasManifest, LibraryManifest};
use crate::texture::{AssetFetcher, asset_path};

/// Builds a [`Library`] from manifest text, fetching every atlas under
/// `base_path` concurrently.
///
/// 1. Movie stubs are registered straight away and a texture slot is
///    reserved for every declared texture.
/// 2. One fetch task per atlas is spawned; this task alone consumes the
///    completions, so the remaining-count needs no further locking.
/// 3. When the last atlas lands the references are resolved exactly once.
///
/// The first failure is returned as-is. Sibling fetches keep running in the
/// background and their results are dropped; no library is produced.
pub async fn load_library<F: AssetFetcher>(
    manifest_text: &str,
    base_path: &str,
    fetcher: Arc<F>,
) -> Result<Library, FlumpError> {
    let manifest = LibraryManifest::from_json(manifest_text)?;

    let mut table = TableBuilder::new();
    for movie in &manifest.movies {
        table.insert(Symbol::Movie(MovieSymbol::from_manifest(movie)));
    }

    let atlases = manifest.atlases();
    let slots: Vec<Vec<SymbolId>> = atlases
        .iter()
        .map(|atlas| {
            atlas
                .textures
                .iter()
                .map(|texture| table.reserve(&texture.symbol))
                .collect()
        })
        .collect();

    let mut remaining = atlases.len();
    if remaining > 0 {
        let mut pending = JoinSet::new();
        for (index, atlas) in atlases.iter().enumerate() {
            let path = asset_path(base_path, &atlas.file);
            let fetcher = Arc::clone(&fetcher);
            pending.spawn(async move { (index, fetcher.fetch_image(&path).await) });
        }

        while let Some(joined) = pending.join_next().await {
            let registered = joined.map_err(FlumpError::from).and_then(|(index, image)| {
                register_atlas(&mut table, &atlases[index], &slots[index], image?)
            });
            if let Err(err) = registered {
                pending.detach_all();
                return Err(err);
            }

            remaining -= 1;
            debug!("{} atlases remaining for '{}'", remaining, base_path);
        }
    }

    let mut symbols = table.build().map_err(|table| {
        FlumpError::fetch(
            base_path,
            format!("{} textures were never registered", table.pending()),
        )
    })?;
    resolve_references(&mut symbols)?;

    info!(
        "loaded library '{}': {} symbols from {} atlases at {} fps",
        base_path,
        symbols.len(),
        atlases.len(),
        manifest.frame_rate
    );
    Ok(Library::new(manifest.frame_rate, symbols))
}

fn register_atlas(
    table: &mut TableBuilder,
    atlas: &AtlasManifest,
    slots: &[SymbolId],
    image: RgbaImage,
) -> Result<(), FlumpError> {
    let image = Arc::new(image);
    for (texture, id) in atlas.textures.iter().zip(slots) {
        let symbol = TextureSymbol::from_manifest(texture, &image, &atlas.file)?;
        let filled = table.fill(*id, Symbol::Texture(symbol));
        debug_assert!(filled, "texture '{}' has no reserved slot", texture.symbol);
    }
    debug!(
        "registered {} textures from atlas '{}'",
        atlas.textures.len(),
        atlas.file
    );
    Ok(())
}
