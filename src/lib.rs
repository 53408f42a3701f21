//! Loader for Flump animation libraries.
//!
//! A library is a `library.json` manifest plus the texture atlases it names.
//! Atlases are fetched concurrently, keyframe references are resolved once
//! every atlas is in, and the result is an immutable [`Library`]. Several
//! loaded libraries can later be packed onto a shared set of atlases.

pub mod error;
pub mod library;
pub mod model;
pub mod parser;
pub mod settings;
pub mod texture;

pub use error::FlumpError;
pub use library::{
    Instance, Library, MovieInstance, RectPacker, ShelfPacker, TextureInstance, load_library,
    pack, pack_libraries,
};
pub use model::{
    KeyframeData, LayerData, MovieSymbol, Rect, Region, Symbol, SymbolId, SymbolTable,
    TextureSymbol,
};
pub use settings::LoaderSettings;
pub use texture::{AssetFetcher, FileFetcher, HttpFetcher};
