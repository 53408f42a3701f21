pub mod manifest;

pub use manifest::{
    AtlasManifest, KeyframeManifest, LayerManifest, LibraryManifest, MovieManifest,
    TextureGroupManifest, TextureManifest,
};
