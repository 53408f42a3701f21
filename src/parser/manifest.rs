use serde::{Deserialize, Serialize};

use crate::error::FlumpError;

/// Top level of a Flump `library.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryManifest {
    pub frame_rate: f32,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub movies: Vec<MovieManifest>,
    #[serde(default)]
    pub texture_groups: Vec<TextureGroupManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieManifest {
    #[serde(alias = "name")]
    pub id: String,
    #[serde(default)]
    pub layers: Vec<LayerManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flipbook: bool,
    #[serde(default)]
    pub keyframes: Vec<KeyframeManifest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyframeManifest {
    #[serde(default)]
    pub index: u32,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(rename = "ref", alias = "symbolName", default)]
    pub symbol_name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub loc: Option<[f32; 2]>,
    #[serde(default)]
    pub scale: Option<[f32; 2]>,
    #[serde(default)]
    pub skew: Option<[f32; 2]>,
    #[serde(default)]
    pub pivot: Option<[f32; 2]>,
    #[serde(default)]
    pub alpha: Option<f32>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub ease: Option<f32>,
    #[serde(default)]
    pub tweened: Option<bool>,
}

fn default_duration() -> u32 {
    1
}

fn default_scale_factor() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureGroupManifest {
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    #[serde(default)]
    pub atlases: Vec<AtlasManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub file: String,
    #[serde(default)]
    pub textures: Vec<TextureManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(alias = "name")]
    pub symbol: String,
    /// `[x, y, width, height]` inside the atlas, in pixels.
    pub rect: [u32; 4],
    #[serde(default)]
    pub origin: [f32; 2],
}

impl LibraryManifest {
    pub fn from_json(text: &str) -> Result<Self, FlumpError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Atlases of the first texture group. Other scale factors are not loaded.
    pub fn atlases(&self) -> &[AtlasManifest] {
        if self.texture_groups.len() > 1 {
            log::warn!(
                "library declares {} texture groups, only scale factor {} is loaded",
                self.texture_groups.len(),
                self.texture_groups[0].scale_factor
            );
        }
        self.texture_groups
            .first()
            .map(|group| group.atlases.as_slice())
            .unwrap_or(&[])
    }
}
