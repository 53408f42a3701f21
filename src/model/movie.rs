use crate::model::symbol::SymbolId;
use crate::parser::{KeyframeManifest, LayerManifest, MovieManifest};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeData {
    pub index: u32,
    pub duration: u32,
    pub label: Option<String>,
    pub loc: [f32; 2],
    pub scale: [f32; 2],
    pub skew: [f32; 2],
    pub pivot: [f32; 2],
    pub alpha: f32,
    pub visible: bool,
    pub ease: f32,
    pub tweened: bool,
    pub(crate) symbol_name: Option<String>,
    pub(crate) symbol: Option<SymbolId>,
}

impl KeyframeData {
    pub fn from_manifest(keyframe: &KeyframeManifest) -> Self {
        Self {
            index: keyframe.index,
            duration: keyframe.duration,
            label: keyframe.label.clone(),
            loc: keyframe.loc.unwrap_or([0.0, 0.0]),
            scale: keyframe.scale.unwrap_or([1.0, 1.0]),
            skew: keyframe.skew.unwrap_or([0.0, 0.0]),
            pivot: keyframe.pivot.unwrap_or([0.0, 0.0]),
            alpha: keyframe.alpha.unwrap_or(1.0),
            visible: keyframe.visible.unwrap_or(true),
            ease: keyframe.ease.unwrap_or(0.0),
            tweened: keyframe.tweened.unwrap_or(true),
            symbol_name: keyframe.symbol_name.clone(),
            symbol: None,
        }
    }

    pub fn symbol_name(&self) -> Option<&str> {
        self.symbol_name.as_deref()
    }

    /// The symbol this keyframe displays, once the library has been resolved.
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    pub name: String,
    pub flipbook: bool,
    pub keyframes: Vec<KeyframeData>,
    pub(crate) last_symbol: Option<SymbolId>,
    pub(crate) multiple_symbols: bool,
}

impl LayerData {
    pub fn from_manifest(layer: &LayerManifest) -> Self {
        Self {
            name: layer.name.clone(),
            flipbook: layer.flipbook,
            keyframes: layer.keyframes.iter().map(KeyframeData::from_manifest).collect(),
            last_symbol: None,
            multiple_symbols: false,
        }
    }

    pub fn last_symbol(&self) -> Option<SymbolId> {
        self.last_symbol
    }

    /// True when keyframes on this layer show more than one distinct symbol.
    pub fn multiple_symbols(&self) -> bool {
        self.multiple_symbols
    }

    /// Frame just past the end of the last keyframe.
    pub fn frames(&self) -> u32 {
        self.keyframes
            .last()
            .map(|kf| kf.index + kf.duration)
            .unwrap_or(0)
    }

    pub(crate) fn record_symbol(&mut self, id: SymbolId) {
        if self.last_symbol.is_some_and(|last| last != id) {
            self.multiple_symbols = true;
        }
        self.last_symbol = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieSymbol {
    pub name: String,
    pub layers: Vec<LayerData>,
}

impl MovieSymbol {
    /// Builds an unresolved movie. Keyframe references stay name-based until
    /// the whole library has been registered.
    pub fn from_manifest(movie: &MovieManifest) -> Self {
        Self {
            name: movie.id.clone(),
            layers: movie.layers.iter().map(LayerData::from_manifest).collect(),
        }
    }

    pub fn frames(&self) -> u32 {
        self.layers.iter().map(LayerData::frames).max().unwrap_or(0)
    }

    /// Length in seconds when played at `frame_rate`.
    pub fn duration(&self, frame_rate: f32) -> f32 {
        if frame_rate <= 0.0 {
            return 0.0;
        }
        self.frames() as f32 / frame_rate
    }
}
