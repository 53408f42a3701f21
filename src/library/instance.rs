use image::RgbaImage;
use std::sync::Arc;

use crate::model::{LayerData, MovieSymbol, Region, Symbol, SymbolId, SymbolTable, TextureSymbol};

/// A runtime object produced from a library symbol.
#[derive(Debug, Clone)]
pub enum Instance {
    Movie(MovieInstance),
    Texture(TextureInstance),
}

impl Instance {
    /// Builds an instance of symbol `id`. Never touches the table itself.
    pub(crate) fn create(table: &Arc<SymbolTable>, id: SymbolId, frame_rate: f32) -> Option<Self> {
        let instance = match table.get(id)? {
            Symbol::Movie(_) => Instance::Movie(MovieInstance {
                table: Arc::clone(table),
                id,
                frame_rate,
            }),
            Symbol::Texture(texture) => Instance::Texture(TextureInstance {
                symbol: texture.clone(),
            }),
        };
        Some(instance)
    }

    pub fn name(&self) -> &str {
        match self {
            Instance::Movie(movie) => &movie.symbol().name,
            Instance::Texture(texture) => &texture.symbol.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextureInstance {
    symbol: TextureSymbol,
}

impl TextureInstance {
    pub fn symbol(&self) -> &TextureSymbol {
        &self.symbol
    }

    pub fn region(&self) -> &Region {
        &self.symbol.region
    }

    pub fn origin(&self) -> [f32; 2] {
        self.symbol.origin
    }

    pub fn to_image(&self) -> RgbaImage {
        self.symbol.region.to_image()
    }
}

/// A movie bound to the library table it came from.
///
/// Children are created on demand, so a movie that ends up referencing
/// itself does not recurse at construction.
#[derive(Debug, Clone)]
pub struct MovieInstance {
    table: Arc<SymbolTable>,
    id: SymbolId,
    frame_rate: f32,
}

impl MovieInstance {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn symbol(&self) -> &MovieSymbol {
        match self.table.get(self.id) {
            Some(Symbol::Movie(movie)) => movie,
            _ => unreachable!("movie instance bound to a non-movie symbol"),
        }
    }

    pub fn layers(&self) -> &[LayerData] {
        &self.symbol().layers
    }

    pub fn frames(&self) -> u32 {
        self.symbol().frames()
    }

    pub fn duration(&self) -> f32 {
        self.symbol().duration(self.frame_rate)
    }

    /// The one symbol shown by `layer`, if it never switches symbols.
    pub fn layer_symbol(&self, layer: usize) -> Option<SymbolId> {
        let layer = self.layers().get(layer)?;
        if layer.multiple_symbols() {
            return None;
        }
        layer.last_symbol()
    }

    /// Instantiates the symbol displayed by a keyframe.
    pub fn child(&self, layer: usize, keyframe: usize) -> Option<Instance> {
        let id = self.layers().get(layer)?.keyframes.get(keyframe)?.symbol()?;
        Instance::create(&self.table, id, self.frame_rate)
    }
}
