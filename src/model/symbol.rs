use crate::model::movie::MovieSymbol;
use crate::model::texture::TextureSymbol;

/// Dense index of a symbol inside its library's table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    Movie(MovieSymbol),
    Texture(TextureSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Movie(movie) => &movie.name,
            Symbol::Texture(texture) => &texture.name,
        }
    }

    pub fn as_movie(&self) -> Option<&MovieSymbol> {
        match self {
            Symbol::Movie(movie) => Some(movie),
            Symbol::Texture(_) => None,
        }
    }

    pub fn as_texture(&self) -> Option<&TextureSymbol> {
        match self {
            Symbol::Texture(texture) => Some(texture),
            Symbol::Movie(_) => None,
        }
    }
}
