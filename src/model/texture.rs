use image::RgbaImage;
use std::sync::Arc;

use crate::error::FlumpError;
use crate::parser::TextureManifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A rectangle cut from a shared atlas image.
#[derive(Debug, Clone)]
pub struct Region {
    pub atlas: Arc<RgbaImage>,
    pub rect: Rect,
}

impl Region {
    pub fn new(atlas: Arc<RgbaImage>, rect: Rect) -> Self {
        Self { atlas, rect }
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    pub fn same_atlas(&self, other: &Region) -> bool {
        Arc::ptr_eq(&self.atlas, &other.atlas)
    }

    /// Copies the region's pixels out of its atlas.
    pub fn to_image(&self) -> RgbaImage {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        image::imageops::crop_imm(&*self.atlas, x, y, width, height).to_image()
    }
}

#[derive(Debug, Clone)]
pub struct TextureSymbol {
    pub name: String,
    pub origin: [f32; 2],
    /// Rewritten in place when libraries are packed together.
    pub region: Region,
}

impl TextureSymbol {
    pub fn from_manifest(
        texture: &TextureManifest,
        atlas: &Arc<RgbaImage>,
        file: &str,
    ) -> Result<Self, FlumpError> {
        let [x, y, width, height] = texture.rect;
        let inside = |start: u32, len: u32, limit: u32| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !inside(x, width, atlas.width()) || !inside(y, height, atlas.height()) {
            return Err(FlumpError::RegionOutOfBounds {
                name: texture.symbol.clone(),
                file: file.to_string(),
            });
        }

        Ok(Self {
            name: texture.symbol.clone(),
            origin: texture.origin,
            region: Region::new(Arc::clone(atlas), Rect::new(x, y, width, height)),
        })
    }
}
