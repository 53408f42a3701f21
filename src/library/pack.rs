use image::RgbaImage;
use log::info;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::FlumpError;
use crate::library::Library;
use crate::model::{Rect, Region, Symbol, SymbolId};

/// Rectangle packing service consumed by [`pack_libraries`].
///
/// Given every region keyed by a unique name, it must return a region of the
/// same size for each key, cut from the atlases it produced.
pub trait RectPacker {
    fn pack(&mut self, regions: &BTreeMap<String, Region>) -> HashMap<String, Region>;
}

/// Places regions on horizontal shelves, tallest first, and draws the
/// resulting pages. Regions larger than a page get a page of their own.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    page_size: u32,
    padding: u32,
    pages: Vec<Arc<RgbaImage>>,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self::new(2048, 1)
    }
}

impl ShelfPacker {
    pub fn new(page_size: u32, padding: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            padding,
            pages: Vec::new(),
        }
    }

    /// Pages produced by the last call to [`RectPacker::pack`].
    pub fn pages(&self) -> &[Arc<RgbaImage>] {
        &self.pages
    }
}

#[derive(Debug, Default)]
struct Shelves {
    cursor_x: u32,
    shelf_y: u32,
    shelf_height: u32,
    width: u32,
    height: u32,
    sealed: bool,
    placed: Vec<(String, Rect)>,
}

impl Shelves {
    fn starting_with(key: &str, width: u32, height: u32, padding: u32, sealed: bool) -> Self {
        Self {
            cursor_x: width + padding,
            shelf_y: 0,
            shelf_height: height,
            width,
            height,
            sealed,
            placed: vec![(key.to_string(), Rect::new(0, 0, width, height))],
        }
    }

    fn allocate(&mut self, key: &str, width: u32, height: u32, size: u32, padding: u32) -> bool {
        if self.sealed {
            return false;
        }
        if self.cursor_x + width > size {
            self.shelf_y += self.shelf_height + padding;
            self.cursor_x = 0;
            self.shelf_height = 0;
        }
        if self.shelf_y + height > size {
            self.sealed = true;
            return false;
        }

        let rect = Rect::new(self.cursor_x, self.shelf_y, width, height);
        self.cursor_x += width + padding;
        self.shelf_height = self.shelf_height.max(height);
        self.width = self.width.max(rect.right());
        self.height = self.height.max(rect.bottom());
        self.placed.push((key.to_string(), rect));
        true
    }
}

impl RectPacker for ShelfPacker {
    fn pack(&mut self, regions: &BTreeMap<String, Region>) -> HashMap<String, Region> {
        let mut order: Vec<(&String, &Region)> = regions.iter().collect();
        order.sort_by(|a, b| b.1.height().cmp(&a.1.height()).then_with(|| a.0.cmp(b.0)));

        let mut layouts: Vec<Shelves> = Vec::new();
        for (key, region) in order {
            let (width, height) = (region.width(), region.height());
            if width > self.page_size || height > self.page_size {
                layouts.push(Shelves::starting_with(key, width, height, self.padding, true));
                continue;
            }

            let placed = layouts
                .iter_mut()
                .rev()
                .find(|page| !page.sealed)
                .is_some_and(|page| {
                    page.allocate(key, width, height, self.page_size, self.padding)
                });
            if !placed {
                layouts.push(Shelves::starting_with(key, width, height, self.padding, false));
            }
        }

        self.pages.clear();
        let mut packed = HashMap::with_capacity(regions.len());
        for layout in layouts {
            let mut image = RgbaImage::new(layout.width.max(1), layout.height.max(1));
            for (key, rect) in &layout.placed {
                if let Some(source) = regions.get(key) {
                    image::imageops::replace(&mut image, &source.to_image(), rect.x as i64, rect.y as i64);
                }
            }

            let page = Arc::new(image);
            for (key, rect) in layout.placed {
                packed.insert(key, Region::new(Arc::clone(&page), rect));
            }
            self.pages.push(page);
        }
        packed
    }
}

fn texture_key(library: usize, name: &str) -> String {
    format!("{}:{}", library, name)
}

fn texture_ids(library: &Library) -> Vec<(String, SymbolId)> {
    let symbols = library.symbols();
    symbols
        .entries()
        .into_iter()
        .filter(|(_, id)| matches!(symbols.get(*id), Some(Symbol::Texture(_))))
        .map(|(name, id)| (name.to_string(), id))
        .collect()
}

/// Moves every texture of `libraries` onto the atlases produced by `packer`.
///
/// Keys are `"<library index>:<symbol name>"` so equal names in different
/// libraries never collide. The packer's answer is checked in full before
/// any symbol is touched; an incomplete answer leaves every library as it was.
pub fn pack_libraries<P: RectPacker>(
    libraries: &mut [Library],
    packer: &mut P,
) -> Result<(), FlumpError> {
    let targets: Vec<Vec<(String, SymbolId)>> = libraries.iter().map(texture_ids).collect();

    let mut regions = BTreeMap::new();
    for (index, (library, textures)) in libraries.iter().zip(&targets).enumerate() {
        for (name, id) in textures {
            if let Some(Symbol::Texture(texture)) = library.symbols().get(*id) {
                regions.insert(texture_key(index, name), texture.region.clone());
            }
        }
    }

    let packed = packer.pack(&regions);
    for (key, region) in &regions {
        match packed.get(key) {
            Some(new) if new.width() == region.width() && new.height() == region.height() => {}
            _ => return Err(FlumpError::PackingConsistency { key: key.clone() }),
        }
    }

    for (index, (library, textures)) in libraries.iter_mut().zip(&targets).enumerate() {
        let table = library.symbols_mut();
        for (name, id) in textures {
            if let (Some(Symbol::Texture(texture)), Some(region)) =
                (table.get_mut(*id), packed.get(&texture_key(index, name)))
            {
                texture.region = region.clone();
            }
        }
    }

    info!(
        "packed {} textures from {} libraries",
        regions.len(),
        libraries.len()
    );
    Ok(())
}

/// Packs with a default [`ShelfPacker`] and returns the new atlas pages.
pub fn pack(libraries: &mut [Library]) -> Result<Vec<Arc<RgbaImage>>, FlumpError> {
    let mut packer = ShelfPacker::default();
    pack_libraries(libraries, &mut packer)?;
    Ok(packer.pages().to_vec())
}
