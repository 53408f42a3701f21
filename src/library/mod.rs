mod instance;
#[allow(clippy::module_inception)]
mod library;
mod load;
mod pack;
mod resolve;

pub use instance::{Instance, MovieInstance, TextureInstance};
pub use library::{DEFAULT_MANIFEST, Library};
pub use load::load_library;
pub use pack::{RectPacker, ShelfPacker, pack, pack_libraries};
