mod movie;
mod symbol;
mod table;
mod texture;

pub use movie::*;
pub use symbol::*;
pub use table::*;
pub use texture::*;
