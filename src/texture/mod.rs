pub mod loader;

pub use loader::{AssetFetcher, FileFetcher, HttpFetcher, asset_path, decode_image};
