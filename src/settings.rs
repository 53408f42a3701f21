use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFY_APP_NAME: &str = "flump-rs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// File name of the manifest inside a library directory.
    pub manifest_name: String,
    pub pack_page_size: u32,
    pub pack_padding: u32,
    pub pack_output_dir: Option<PathBuf>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            manifest_name: "library.json".to_string(),
            pack_page_size: 2048,
            pack_padding: 1,
            pack_output_dir: None,
        }
    }
}

impl LoaderSettings {
    pub fn load() -> Self {
        confy::get_configuration_file_path(CONFY_APP_NAME, "loader")
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        let path = confy::get_configuration_file_path(CONFY_APP_NAME, "loader")?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.toml");

        let settings = LoaderSettings {
            manifest_name: "bundle.json".to_string(),
            pack_page_size: 512,
            pack_padding: 2,
            pack_output_dir: Some(PathBuf::from("packed")),
        };
        settings.save_to(&path).unwrap();

        let loaded = LoaderSettings::load_from(&path).unwrap();
        assert_eq!(loaded.manifest_name, "bundle.json");
        assert_eq!(loaded.pack_page_size, 512);
        assert_eq!(loaded.pack_padding, 2);
        assert_eq!(loaded.pack_output_dir, Some(PathBuf::from("packed")));
    }
}
