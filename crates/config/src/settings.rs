// Application settings
// Loaded from ~/.config/pagetemplate/settings.json

use crate::error::ConfigError;
use pagetemplate_core::{serialize, PageTemplate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What the template editor needs from a settings backend.
///
/// Passed explicitly to whoever edits the template; there is no global store.
pub trait SettingsStore {
    /// Last persisted page template descriptor
    fn page_template(&self) -> String;

    fn set_page_template(&mut self, descriptor: String);

    /// Preferred display unit, as an index into the unit table
    fn size_unit_index(&self) -> usize;

    /// Folder the last template file was saved to
    fn last_template_dir(&self) -> Option<PathBuf>;

    fn set_last_template_dir(&mut self, dir: PathBuf);

    /// Write pending changes to the backing storage
    fn persist(&mut self) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Page template
    #[serde(rename = "page.template")]
    pub page_template: String,

    // Units
    #[serde(rename = "units.sizeUnitIndex")]
    pub size_unit_index: usize,

    // File
    #[serde(rename = "file.lastTemplateDir")]
    pub last_template_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_template: serialize(&PageTemplate::default()),
            size_unit_index: 0, // cm
            last_template_dir: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagetemplate");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, creating a commented default
    /// file on first run.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Strict variant of [`Settings::load_from`]. A missing file is not an error.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save current settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::io(path, e))
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = format!(
            r#"{{
    // Default look of new pages:
    // "<width pt> <height pt> <#RRGGBB> <none|lined|ruled|graph> <copy last page: true|false>"
    "page.template": "{}",

    // Unit for page sizes: 0 = cm, 1 = in, 2 = mm, 3 = pt
    "units.sizeUnitIndex": 0,

    // Folder of the last saved .xojt template
    "file.lastTemplateDir": null
}}
"#,
            self.page_template
        );

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}

/// Settings bound to the JSON file they came from
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    settings: Settings,
    /// Why the existing file could not be read. While set, the store serves
    /// defaults but refuses to persist over the user's file.
    load_error: Option<ConfigError>,
}

impl FileSettingsStore {
    /// Open the store at the default config location
    pub fn open_default() -> Self {
        let path = Settings::config_path();
        if path.exists() {
            Self::open(path)
        } else {
            Self { path, settings: Settings::load(), load_error: None }
        }
    }

    /// Open the store at `path`. A missing file gives defaults; an unreadable
    /// or malformed one gives defaults and makes the store read-only.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Settings::try_load_from(&path) {
            Ok(settings) => Self { path, settings, load_error: None },
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self { path, settings: Settings::default(), load_error: Some(e) }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load failure that keeps `persist` from writing, if any
    pub fn load_error(&self) -> Option<&ConfigError> {
        self.load_error.as_ref()
    }
}

impl SettingsStore for FileSettingsStore {
    fn page_template(&self) -> String {
        self.settings.page_template.clone()
    }

    fn set_page_template(&mut self, descriptor: String) {
        self.settings.page_template = descriptor;
    }

    fn size_unit_index(&self) -> usize {
        self.settings.size_unit_index
    }

    fn last_template_dir(&self) -> Option<PathBuf> {
        self.settings.last_template_dir.clone()
    }

    fn set_last_template_dir(&mut self, dir: PathBuf) {
        self.settings.last_template_dir = Some(dir);
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        if let Some(e) = &self.load_error {
            return Err(e.clone());
        }
        self.settings.save_to(&self.path)?;
        log::info!("settings saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store, for embedding and tests. `persist` only counts calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub settings: Settings,
    pub persist_count: usize,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings, persist_count: 0 }
    }
}

impl SettingsStore for MemoryStore {
    fn page_template(&self) -> String {
        self.settings.page_template.clone()
    }

    fn set_page_template(&mut self, descriptor: String) {
        self.settings.page_template = descriptor;
    }

    fn size_unit_index(&self) -> usize {
        self.settings.size_unit_index
    }

    fn last_template_dir(&self) -> Option<PathBuf> {
        self.settings.last_template_dir.clone()
    }

    fn set_last_template_dir(&mut self, dir: PathBuf) {
        self.settings.last_template_dir = Some(dir);
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        self.persist_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_a4_plain() {
        let settings = Settings::default();
        assert_eq!(settings.page_template, "595.28 841.89 #FFFFFF none false");
        assert_eq!(settings.size_unit_index, 0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert_eq!(Settings::try_load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            page_template: "100.00 200.00 #000000 graph true".to_string(),
            size_unit_index: 2,
            last_template_dir: Some(PathBuf::from("/tmp/templates")),
        };
        settings.save_to(&path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"page.template\""));
        assert!(json.contains("\"units.sizeUnitIndex\": 2"));

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_comments_and_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            "{\n  // unit\n  \"units.sizeUnitIndex\": 1\n}\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.size_unit_index, 1);
        assert_eq!(settings.page_template, Settings::default().page_template);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::try_load_from(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_default_file_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        Settings::default().create_default_file(&path);

        assert_eq!(Settings::try_load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_keeps_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        // Trailing comma: invalid JSON, but the user's values are still in there
        let original = "{\"units.sizeUnitIndex\": 3, \"file.lastTemplateDir\": \"/home/me/tpl\",}";
        fs::write(&path, original).unwrap();

        let mut store = FileSettingsStore::open(&path);
        assert!(matches!(store.load_error(), Some(ConfigError::Parse { .. })));
        assert_eq!(store.size_unit_index(), 0);

        store.set_page_template("100.00 200.00 #FFFFFF none false".to_string());
        assert!(matches!(store.persist(), Err(ConfigError::Parse { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_file_store_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = FileSettingsStore::open(&path);
        store.set_page_template("300.00 400.00 #FFFFFF lined false".to_string());
        store.set_last_template_dir(dir.path().to_path_buf());
        store.persist().unwrap();

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(reopened.page_template(), "300.00 400.00 #FFFFFF lined false");
        assert_eq!(reopened.last_template_dir(), Some(dir.path().to_path_buf()));
    }
}
