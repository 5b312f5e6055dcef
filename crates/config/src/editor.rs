//! Page template editor
//!
//! Holds the template being edited and the settings store it belongs to.
//! A front end (dialog, CLI) fills its controls from the getters and writes
//! user choices back through the setters; it keeps no state of its own.

use crate::error::ConfigError;
use crate::settings::SettingsStore;
use crate::template_file::{default_file_name, read_template, write_template};
use chrono::Local;
use pagetemplate_core::{parse, serialize, BackgroundType, PageTemplate, TemplateError, UnitTable};
use std::path::{Path, PathBuf};

/// Entry of the background selector
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundChoice {
    pub label: &'static str,
    pub background_type: BackgroundType,
}

/// Backgrounds a user can pick, in display order
pub fn background_choices() -> [BackgroundChoice; 4] {
    [
        BackgroundChoice { label: "Plain", background_type: BackgroundType::None },
        BackgroundChoice { label: "Lined", background_type: BackgroundType::Lined },
        BackgroundChoice { label: "Ruled", background_type: BackgroundType::Ruled },
        BackgroundChoice { label: "Graph", background_type: BackgroundType::Graph },
    ]
}

pub struct TemplateEditor<S: SettingsStore> {
    store: S,
    template: PageTemplate,
}

impl<S: SettingsStore> TemplateEditor<S> {
    /// Start editing the template currently held by `store`
    pub fn open(store: S) -> Self {
        let template = parse(&store.page_template());
        Self { store, template }
    }

    pub fn template(&self) -> &PageTemplate {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut PageTemplate {
        &mut self.template
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Selector position for the current background. Types that are not in
    /// the list (e.g. from a newer version) show as the first entry; the
    /// stored type is left alone until the user picks one.
    pub fn active_background_index(&self) -> usize {
        background_choices()
            .iter()
            .position(|c| &c.background_type == self.template.background_type())
            .unwrap_or(0)
    }

    pub fn select_background(&mut self, index: usize) -> Result<(), TemplateError> {
        let choices = background_choices();
        let len = choices.len();
        let choice = choices
            .into_iter()
            .nth(index)
            .ok_or(TemplateError::UnknownChoice { index, len })?;
        self.template.set_background_type(choice.background_type)
    }

    /// Apply a size picked by the user. A width <= 0 means the picker was
    /// cancelled: nothing changes and `Ok(false)` is returned.
    pub fn set_page_size(&mut self, width: f64, height: f64) -> Result<bool, TemplateError> {
        if width <= 0.0 {
            return Ok(false);
        }
        self.template.set_page_size(width, height)?;
        Ok(true)
    }

    /// Page size in the user's preferred unit, e.g. `"21.00cm x 29.70cm"`
    pub fn page_size_label(&self) -> String {
        let table = UnitTable::standard();
        let mut index = self.store.size_unit_index();
        if index >= table.len() {
            log::warn!("size unit index {index} out of range, using {}", table.entries()[0].name);
            index = 0;
        }
        table.format_size(self.template.page_width(), self.template.page_height(), index)
    }

    /// Store the edited template in the settings and persist them
    pub fn apply(&mut self) -> Result<(), ConfigError> {
        self.store.set_page_template(serialize(&self.template));
        self.store.persist()
    }

    /// Replace the edited template with the content of a template file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.template = read_template(path)?;
        Ok(())
    }

    /// Apply, then write the template to `path` and remember its folder.
    /// The folder is stored absolute so it stays valid from any working directory.
    pub fn save_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.store.set_page_template(serialize(&self.template));
        write_template(path, &self.template)?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        match std::path::absolute(parent) {
            Ok(dir) => self.store.set_last_template_dir(dir),
            Err(e) => log::warn!("cannot resolve {}: {e}", parent.display()),
        }
        self.store.persist()
    }

    /// Where a save without an explicit path goes
    pub fn default_save_path(&self) -> PathBuf {
        let dir = self.store.last_template_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(default_file_name(&Local::now()))
    }
}
