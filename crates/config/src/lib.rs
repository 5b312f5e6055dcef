// Configuration: settings store, .xojt template files, template editor

pub mod editor;
pub mod error;
pub mod settings;
pub mod template_file;

pub use editor::{background_choices, BackgroundChoice, TemplateEditor};
pub use error::ConfigError;
pub use settings::{FileSettingsStore, MemoryStore, Settings, SettingsStore};
pub use template_file::{read_template, write_template, TEMPLATE_EXTENSION};
