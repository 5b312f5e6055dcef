// Standalone template files (.xojt)
// The whole file is one descriptor; no header, no trailing newline.

use crate::error::ConfigError;
use chrono::{DateTime, TimeZone};
use pagetemplate_core::{parse, serialize, PageTemplate};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_EXTENSION: &str = "xojt";

/// Read a template file. Content that does not parse still yields a usable
/// (defaulted) template; only I/O failures are errors.
pub fn read_template(path: &Path) -> Result<PageTemplate, ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    log::info!("loaded page template from {}", path.display());
    Ok(parse(&text))
}

pub fn write_template(path: &Path, template: &PageTemplate) -> Result<(), ConfigError> {
    fs::write(path, serialize(template)).map_err(|e| ConfigError::io(path, e))?;
    log::info!("saved page template to {}", path.display());
    Ok(())
}

/// Suggested name for a new template file, e.g. `2024-03-01-Template-14-05.xojt`
pub fn default_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%F-Template-%H-%M.xojt").to_string()
}

/// Append `.xojt` unless the path already ends in it (case-insensitive)
pub fn with_template_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TEMPLATE_EXTENSION));

    if has_ext {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(TEMPLATE_EXTENSION);
        PathBuf::from(name)
    }
}
