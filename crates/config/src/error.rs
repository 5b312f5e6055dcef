use pagetemplate_core::TemplateError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ConfigError {
    /// File read/write failure.
    Io { path: PathBuf, message: String },
    /// Settings file is not valid JSON for `Settings`.
    Parse { path: PathBuf, message: String },
    /// Settings could not be encoded.
    Serialize(String),
    /// Rejected template edit.
    Template(TemplateError),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io { path: path.into(), message: err.to_string() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Parse { path, message } => {
                write!(f, "{}: invalid settings: {message}", path.display())
            }
            Self::Serialize(msg) => write!(f, "cannot encode settings: {msg}"),
            Self::Template(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Template(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TemplateError> for ConfigError {
    fn from(err: TemplateError) -> Self {
        Self::Template(err)
    }
}
