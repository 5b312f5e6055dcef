//! Page template model
//!
//! Describes how new pages look: paper size (in points), background color,
//! background pattern, and whether to copy the previous page instead.

use crate::color::Color;
use serde::{Serialize, Serializer};
use std::fmt;

/// A4 in points, rounded to the hundredths the descriptor keeps
pub const DEFAULT_PAGE_WIDTH: f64 = 595.28;
pub const DEFAULT_PAGE_HEIGHT: f64 = 841.89;

/// Background pattern of a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BackgroundType {
    /// Plain page (no pattern)
    #[default]
    None,
    Lined,
    Ruled,
    Graph,
    /// A pattern this build does not know, kept verbatim so it survives a
    /// load/save cycle (e.g. written by a newer version). Must be a single
    /// non-empty token that is not a known name; see [`BackgroundType::other`].
    Other(String),
}

impl BackgroundType {
    /// Canonical descriptor token
    pub fn name(&self) -> &str {
        match self {
            BackgroundType::None => "none",
            BackgroundType::Lined => "lined",
            BackgroundType::Ruled => "ruled",
            BackgroundType::Graph => "graph",
            BackgroundType::Other(token) => token,
        }
    }

    /// Case-insensitive lookup; unknown tokens become `Other` with case preserved.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "none" => BackgroundType::None,
            "lined" => BackgroundType::Lined,
            "ruled" => BackgroundType::Ruled,
            "graph" => BackgroundType::Graph,
            _ => BackgroundType::Other(token.to_string()),
        }
    }

    /// Checked `Other`: the token has to survive the descriptor unchanged.
    pub fn other(token: impl Into<String>) -> Result<Self, TemplateError> {
        let background = BackgroundType::Other(token.into());
        validate_background(&background)?;
        Ok(background)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BackgroundType::Other(_))
    }
}

impl fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BackgroundType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Which page dimension a value was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Page width/height not a finite value > 0
    InvalidDimension { axis: Axis, value: f64 },
    /// Background choice index outside the selectable list
    UnknownChoice { index: usize, len: usize },
    /// Background token that would not read back as itself
    InvalidBackground(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { axis, value } => {
                write!(f, "page {axis} must be a positive number, got {value}")
            }
            Self::UnknownChoice { index, len } => {
                write!(f, "background choice {index} out of range (0..{len})")
            }
            Self::InvalidBackground(token) => {
                write!(f, "invalid background type '{token}'")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Round to hundredths of a point (the precision the descriptor stores).
pub fn quantize(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Check a dimension and return it quantized.
///
/// Values that would quantize to 0 are rejected as well, so a valid template
/// never serializes a "0.00" dimension.
pub fn validate_dimension(axis: Axis, value: f64) -> Result<f64, TemplateError> {
    let q = quantize(value);
    if q.is_finite() && q > 0.0 {
        Ok(q)
    } else {
        Err(TemplateError::InvalidDimension { axis, value })
    }
}

/// Reject `Other` tokens that are empty, contain whitespace, or spell a
/// known type (those would parse back as something else).
pub fn validate_background(background: &BackgroundType) -> Result<(), TemplateError> {
    match background {
        BackgroundType::Other(token)
            if token.is_empty()
                || token.contains(char::is_whitespace)
                || BackgroundType::from_token(token).is_known() =>
        {
            Err(TemplateError::InvalidBackground(token.clone()))
        }
        _ => Ok(()),
    }
}

/// Default look of a newly inserted page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    page_width: f64,
    page_height: f64,
    background_color: Color,
    background_type: BackgroundType,
    copy_last_page_settings: bool,
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            background_color: Color::WHITE,
            background_type: BackgroundType::None,
            copy_last_page_settings: false,
        }
    }
}

impl PageTemplate {
    /// Checked construction. Dimensions are quantized to hundredths.
    pub fn new(
        page_width: f64,
        page_height: f64,
        background_color: Color,
        background_type: BackgroundType,
        copy_last_page_settings: bool,
    ) -> Result<Self, TemplateError> {
        validate_background(&background_type)?;
        Ok(Self {
            page_width: validate_dimension(Axis::Width, page_width)?,
            page_height: validate_dimension(Axis::Height, page_height)?,
            background_color,
            background_type,
            copy_last_page_settings,
        })
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Set both dimensions; on error neither is changed.
    pub fn set_page_size(&mut self, width: f64, height: f64) -> Result<(), TemplateError> {
        let width = validate_dimension(Axis::Width, width)?;
        let height = validate_dimension(Axis::Height, height)?;
        self.page_width = width;
        self.page_height = height;
        Ok(())
    }

    pub fn set_page_width(&mut self, width: f64) -> Result<(), TemplateError> {
        self.page_width = validate_dimension(Axis::Width, width)?;
        Ok(())
    }

    pub fn set_page_height(&mut self, height: f64) -> Result<(), TemplateError> {
        self.page_height = validate_dimension(Axis::Height, height)?;
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn background_type(&self) -> &BackgroundType {
        &self.background_type
    }

    pub fn set_background_type(&mut self, background_type: BackgroundType) -> Result<(), TemplateError> {
        validate_background(&background_type)?;
        self.background_type = background_type;
        Ok(())
    }

    /// When true, new pages duplicate the previous page and ignore the rest
    /// of this template.
    pub fn is_copy_last_page_settings(&self) -> bool {
        self.copy_last_page_settings
    }

    pub fn set_copy_last_page_settings(&mut self, copy: bool) {
        self.copy_last_page_settings = copy;
    }
}
