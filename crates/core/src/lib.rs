//! `pagetemplate-core`: page template model, descriptor codec, display units.
//!
//! Pure crate: no file or settings access. Callers hand in descriptor text
//! and get descriptor text back.

pub mod codec;
pub mod color;
pub mod template;
pub mod units;

pub use codec::{parse, serialize};
pub use color::Color;
pub use template::{Axis, BackgroundType, PageTemplate, TemplateError};
pub use units::{UnitEntry, UnitTable, STANDARD_UNITS};
